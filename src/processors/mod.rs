pub mod boundary;
pub mod city_day;
pub mod common;
pub mod delhi_ncr;
pub mod india_historical;
pub mod major_city;
pub mod pipeline;
pub mod pm25_snapshot;
pub mod processed_aqi;

pub use boundary::BoundaryPassthrough;
pub use city_day::CityDayCleaner;
pub use delhi_ncr::DelhiNcrCleaner;
pub use india_historical::IndiaHistoricalCleaner;
pub use major_city::MajorCityCleaner;
pub use pipeline::{CleaningPipeline, STEP_COUNT};
pub use pm25_snapshot::Pm25SnapshotFilter;
pub use processed_aqi::ProcessedAqiNormalizer;
