pub mod event_change;

pub use event_change::{EventChangeAnalyzer, CITY_CHANGE_HEADERS};
