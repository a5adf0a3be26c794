pub mod constants;
pub mod datetime;
pub mod numeric;
pub mod progress;

pub use constants::*;
pub use datetime::parse_datetime;
pub use numeric::{format_count, format_number, parse_number};
pub use progress::ProgressReporter;
