use crate::utils::datetime::start_of_day;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Inclusive calendar window. Bounds are compared at midnight, so a
/// timestamp later on the end date falls outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, value: NaiveDateTime) -> bool {
        value >= start_of_day(self.start) && value <= start_of_day(self.end)
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
