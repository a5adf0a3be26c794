use crate::error::Result;
use crate::models::{CityAqiChange, DateWindow, Table};
use std::collections::BTreeMap;

/// Column names in the city-day series.
pub const CITY_COLUMN: &str = "City";
pub const DATE_COLUMN: &str = "Date";
pub const AQI_COLUMN: &str = "AQI";

/// Header of the per-city change summary, in output order.
pub const CITY_CHANGE_HEADERS: [&str; 4] = ["City", "aqi_pre", "aqi_covid", "aqi_drop"];

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Compares each city's mean AQI in a baseline window with its mean in an
/// event window.
pub struct EventChangeAnalyzer {
    baseline: DateWindow,
    event: DateWindow,
}

impl EventChangeAnalyzer {
    pub fn new(baseline: DateWindow, event: DateWindow) -> Self {
        Self { baseline, event }
    }

    /// Per-city change, sorted by `aqi_drop` descending.
    ///
    /// Expects `Date` already parsed and `AQI` already numeric. A city is in the
    /// result only if it has at least one AQI reading in both windows; rows
    /// without a city are ignored. Ties keep ascending city order.
    pub fn city_changes(&self, table: &Table) -> Result<Vec<CityAqiChange>> {
        let baseline = self.window_means(table, &self.baseline)?;
        let event = self.window_means(table, &self.event)?;

        let mut changes: Vec<CityAqiChange> = baseline
            .into_iter()
            .filter_map(|(city, pre)| {
                event
                    .get(&city)
                    .map(|covid| CityAqiChange::new(city, pre, *covid))
            })
            .collect();

        changes.sort_by(|a, b| b.aqi_drop.total_cmp(&a.aqi_drop));

        tracing::debug!(
            baseline = %self.baseline,
            event = %self.event,
            cities = changes.len(),
            "Computed city AQI change"
        );

        Ok(changes)
    }

    fn window_means(&self, table: &Table, window: &DateWindow) -> Result<BTreeMap<String, f64>> {
        let cities = table.require_column(CITY_COLUMN)?;
        let dates = table.require_column(DATE_COLUMN)?;
        let aqi = table.require_column(AQI_COLUMN)?;

        let mut totals: BTreeMap<String, Accumulator> = BTreeMap::new();
        for row in 0..table.height() {
            let in_window = dates.datetime(row).is_some_and(|dt| window.contains(dt));
            if !in_window {
                continue;
            }
            let (Some(city), Some(value)) = (cities.text(row), aqi.number(row)) else {
                continue;
            };
            let acc = totals.entry(city.to_string()).or_default();
            acc.sum += value;
            acc.count += 1;
        }

        Ok(totals
            .into_iter()
            .map(|(city, acc)| (city, acc.mean()))
            .collect())
    }
}
