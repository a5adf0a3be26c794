use crate::config::DataLayout;
use crate::error::Result;
use crate::models::{StepOutcome, Table};
use crate::processors::common::save_table;
use crate::readers::TableReader;
use crate::utils::constants::{CITY_MEASUREMENT_COLUMNS, MAJOR_CITY_FILE, MAJOR_CITY_OUTPUT};
use crate::writers::TableWriter;
use tracing::{debug, info};

const PRIMARY_TIME_COLUMN: &str = "Datetime";
const FALLBACK_TIME_COLUMN: &str = "Date";

/// Cleans the hourly major-city feed.
pub struct MajorCityCleaner {
    reader: TableReader,
    writer: TableWriter,
}

impl MajorCityCleaner {
    pub fn new() -> Self {
        Self {
            reader: TableReader::new(),
            writer: TableWriter::new(),
        }
    }

    /// `Datetime` when present, otherwise `Date`.
    pub fn time_column(table: &Table) -> &'static str {
        if table.has_column(PRIMARY_TIME_COLUMN) {
            PRIMARY_TIME_COLUMN
        } else {
            FALLBACK_TIME_COLUMN
        }
    }

    pub fn clean_table(&self, mut table: Table) -> Result<Table> {
        let time_column = Self::time_column(&table);
        table.require_column(time_column)?;
        table.parse_datetime_column(time_column);
        table.coerce_numeric_columns(&CITY_MEASUREMENT_COLUMNS);

        let dropped = table.drop_missing(&[time_column, "AQI"])?;
        debug!(dropped, time_column, "Dropped major-city rows without time or AQI");
        Ok(table)
    }

    pub fn run(&self, layout: &DataLayout) -> Result<Vec<StepOutcome>> {
        let path = layout.raw_path(MAJOR_CITY_FILE);
        if !path.exists() {
            return Ok(vec![StepOutcome::file_not_found("major_city")]);
        }

        info!(path = %path.display(), "Cleaning major-city hourly AQI");
        let table = self.clean_table(self.reader.read_table(&path)?)?;
        Ok(vec![save_table(&self.writer, &table, layout, MAJOR_CITY_OUTPUT)?])
    }
}

impl Default for MajorCityCleaner {
    fn default() -> Self {
        Self::new()
    }
}
