use crate::analyzers::event_change::{AQI_COLUMN, CITY_COLUMN, DATE_COLUMN};
use crate::analyzers::{EventChangeAnalyzer, CITY_CHANGE_HEADERS};
use crate::config::{DataLayout, PipelineConfig};
use crate::error::Result;
use crate::models::{CityAqiChange, Column, StepOutcome, Table};
use crate::processors::common::save_table;
use crate::readers::TableReader;
use crate::utils::constants::{
    CITY_CHANGE_OUTPUT, CITY_DAY_FILE, CITY_DAY_OUTPUT, CITY_MEASUREMENT_COLUMNS,
};
use crate::writers::TableWriter;
use chrono::Datelike;
use tracing::{debug, info};

/// Cleans the multi-city daily series and derives the per-city AQI change
/// between the baseline and lockdown windows.
pub struct CityDayCleaner {
    analyzer: EventChangeAnalyzer,
    reader: TableReader,
    writer: TableWriter,
}

impl CityDayCleaner {
    pub fn new() -> Self {
        Self::from_config(&PipelineConfig::default())
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            analyzer: EventChangeAnalyzer::new(config.baseline_window(), config.event_window()),
            reader: TableReader::new(),
            writer: TableWriter::new(),
        }
    }

    /// Parse `Date`, drop unparseable dates, derive `year` and coerce the
    /// measurement columns. The result still holds rows with absent AQI.
    pub fn prepare(&self, mut table: Table) -> Result<Table> {
        table.require_column(DATE_COLUMN)?;
        table.parse_datetime_column(DATE_COLUMN);
        let dropped = table.drop_missing(&[DATE_COLUMN])?;
        debug!(dropped, "Dropped city-day rows with unparseable dates");

        let dates = table.require_column(DATE_COLUMN)?;
        let years: Vec<Option<i64>> = (0..table.height())
            .map(|row| dates.datetime(row).map(|dt| i64::from(dt.year())))
            .collect();
        table.set_column("year", Column::Integer(years))?;

        table.coerce_numeric_columns(&CITY_MEASUREMENT_COLUMNS);
        Ok(table)
    }

    /// Rows of a prepared table that have both AQI and a city.
    pub fn clean(&self, prepared: &Table) -> Result<Table> {
        let mut cleaned = prepared.clone();
        let dropped = cleaned.drop_missing(&[AQI_COLUMN, CITY_COLUMN])?;
        debug!(dropped, "Dropped city-day rows without AQI or City");
        Ok(cleaned)
    }

    pub fn summarize(&self, prepared: &Table) -> Result<Vec<CityAqiChange>> {
        self.analyzer.city_changes(prepared)
    }

    pub fn run(&self, layout: &DataLayout) -> Result<Vec<StepOutcome>> {
        let path = layout.raw_path(CITY_DAY_FILE);
        if !path.exists() {
            return Ok(vec![StepOutcome::file_not_found("city_day")]);
        }

        info!(path = %path.display(), "Cleaning city-day series");
        let prepared = self.prepare(self.reader.read_table(&path)?)?;

        let cleaned = self.clean(&prepared)?;
        let saved = save_table(&self.writer, &cleaned, layout, CITY_DAY_OUTPUT)?;

        let changes = self.summarize(&prepared)?;
        self.writer.write_records(
            &changes,
            &CITY_CHANGE_HEADERS,
            &layout.processed_path(CITY_CHANGE_OUTPUT),
        )?;

        Ok(vec![
            saved,
            StepOutcome::Summarized {
                file_name: CITY_CHANGE_OUTPUT.to_string(),
                cities: changes.len(),
            },
        ])
    }
}

impl Default for CityDayCleaner {
    fn default() -> Self {
        Self::new()
    }
}
