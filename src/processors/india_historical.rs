use crate::config::DataLayout;
use crate::error::Result;
use crate::models::{Column, StepOutcome, Table};
use crate::processors::common::save_table;
use crate::readers::TableReader;
use crate::utils::constants::{
    HISTORICAL_NA_TOKENS, HISTORICAL_POLLUTANT_COLUMNS, INDIA_DATASET_FILE,
    INDIA_HISTORICAL_OUTPUT,
};
use crate::writers::TableWriter;
use tracing::{debug, info};

/// Cleans the long-format historical India monitoring dataset.
///
/// `sampling_date` is left as opaque text; its free-form values are not
/// interpreted as dates.
pub struct IndiaHistoricalCleaner {
    reader: TableReader,
    writer: TableWriter,
}

impl IndiaHistoricalCleaner {
    pub fn new() -> Self {
        Self {
            reader: TableReader::new().with_extra_na_tokens(&HISTORICAL_NA_TOKENS),
            writer: TableWriter::new(),
        }
    }

    pub fn clean_table(&self, mut table: Table) -> Result<Table> {
        table.parse_datetime_column("date");
        table.map_column("sampling_date", Column::to_labels);
        table.coerce_numeric_columns(&HISTORICAL_POLLUTANT_COLUMNS);

        let dropped = table.drop_empty_columns();
        if !dropped.is_empty() {
            debug!(columns = ?dropped, "Dropped all-empty historical columns");
        }
        Ok(table)
    }

    pub fn run(&self, layout: &DataLayout) -> Result<Vec<StepOutcome>> {
        let path = layout.raw_path(INDIA_DATASET_FILE);
        if !path.exists() {
            return Ok(vec![StepOutcome::file_not_found("India_dataset")]);
        }

        info!(path = %path.display(), "Cleaning historical India dataset");
        let table = self.clean_table(self.reader.read_table(&path)?)?;
        Ok(vec![save_table(&self.writer, &table, layout, INDIA_HISTORICAL_OUTPUT)?])
    }
}

impl Default for IndiaHistoricalCleaner {
    fn default() -> Self {
        Self::new()
    }
}
