use crate::config::DataLayout;
use crate::error::Result;
use crate::models::{StepOutcome, Table};
use crate::processors::common::save_table;
use crate::readers::TableReader;
use crate::utils::constants::{
    PROCESSED_AQI_FILE, PROCESSED_AQI_NUMERIC_COLUMNS, PROCESSED_AQI_OUTPUT,
};
use crate::writers::TableWriter;
use tracing::{debug, info};

/// Re-types the partially processed AQI export. No rows are removed.
pub struct ProcessedAqiNormalizer {
    reader: TableReader,
    writer: TableWriter,
}

impl ProcessedAqiNormalizer {
    pub fn new() -> Self {
        Self {
            reader: TableReader::new(),
            writer: TableWriter::new(),
        }
    }

    pub fn clean_table(&self, mut table: Table) -> Result<Table> {
        table.parse_datetime_column("timestamp");
        let coerced = table.coerce_numeric_columns(&PROCESSED_AQI_NUMERIC_COLUMNS);
        debug!(coerced, "Coerced processed AQI columns");
        Ok(table)
    }

    pub fn run(&self, layout: &DataLayout) -> Result<Vec<StepOutcome>> {
        let path = layout.raw_path(PROCESSED_AQI_FILE);
        if !path.exists() {
            return Ok(vec![StepOutcome::file_not_found("processed_aqi_data")]);
        }

        info!(path = %path.display(), "Normalizing processed AQI data");
        let table = self.clean_table(self.reader.read_table(&path)?)?;
        Ok(vec![save_table(&self.writer, &table, layout, PROCESSED_AQI_OUTPUT)?])
    }
}

impl Default for ProcessedAqiNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
