use crate::config::DataLayout;
use crate::error::Result;
use crate::models::{StepOutcome, Table};
use crate::processors::common::save_table;
use crate::readers::TableReader;
use crate::utils::constants::{INDIA_VARIOS_FILE, PM25_POLLUTANT_MARKER, PM25_SNAPSHOT_OUTPUT};
use crate::writers::TableWriter;
use tracing::{debug, info};

const POLLUTANT_ID: &str = "pollutant_id";
const POLLUTANT_AVG: &str = "pollutant_avg";
const PM25: &str = "pm25";

/// Narrows the mixed-pollutant station snapshot to located PM2.5 readings.
pub struct Pm25SnapshotFilter {
    reader: TableReader,
    writer: TableWriter,
}

impl Pm25SnapshotFilter {
    pub fn new() -> Self {
        Self {
            reader: TableReader::new(),
            writer: TableWriter::new(),
        }
    }

    pub fn clean_table(&self, mut table: Table) -> Result<Table> {
        let pollutant = table.require_column(POLLUTANT_ID)?;
        let keep: Vec<bool> = (0..table.height())
            .map(|row| is_pm25(&pollutant.label(row)))
            .collect();
        let dropped = table.retain_rows(&keep);
        debug!(dropped, "Dropped non-PM2.5 snapshot rows");

        let renamed = table.rename_column(POLLUTANT_AVG, PM25);
        if !renamed && !table.has_column(PM25) {
            if let Some(source) = compatible_average_column(&table) {
                let values = table.require_column(&source)?.to_numeric();
                table.set_column(PM25, values)?;
            }
        }

        table.coerce_numeric_columns(&[PM25, "latitude", "longitude"]);
        let dropped = table.drop_missing(&[PM25, "latitude", "longitude"])?;
        debug!(dropped, "Dropped snapshot rows without pm25 or coordinates");

        Ok(table)
    }

    pub fn run(&self, layout: &DataLayout) -> Result<Vec<StepOutcome>> {
        let path = layout.raw_path(INDIA_VARIOS_FILE);
        if !path.exists() {
            return Ok(vec![StepOutcome::file_not_found("india_varios")]);
        }

        info!(path = %path.display(), "Filtering PM2.5 snapshot");
        let table = self.clean_table(self.reader.read_table(&path)?)?;
        Ok(vec![save_table(&self.writer, &table, layout, PM25_SNAPSHOT_OUTPUT)?])
    }
}

impl Default for Pm25SnapshotFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_pm25(label: &str) -> bool {
    label
        .trim()
        .to_uppercase()
        .contains(&PM25_POLLUTANT_MARKER.to_uppercase())
}

/// A differently-cased or padded `pollutant_avg` header.
fn compatible_average_column(table: &Table) -> Option<String> {
    table
        .headers()
        .iter()
        .find(|h| h.trim().eq_ignore_ascii_case(POLLUTANT_AVG))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Column;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_pm25() {
        assert!(is_pm25("PM2.5"));
        assert!(is_pm25("  pm2.5 "));
        assert!(is_pm25("Pm2"));
        assert!(!is_pm25("PM10"));
        assert!(!is_pm25("nan"));
    }

    #[test]
    fn test_keeps_located_pm25_rows() -> Result<()> {
        let table = Table::from_rows(
            "india_varios.csv",
            &["station", "pollutant_id", "pollutant_avg", "latitude", "longitude"],
            &[
                vec!["Alipur", "PM2.5", "61", "28.815", "77.153"],
                vec!["Alipur", "PM10", "120", "28.815", "77.153"],
                vec!["Anand Vihar", "pm2.5", "NA", "28.647", "77.316"],
                vec!["Ashok Vihar", " PM2.5", "88.5", "", "77.18"],
                vec!["Aya Nagar", "", "40", "28.47", "77.11"],
                vec!["Bawana", "PM2.5", "72", "28.77", "77.05"],
            ],
        )?;

        let cleaned = Pm25SnapshotFilter::new().clean_table(table)?;

        assert_eq!(cleaned.height(), 2);
        assert!(!cleaned.has_column("pollutant_avg"));
        assert_eq!(
            cleaned.column("pm25"),
            Some(&Column::Number(vec![Some(61.0), Some(72.0)]))
        );
        assert_eq!(
            cleaned.column("latitude"),
            Some(&Column::Number(vec![Some(28.815), Some(28.77)]))
        );
        for row in 0..cleaned.height() {
            let id = cleaned.column("pollutant_id").unwrap().text(row).unwrap();
            assert!(id.to_uppercase().contains("PM2"));
        }
        Ok(())
    }

    #[test]
    fn test_compatible_average_column_fallback() -> Result<()> {
        let table = Table::from_rows(
            "india_varios.csv",
            &["pollutant_id", "Pollutant_Avg", "latitude", "longitude"],
            &[vec!["PM2.5", "33", "19.07", "72.87"]],
        )?;

        let cleaned = Pm25SnapshotFilter::new().clean_table(table)?;
        assert_eq!(cleaned.column("pm25"), Some(&Column::Number(vec![Some(33.0)])));
        assert!(cleaned.has_column("Pollutant_Avg"));
        Ok(())
    }

    #[test]
    fn test_without_any_average_column_is_error() -> Result<()> {
        let table = Table::from_rows(
            "india_varios.csv",
            &["pollutant_id", "latitude", "longitude"],
            &[vec!["PM2.5", "19.07", "72.87"]],
        )?;
        assert!(Pm25SnapshotFilter::new().clean_table(table).is_err());
        Ok(())
    }
}
