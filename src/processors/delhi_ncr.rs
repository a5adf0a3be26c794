use crate::config::DataLayout;
use crate::error::Result;
use crate::models::{StepOutcome, Table};
use crate::processors::common::{first_existing, parse_text_datetime, save_table};
use crate::readers::TableReader;
use crate::utils::constants::{
    DELHI_MAX_YEAR, DELHI_MIN_YEAR, DELHI_NCR_FALLBACK_FILE, DELHI_NCR_FILE, DELHI_NCR_OUTPUT,
    DELHI_NUMERIC_COLUMNS,
};
use crate::writers::TableWriter;
use std::ops::RangeInclusive;
use tracing::{debug, info};

/// Cleans the hourly Delhi-NCR sensor feed.
pub struct DelhiNcrCleaner {
    years: RangeInclusive<i32>,
    reader: TableReader,
    writer: TableWriter,
}

impl DelhiNcrCleaner {
    pub fn new() -> Self {
        Self::with_year_window(DELHI_MIN_YEAR..=DELHI_MAX_YEAR)
    }

    pub fn with_year_window(years: RangeInclusive<i32>) -> Self {
        Self {
            years,
            reader: TableReader::new(),
            writer: TableWriter::new(),
        }
    }

    /// Parse timestamps, coerce measurements, drop rows without AQI or PM2.5,
    /// then keep the year window when a `year` column exists.
    pub fn clean_table(&self, mut table: Table) -> Result<Table> {
        parse_text_datetime(&mut table, "datetime");
        parse_text_datetime(&mut table, "date");
        table.coerce_numeric_columns(&DELHI_NUMERIC_COLUMNS);

        let dropped = table.drop_missing(&["aqi", "pm25"])?;
        debug!(dropped, "Dropped Delhi-NCR rows without aqi/pm25");

        if let Some(year) = table.column("year") {
            let (min, max) = (*self.years.start() as f64, *self.years.end() as f64);
            let keep: Vec<bool> = (0..table.height())
                .map(|row| year.number(row).is_some_and(|y| y >= min && y <= max))
                .collect();
            let dropped = table.retain_rows(&keep);
            debug!(dropped, years = ?self.years, "Dropped Delhi-NCR rows outside year window");
        }

        Ok(table)
    }

    pub fn run(&self, layout: &DataLayout) -> Result<Vec<StepOutcome>> {
        let Some(path) = first_existing(layout, &[DELHI_NCR_FILE, DELHI_NCR_FALLBACK_FILE]) else {
            return Ok(vec![StepOutcome::skipped(
                "delhi_ncr",
                &format!(
                    "no raw file found ({} or {})",
                    DELHI_NCR_FILE, DELHI_NCR_FALLBACK_FILE
                ),
            )]);
        };

        info!(path = %path.display(), "Cleaning Delhi-NCR hourly AQI");
        let table = self.clean_table(self.reader.read_table(&path)?)?;
        Ok(vec![save_table(&self.writer, &table, layout, DELHI_NCR_OUTPUT)?])
    }
}

impl Default for DelhiNcrCleaner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Column;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_drops_rows_without_aqi_or_pm25() -> Result<()> {
        let table = Table::from_rows(
            "delhi_ncr_aqi.csv",
            &["datetime", "aqi", "pm25", "station"],
            &[
                vec!["2021-01-01 01:00:00", "300", "180.5", "Anand Vihar"],
                vec!["2021-01-01 02:00:00", "", "170", "Anand Vihar"],
                vec!["2021-01-01 03:00:00", "310", "n/a", "Anand Vihar"],
                vec!["not a time", "290", "160", "ITO"],
            ],
        )?;

        let cleaned = DelhiNcrCleaner::new().clean_table(table)?;

        assert_eq!(cleaned.height(), 2);
        assert_eq!(
            cleaned.column("aqi"),
            Some(&Column::Number(vec![Some(300.0), Some(290.0)]))
        );
        let datetime = cleaned.column("datetime").unwrap();
        assert!(datetime.datetime(0).is_some());
        assert!(datetime.is_missing(1));
        assert_eq!(cleaned.column("station").unwrap().text(1), Some("ITO"));
        Ok(())
    }

    #[test]
    fn test_year_window_applies_only_with_year_column() -> Result<()> {
        let with_year = Table::from_rows(
            "delhi_ncr_aqi.csv",
            &["aqi", "pm25", "year"],
            &[
                vec!["100", "50", "2019"],
                vec!["110", "55", "2020"],
                vec!["120", "60", "2024"],
                vec!["130", "65", "2025"],
                vec!["140", "70", "unknown"],
            ],
        )?;
        let cleaned = DelhiNcrCleaner::new().clean_table(with_year)?;
        assert_eq!(cleaned.height(), 2);
        assert_eq!(cleaned.column("year").unwrap().text(0), Some("2020"));
        assert_eq!(cleaned.column("year").unwrap().text(1), Some("2024"));

        let without_year = Table::from_rows(
            "delhi_ncr_aqi.csv",
            &["aqi", "pm25"],
            &[vec!["100", "50"], vec!["110", "55"]],
        )?;
        assert_eq!(DelhiNcrCleaner::new().clean_table(without_year)?.height(), 2);
        Ok(())
    }

    #[test]
    fn test_custom_year_window() -> Result<()> {
        let table = Table::from_rows(
            "delhi_ncr_aqi.csv",
            &["aqi", "pm25", "year"],
            &[vec!["100", "50", "2020"], vec!["110", "55", "2022"]],
        )?;
        let cleaned = DelhiNcrCleaner::with_year_window(2022..=2022).clean_table(table)?;
        assert_eq!(cleaned.height(), 1);
        Ok(())
    }

    #[test]
    fn test_numeric_time_columns_pass_through() -> Result<()> {
        let input = "datetime,date,aqi,pm25\n\
                     1609459200,20210101,300,180\n\
                     1609462800,20210101,310,170\n";
        let table = TableReader::new().read_from("delhi_ncr_aqi.csv", input.as_bytes())?;
        let cleaned = DelhiNcrCleaner::new().clean_table(table)?;

        let mut out = Vec::new();
        TableWriter::new().write_table_to(&cleaned, &mut out)?;
        assert_eq!(
            String::from_utf8_lossy(&out),
            "datetime,date,aqi,pm25\n\
             1609459200,20210101,300.0,180.0\n\
             1609462800,20210101,310.0,170.0\n"
        );
        Ok(())
    }

    #[test]
    fn test_missing_aqi_column_is_error() -> Result<()> {
        let table = Table::from_rows("delhi_ncr_aqi.csv", &["pm25"], &[vec!["10"]])?;
        assert!(DelhiNcrCleaner::new().clean_table(table).is_err());
        Ok(())
    }

    #[test]
    fn test_fallback_file_and_skip() -> Result<()> {
        let root = TempDir::new()?;
        let layout = DataLayout::under(root.path());
        std::fs::create_dir_all(layout.raw_dir())?;
        layout.ensure_processed_dir()?;

        let cleaner = DelhiNcrCleaner::new();
        let outcomes = cleaner.run(&layout)?;
        assert_eq!(
            outcomes[0].to_string(),
            "Skip delhi_ncr: no raw file found (delhi_ncr_aqi.csv or delhi_ncr_aqi_dataset.csv)"
        );
        assert!(!layout.processed_path(DELHI_NCR_OUTPUT).exists());

        std::fs::write(
            layout.raw_path(DELHI_NCR_FALLBACK_FILE),
            "date,aqi,pm25\n2021-02-01,200,90\n2021-02-02,,95\n",
        )?;
        let outcomes = cleaner.run(&layout)?;
        assert_eq!(
            outcomes[0].to_string(),
            "Saved delhi_ncr_aqi_2020_2024_clean.csv (1 rows)"
        );
        assert_eq!(
            std::fs::read_to_string(layout.processed_path(DELHI_NCR_OUTPUT))?,
            "date,aqi,pm25\n2021-02-01,200.0,90.0\n"
        );
        Ok(())
    }
}
