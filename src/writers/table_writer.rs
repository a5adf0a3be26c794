use crate::error::Result;
use crate::models::Table;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes tables and serializable rows as comma-delimited text.
pub struct TableWriter;

impl TableWriter {
    pub fn new() -> Self {
        Self
    }

    fn csv_writer<W: Write>(&self, out: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out)
    }

    /// Write a table to `path`, replacing any existing file.
    pub fn write_table(&self, table: &Table, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_table_to(table, BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file))?;
        tracing::debug!(
            path = %path.display(),
            rows = table.height(),
            columns = table.width(),
            "Wrote table"
        );
        Ok(())
    }

    pub fn write_table_to<W: Write>(&self, table: &Table, out: W) -> Result<()> {
        let mut writer = self.csv_writer(out);
        writer.write_record(table.headers())?;

        let columns: Vec<_> = table
            .columns()
            .map(|(_, col)| (col, col.is_date_only()))
            .collect();

        let mut record = csv::StringRecord::with_capacity(256, columns.len());
        for row in 0..table.height() {
            record.clear();
            for (col, date_only) in &columns {
                record.push_field(&col.render(row, *date_only));
            }
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Write serializable rows under an explicit header, which is emitted even
    /// when there are no rows.
    pub fn write_records<T: Serialize>(
        &self,
        records: &[T],
        headers: &[&str],
        path: &Path,
    ) -> Result<()> {
        let file = File::create(path)?;
        self.write_records_to(records, headers, BufWriter::new(file))?;
        tracing::debug!(path = %path.display(), rows = records.len(), "Wrote records");
        Ok(())
    }

    pub fn write_records_to<T: Serialize, W: Write>(
        &self,
        records: &[T],
        headers: &[&str],
        out: W,
    ) -> Result<()> {
        let mut writer = self.csv_writer(out);
        writer.write_record(headers)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        Self::new()
    }
}
