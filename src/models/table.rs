use crate::error::{ProcessingError, Result};
use crate::utils::datetime::{is_date_only, parse_datetime};
use crate::utils::numeric::{format_number, parse_number};
use chrono::NaiveDateTime;

/// A single named column. `None` marks an absent value in every variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Text(Vec<Option<String>>),
    Number(Vec<Option<f64>>),
    Integer(Vec<Option<i64>>),
    DateTime(Vec<Option<NaiveDateTime>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Text(v) => v.len(),
            Column::Number(v) => v.len(),
            Column::Integer(v) => v.len(),
            Column::DateTime(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Column::Text(v) => v[row].is_none(),
            Column::Number(v) => v[row].is_none(),
            Column::Integer(v) => v[row].is_none(),
            Column::DateTime(v) => v[row].is_none(),
        }
    }

    pub fn is_all_missing(&self) -> bool {
        (0..self.len()).all(|row| self.is_missing(row))
    }

    /// Numeric view of a cell; text is parsed on the fly.
    pub fn number(&self, row: usize) -> Option<f64> {
        match self {
            Column::Number(v) => v[row],
            Column::Integer(v) => v[row].map(|i| i as f64),
            Column::Text(v) => v[row].as_deref().and_then(parse_number),
            Column::DateTime(_) => None,
        }
    }

    pub fn text(&self, row: usize) -> Option<&str> {
        match self {
            Column::Text(v) => v[row].as_deref(),
            _ => None,
        }
    }

    pub fn datetime(&self, row: usize) -> Option<NaiveDateTime> {
        match self {
            Column::DateTime(v) => v[row],
            _ => None,
        }
    }

    /// Render one cell as it is written to disk. Absent values render empty.
    pub fn render(&self, row: usize, date_only: bool) -> String {
        match self {
            Column::Text(v) => v[row].clone().unwrap_or_default(),
            Column::Number(v) => v[row].map(format_number).unwrap_or_default(),
            Column::Integer(v) => v[row].map(|i| i.to_string()).unwrap_or_default(),
            Column::DateTime(v) => v[row]
                .map(|dt| {
                    if date_only {
                        dt.format("%Y-%m-%d").to_string()
                    } else {
                        dt.format("%Y-%m-%d %H:%M:%S").to_string()
                    }
                })
                .unwrap_or_default(),
        }
    }

    pub fn is_date_only(&self) -> bool {
        match self {
            Column::DateTime(v) => is_date_only(v),
            _ => false,
        }
    }

    /// Numeric coercion: unparseable cells become absent.
    pub fn to_numeric(&self) -> Column {
        match self {
            Column::Number(v) => Column::Number(v.clone()),
            Column::Integer(v) => Column::Number(v.iter().map(|i| i.map(|i| i as f64)).collect()),
            Column::Text(v) => Column::Number(
                v.iter()
                    .map(|cell| cell.as_deref().and_then(parse_number))
                    .collect(),
            ),
            Column::DateTime(v) => Column::Number(vec![None; v.len()]),
        }
    }

    /// Date-time coercion: unparseable cells become absent.
    pub fn to_datetime(&self) -> Column {
        match self {
            Column::DateTime(v) => Column::DateTime(v.clone()),
            _ => Column::DateTime(
                (0..self.len())
                    .map(|row| {
                        if self.is_missing(row) {
                            None
                        } else {
                            parse_datetime(&self.render(row, false))
                        }
                    })
                    .collect(),
            ),
        }
    }

    /// Stringify every cell; absent cells stay absent.
    pub fn to_text(&self) -> Column {
        let date_only = self.is_date_only();
        Column::Text(
            (0..self.len())
                .map(|row| {
                    if self.is_missing(row) {
                        None
                    } else {
                        Some(self.render(row, date_only))
                    }
                })
                .collect(),
        )
    }

    /// String form of a cell; absent cells read as `nan`.
    pub fn label(&self, row: usize) -> String {
        if self.is_missing(row) {
            "nan".to_string()
        } else {
            self.render(row, self.is_date_only())
        }
    }

    /// Stringify every cell, with absent cells as the literal `nan`.
    pub fn to_labels(&self) -> Column {
        Column::Text((0..self.len()).map(|row| Some(self.label(row))).collect())
    }

    fn retain(&mut self, keep: &[bool]) {
        match self {
            Column::Text(v) => retain_by_mask(v, keep),
            Column::Number(v) => retain_by_mask(v, keep),
            Column::Integer(v) => retain_by_mask(v, keep),
            Column::DateTime(v) => retain_by_mask(v, keep),
        }
    }
}

fn retain_by_mask<T>(values: &mut Vec<T>, keep: &[bool]) {
    let mut idx = 0;
    values.retain(|_| {
        let kept = keep[idx];
        idx += 1;
        kept
    });
}

/// Ordered collection of named columns, all of equal height.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    source: String,
    headers: Vec<String>,
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    pub fn new(source: &str, headers: Vec<String>, columns: Vec<Column>) -> Result<Self> {
        if headers.len() != columns.len() {
            return Err(ProcessingError::InvalidFormat(format!(
                "{}: {} headers for {} columns",
                source,
                headers.len(),
                columns.len()
            )));
        }

        let height = columns.first().map_or(0, Column::len);
        if let Some((name, col)) = headers
            .iter()
            .zip(&columns)
            .find(|(_, col)| col.len() != height)
        {
            return Err(ProcessingError::InvalidFormat(format!(
                "{}: column '{}' has {} rows, expected {}",
                source,
                name,
                col.len(),
                height
            )));
        }

        Ok(Self {
            source: source.to_string(),
            headers,
            columns,
            height,
        })
    }

    /// Build a text table from literal rows; empty cells are absent.
    pub fn from_rows(source: &str, headers: &[&str], rows: &[Vec<&str>]) -> Result<Self> {
        let mut columns = vec![Vec::with_capacity(rows.len()); headers.len()];
        for (line, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(ProcessingError::InvalidFormat(format!(
                    "{}: row {} has {} fields, expected {}",
                    source,
                    line + 1,
                    row.len(),
                    headers.len()
                )));
            }
            for (col, cell) in columns.iter_mut().zip(row) {
                col.push((!cell.is_empty()).then(|| cell.to_string()));
            }
        }

        Self::new(
            source,
            headers.iter().map(|h| h.to_string()).collect(),
            columns.into_iter().map(Column::Text).collect(),
        )
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.headers.iter().map(String::as_str).zip(&self.columns)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|idx| &self.columns[idx])
    }

    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| ProcessingError::MissingColumn {
            column: name.to_string(),
            dataset: self.source.clone(),
        })
    }

    /// Replace a column in place, or append it when the name is new.
    pub fn set_column(&mut self, name: &str, column: Column) -> Result<()> {
        if !self.headers.is_empty() && column.len() != self.height {
            return Err(ProcessingError::InvalidFormat(format!(
                "{}: column '{}' has {} rows, expected {}",
                self.source,
                name,
                column.len(),
                self.height
            )));
        }

        match self.position(name) {
            Some(idx) => self.columns[idx] = column,
            None => {
                if self.headers.is_empty() {
                    self.height = column.len();
                }
                self.headers.push(name.to_string());
                self.columns.push(column);
            }
        }
        Ok(())
    }

    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.position(name)?;
        self.headers.remove(idx);
        Some(self.columns.remove(idx))
    }

    /// Rename `from` to `to`, dropping any existing `to` column. Returns
    /// whether `from` existed.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return self.has_column(from);
        }
        if !self.has_column(from) {
            return false;
        }
        self.remove_column(to);
        if let Some(idx) = self.position(from) {
            self.headers[idx] = to.to_string();
        }
        true
    }

    /// Replace a column with `convert(column)` if present; returns whether it was.
    pub fn map_column<F>(&mut self, name: &str, convert: F) -> bool
    where
        F: FnOnce(&Column) -> Column,
    {
        match self.position(name) {
            Some(idx) => {
                self.columns[idx] = convert(&self.columns[idx]);
                true
            }
            None => false,
        }
    }

    /// Coerce a column to numeric if present; returns whether it was.
    pub fn coerce_numeric(&mut self, name: &str) -> bool {
        self.map_column(name, Column::to_numeric)
    }

    /// Coerce every listed column that is present; returns how many were.
    pub fn coerce_numeric_columns(&mut self, names: &[&str]) -> usize {
        names
            .iter()
            .filter(|name| self.coerce_numeric(name))
            .count()
    }

    /// Parse a column as date-times if present; returns whether it was.
    pub fn parse_datetime_column(&mut self, name: &str) -> bool {
        self.map_column(name, Column::to_datetime)
    }

    /// Keep rows whose mask entry is true; returns the number removed.
    pub fn retain_rows(&mut self, keep: &[bool]) -> usize {
        debug_assert_eq!(keep.len(), self.height);
        let kept = keep.iter().filter(|k| **k).count();
        let removed = self.height - kept;
        if removed > 0 {
            for col in &mut self.columns {
                col.retain(keep);
            }
            self.height = kept;
        }
        removed
    }

    /// Drop rows with an absent value in any of `subset`. Every subset column
    /// must exist. Returns the number of rows removed.
    pub fn drop_missing(&mut self, subset: &[&str]) -> Result<usize> {
        let mut keep = vec![true; self.height];
        for name in subset {
            let col = self.require_column(name)?;
            for (row, kept) in keep.iter_mut().enumerate() {
                if *kept && col.is_missing(row) {
                    *kept = false;
                }
            }
        }
        Ok(self.retain_rows(&keep))
    }

    /// Remove columns with no present value; returns their names.
    pub fn drop_empty_columns(&mut self) -> Vec<String> {
        let empty: Vec<String> = self
            .columns()
            .filter(|(_, col)| col.is_all_missing())
            .map(|(name, _)| name.to_string())
            .collect();
        for name in &empty {
            self.remove_column(name);
        }
        empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Table {
        Table::from_rows(
            "sample.csv",
            &["city", "aqi", "note"],
            &[
                vec!["Delhi", "150", ""],
                vec!["Mumbai", "abc", ""],
                vec!["", "80.5", ""],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows_marks_empty_cells_absent() {
        let table = sample();
        assert_eq!(table.height(), 3);
        assert_eq!(table.width(), 3);
        assert!(table.column("city").unwrap().is_missing(2));
        assert_eq!(table.column("city").unwrap().text(0), Some("Delhi"));
    }

    #[test]
    fn test_coerce_numeric_maps_garbage_to_absent() {
        let mut table = sample();
        assert!(table.coerce_numeric("aqi"));
        assert!(!table.coerce_numeric("pm25"));
        assert_eq!(
            table.column("aqi"),
            Some(&Column::Number(vec![Some(150.0), None, Some(80.5)]))
        );
    }

    #[test]
    fn test_drop_missing_requires_columns() {
        let mut table = sample();
        table.coerce_numeric("aqi");
        let removed = table.drop_missing(&["aqi", "city"]).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(table.height(), 1);
        assert_eq!(table.column("city").unwrap().text(0), Some("Delhi"));

        let err = table.drop_missing(&["pm25"]).unwrap_err();
        assert!(matches!(err, ProcessingError::MissingColumn { ref column, .. } if column == "pm25"));
    }

    #[test]
    fn test_drop_empty_columns() {
        let mut table = sample();
        let dropped = table.drop_empty_columns();
        assert_eq!(dropped, vec!["note".to_string()]);
        assert_eq!(table.headers(), &["city".to_string(), "aqi".to_string()]);
    }

    #[test]
    fn test_rename_replaces_existing_target() {
        let mut table = sample();
        assert!(table.rename_column("aqi", "city"));
        assert_eq!(table.width(), 2);
        assert_eq!(table.headers(), &["city".to_string(), "note".to_string()]);
        assert_eq!(table.column("city").unwrap().text(0), Some("150"));
        assert!(!table.rename_column("missing", "other"));
    }

    #[test]
    fn test_set_column_appends_or_replaces() {
        let mut table = sample();
        table
            .set_column("year", Column::Integer(vec![Some(2020), None, Some(2021)]))
            .unwrap();
        assert_eq!(table.headers().last().map(String::as_str), Some("year"));

        table
            .set_column("city", Column::Text(vec![None, None, None]))
            .unwrap();
        assert_eq!(table.width(), 4);
        assert!(table.column("city").unwrap().is_all_missing());

        assert!(table.set_column("bad", Column::Number(vec![None])).is_err());
    }

    #[test]
    fn test_datetime_rendering() {
        let mut table = Table::from_rows(
            "dates.csv",
            &["d"],
            &[vec!["2020-01-01"], vec!["garbage"], vec!["2020-01-02 10:30:00"]],
        )
        .unwrap();
        table.parse_datetime_column("d");
        let col = table.column("d").unwrap();
        assert!(col.is_missing(1));
        assert!(!col.is_date_only());
        assert_eq!(col.render(0, false), "2020-01-01 00:00:00");
        assert_eq!(col.render(2, false), "2020-01-02 10:30:00");
        assert_eq!(col.render(1, false), "");
    }

    #[test]
    fn test_labels_fill_absent_with_nan() {
        let col = Column::Text(vec![Some("PM2.5".to_string()), None]);
        assert_eq!(col.label(0), "PM2.5");
        assert_eq!(col.label(1), "nan");
        assert_eq!(
            col.to_labels(),
            Column::Text(vec![Some("PM2.5".to_string()), Some("nan".to_string())])
        );
        assert_eq!(Column::Number(vec![Some(4.0)]).label(0), "4.0");
    }

    #[test]
    fn test_retain_rows_keeps_columns_aligned() {
        let mut table = sample();
        let removed = table.retain_rows(&[false, true, true]);
        assert_eq!(removed, 1);
        assert_eq!(table.column("city").unwrap().text(0), Some("Mumbai"));
        assert_eq!(table.column("aqi").unwrap().number(1), Some(80.5));
    }
}
