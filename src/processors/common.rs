use crate::config::DataLayout;
use crate::error::Result;
use crate::models::{Column, StepOutcome, Table};
use crate::utils::numeric::parse_number;
use crate::writers::TableWriter;
use std::path::PathBuf;

/// First candidate present in the raw directory, in preference order.
pub fn first_existing(layout: &DataLayout, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| layout.raw_path(name))
        .find(|path| path.exists())
}

/// A raw column reads as string-typed when some present cell is not a number.
/// All-numeric and all-absent columns count as numeric.
pub fn is_string_typed(column: &Column) -> bool {
    match column {
        Column::Text(cells) => cells.iter().flatten().any(|cell| parse_number(cell).is_none()),
        _ => false,
    }
}

/// Parse a column into date-times only while it is string-typed.
pub fn parse_text_datetime(table: &mut Table, name: &str) -> bool {
    if table.column(name).is_some_and(is_string_typed) {
        table.parse_datetime_column(name)
    } else {
        false
    }
}

/// Write a cleaned table into the processed directory and report it.
pub fn save_table(
    writer: &TableWriter,
    table: &Table,
    layout: &DataLayout,
    file_name: &str,
) -> Result<StepOutcome> {
    writer.write_table(table, &layout.processed_path(file_name))?;
    Ok(StepOutcome::Saved {
        file_name: file_name.to_string(),
        rows: table.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_existing_prefers_earlier_candidate() -> Result<()> {
        let root = TempDir::new()?;
        let layout = DataLayout::under(root.path());
        std::fs::create_dir_all(layout.raw_dir())?;

        assert_eq!(first_existing(&layout, &["a.csv", "b.csv"]), None);

        std::fs::write(layout.raw_path("b.csv"), "x\n")?;
        assert_eq!(
            first_existing(&layout, &["a.csv", "b.csv"]),
            Some(layout.raw_path("b.csv"))
        );

        std::fs::write(layout.raw_path("a.csv"), "x\n")?;
        assert_eq!(
            first_existing(&layout, &["a.csv", "b.csv"]),
            Some(layout.raw_path("a.csv"))
        );
        Ok(())
    }

    #[test]
    fn test_parse_text_datetime_skips_typed_columns() -> Result<()> {
        let mut table = Table::from_rows("t.csv", &["date"], &[vec!["2020-01-01"]])?;
        assert!(parse_text_datetime(&mut table, "date"));
        assert!(!parse_text_datetime(&mut table, "date"));
        assert!(!parse_text_datetime(&mut table, "datetime"));
        Ok(())
    }

    #[test]
    fn test_numeric_text_is_not_string_typed() -> Result<()> {
        let mut table = Table::from_rows(
            "t.csv",
            &["epoch", "mixed", "blank"],
            &[
                vec!["1609459200", "20210101", ""],
                vec!["1609462800", "2021-01-02", ""],
                vec!["", "", ""],
            ],
        )?;
        assert!(!is_string_typed(table.column("epoch").unwrap()));
        assert!(is_string_typed(table.column("mixed").unwrap()));
        assert!(!is_string_typed(table.column("blank").unwrap()));

        assert!(!parse_text_datetime(&mut table, "epoch"));
        assert!(!parse_text_datetime(&mut table, "blank"));
        assert_eq!(table.column("epoch").unwrap().text(0), Some("1609459200"));
        assert!(parse_text_datetime(&mut table, "mixed"));
        Ok(())
    }
}
