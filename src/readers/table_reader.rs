use crate::error::{ProcessingError, Result};
use crate::models::{Column, Table};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, DEFAULT_NA_TOKENS};
use encoding_rs::WINDOWS_1252;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a delimited text file into a [`Table`] of text columns.
///
/// Cells matching one of the configured NA tokens are read as absent. Bytes
/// that are not valid UTF-8 are decoded as Windows-1252 instead of failing.
pub struct TableReader {
    na_tokens: HashSet<String>,
}

impl TableReader {
    pub fn new() -> Self {
        Self {
            na_tokens: DEFAULT_NA_TOKENS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn with_extra_na_tokens(mut self, tokens: &[&str]) -> Self {
        self.na_tokens.extend(tokens.iter().map(|t| t.to_string()));
        self
    }

    pub fn is_na(&self, cell: &str) -> bool {
        self.na_tokens.contains(cell)
    }

    pub fn read_table(&self, path: &Path) -> Result<Table> {
        let file = File::open(path)?;
        let source = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("<unnamed>");
        self.read_from(source, BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
    }

    pub fn read_from<R: Read>(&self, source: &str, input: R) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let raw_headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let name = decode_field(field);
                if idx == 0 {
                    name.trim_start_matches('\u{feff}').to_string()
                } else {
                    name
                }
            })
            .collect();

        if raw_headers.is_empty() {
            return Err(ProcessingError::InvalidFormat(format!(
                "{}: no columns to parse",
                source
            )));
        }

        let headers = dedupe_headers(raw_headers);
        let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        let mut record = csv::ByteRecord::new();

        while reader.read_byte_record(&mut record)? {
            if record.len() > headers.len() {
                let line = record.position().map_or(0, |p| p.line());
                return Err(ProcessingError::InvalidFormat(format!(
                    "{}: line {} has {} fields, expected {}",
                    source,
                    line,
                    record.len(),
                    headers.len()
                )));
            }

            for (idx, col) in columns.iter_mut().enumerate() {
                let cell = record
                    .get(idx)
                    .map(decode_field)
                    .filter(|cell| !self.is_na(cell));
                col.push(cell);
            }
        }

        tracing::debug!(
            source,
            rows = columns.first().map_or(0, Vec::len),
            columns = headers.len(),
            "Read table"
        );

        Table::new(source, headers, columns.into_iter().map(Column::Text).collect())
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => WINDOWS_1252
            .decode_without_bom_handling(bytes)
            .0
            .into_owned(),
    }
}

/// Repeated header names get `.1`, `.2`, ... suffixes in order of appearance.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut out = Vec::with_capacity(headers.len());

    for name in headers {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }

    out
}
