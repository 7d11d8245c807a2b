//! Column-oriented table loading with a lenient parsing mode.

use std::path::Path;

use crate::sniff::SniffedFormat;
use crate::{IngestError, Result};

/// Column-oriented string table.
///
/// Invariant: all columns have the same length and names are unique after
/// whitespace trimming.
#[derive(Debug, Clone)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from pre-aligned columns. `names` and `columns` must
    /// have the same length, as must every column.
    pub fn new(names: Vec<String>, columns: Vec<Vec<String>>) -> Self {
        debug_assert_eq!(names.len(), columns.len());
        debug_assert!(columns.windows(2).all(|w| w[0].len() == w[1].len()));
        Self { names, columns }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    /// Column values by exact (trimmed) name.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[idx])
    }
}

/// Load the full file using the sniffed format.
///
/// Lenient: rows whose field count disagrees with the header, and rows the
/// csv reader rejects outright, are discarded rather than failing the load.
/// Columns that are empty in every row (trailing delimiters, spurious
/// exported columns) are dropped after loading.
pub fn load_table(path: &Path, format: &SniffedFormat) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);

    // Skip the preamble so the csv reader sees the header as its first line.
    let body = skip_lines(&text, format.header_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let names = match reader.headers() {
        Ok(h) => unique_names(h.iter().map(|n| n.trim().to_string()).collect()),
        Err(source) => {
            return Err(IngestError::Parse {
                path: path.to_path_buf(),
                delimiter: char::from(format.delimiter),
                header_line: format.header_line,
                source,
            });
        }
    };

    let n_cols = names.len();
    let mut columns: Vec<Vec<String>> = vec![Vec::new(); n_cols];
    let mut dropped = 0usize;

    for record in reader.records() {
        match record {
            Ok(rec) if rec.len() == n_cols => {
                for (col, field) in columns.iter_mut().zip(rec.iter()) {
                    col.push(field.to_string());
                }
            }
            // Ragged or otherwise malformed row.
            Ok(_) | Err(_) => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "discarded malformed rows during load");
    }

    Ok(drop_empty_columns(Table { names, columns }))
}

fn skip_lines(text: &str, n: usize) -> &str {
    let mut rest = text;
    for _ in 0..n {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

/// Disambiguate duplicate header names with a numeric suffix so the Table
/// uniqueness invariant holds without disturbing row alignment.
fn unique_names(raw: Vec<String>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        if !names.contains(&name) {
            names.push(name);
            continue;
        }
        let mut k = 2;
        let mut candidate = format!("{name}_{k}");
        while names.contains(&candidate) {
            k += 1;
            candidate = format!("{name}_{k}");
        }
        names.push(candidate);
    }
    names
}

fn drop_empty_columns(table: Table) -> Table {
    if table.n_rows() == 0 {
        return table;
    }
    let Table { names, columns } = table;
    let (names, columns): (Vec<_>, Vec<_>) = names
        .into_iter()
        .zip(columns)
        .filter(|(_, col): &(String, Vec<String>)| col.iter().any(|v| !v.trim().is_empty()))
        .unzip();
    Table { names, columns }
}
