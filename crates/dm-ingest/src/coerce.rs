//! Numeric coercion of the required columns.

use crate::table::Table;
use crate::{IngestError, Result, REQUIRED_COLUMNS};

/// Fully numeric view of the required columns.
///
/// All columns have equal length and contain no NaN: rows with unparseable
/// values have been removed. Non-required columns are not carried past
/// coercion; every downstream consumer ignores them.
#[derive(Debug, Clone)]
pub struct NumericTable {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl NumericTable {
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[idx])
    }
}

/// Row accounting for the coercion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoercionReport {
    pub rows_before: usize,
    pub rows_after: usize,
}

impl CoercionReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Force the required columns to numeric, dropping rows that fail.
///
/// Partial data loss is expected in exported datasets and is surfaced as a
/// warning rather than an error; only an empty result is fatal. Missing
/// required columns fail immediately, reporting the full set of columns
/// actually found alongside the missing names.
pub fn coerce(table: &Table) -> Result<(NumericTable, CoercionReport)> {
    let mut raw: Vec<Vec<f64>> = Vec::with_capacity(REQUIRED_COLUMNS.len());
    let mut missing: Vec<String> = Vec::new();
    for name in REQUIRED_COLUMNS {
        match table.column(name) {
            Some(col) => raw.push(col.iter().map(|v| parse_value(v)).collect()),
            None => missing.push(name.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns { missing, found: table.names().to_vec() });
    }

    let rows_before = table.n_rows();

    // A NaN in any required column invalidates the whole row.
    let keep: Vec<bool> =
        (0..rows_before).map(|i| raw.iter().all(|col| !col[i].is_nan())).collect();

    let columns: Vec<Vec<f64>> = raw
        .into_iter()
        .map(|col| {
            col.into_iter().zip(&keep).filter(|(_, &k)| k).map(|(v, _)| v).collect()
        })
        .collect();

    let rows_after = columns[0].len();
    let report = CoercionReport { rows_before, rows_after };

    if report.rows_dropped() > 0 {
        tracing::warn!(
            rows_before,
            rows_after,
            dropped = report.rows_dropped(),
            "dropped rows with non-numeric values in required columns"
        );
    }

    if rows_after == 0 {
        return Err(IngestError::EmptyAfterCoercion { rows_before });
    }

    let names = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
    Ok((NumericTable { names, columns }, report))
}

/// Unparseable values become NaN markers. This also catches literal "nan"
/// text, which parses but still marks the row as missing data.
fn parse_value(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(f64::NAN)
}
