use std::path::PathBuf;

use thiserror::Error;

/// Ingestion error taxonomy.
///
/// Environment errors carry enough of the directory's actual contents to
/// diagnose a misconfigured path; schema errors carry both the missing and
/// the found column names; parse errors carry the attempted format so the
/// failure is reproducible.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("data directory does not exist: {}", .dir.display())]
    DataDirMissing { dir: PathBuf },

    #[error("no data file found in {}\nfiles present:\n{}", .dir.display(), .listing.join("\n"))]
    NoDataFile { dir: PathBuf, listing: Vec<String> },

    #[error(
        "failed to parse {} with delimiter {:?} and header at line {}: {}",
        .path.display(), .delimiter, .header_line, .source
    )]
    Parse {
        path: PathBuf,
        delimiter: char,
        header_line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("missing required columns {missing:?}; columns found: {found:?}")]
    MissingColumns { missing: Vec<String>, found: Vec<String> },

    #[error("no rows survived numeric coercion ({rows_before} before)")]
    EmptyAfterCoercion { rows_before: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;
