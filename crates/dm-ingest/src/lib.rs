//! Robust tabular ingestion for the dimuon spectrum pipeline.
//!
//! The stages run in order: [`locate::find_data_file`] →
//! [`sniff::read_sample`] + [`sniff::sniff`] → [`table::load_table`] →
//! [`coerce::coerce`]. Each stage either returns a fully valid result or
//! fails with a diagnosable [`IngestError`]; the sniffer alone is total and
//! always produces a usable format.

pub mod coerce;
pub mod locate;
pub mod sniff;
pub mod table;

mod error;

pub use error::{IngestError, Result};

/// Column names that must all be present (exact match after trimming) for a
/// table to be usable.
pub const REQUIRED_COLUMNS: [&str; 9] =
    ["E1", "px1", "py1", "pz1", "E2", "px2", "py2", "pz2", "M"];
