//! Header-row and delimiter detection over a bounded sample of raw lines.
//!
//! Exported scientific datasets routinely carry metadata preamble before the
//! header and use whatever delimiter the exporting tool preferred. Detection
//! is heuristic and total: it never fails, it only degrades to defaults.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::REQUIRED_COLUMNS;

/// Number of lines read from the head of the file for detection.
pub const SAMPLE_LINES: usize = 80;

/// Candidate delimiters, in tie-break priority order.
const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Lines inspected for delimiter counting, starting at the header line.
const DELIMITER_WINDOW: usize = 20;

/// Required-name matches a line needs to be accepted as the header.
const HEADER_MATCH_THRESHOLD: usize = 5;

/// Detected format: which line names the columns, and what separates fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SniffedFormat {
    /// Zero-based index of the header line within the file.
    pub header_line: usize,
    pub delimiter: u8,
}

/// Read the first [`SAMPLE_LINES`] lines of the file, decoding
/// error-tolerantly so stray non-UTF-8 bytes cannot fail the run before
/// detection has even started. Only the head of the file is read.
pub fn read_sample(path: &Path) -> std::io::Result<Vec<String>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::with_capacity(SAMPLE_LINES);
    let mut buf = Vec::new();
    while lines.len() < SAMPLE_LINES {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Infer the header line index and the field delimiter.
pub fn sniff(sample: &[String]) -> SniffedFormat {
    let header_line = detect_header(sample);
    let delimiter = detect_delimiter(sample, header_line);
    tracing::debug!(header_line, delimiter = %char::from(delimiter), "sniffed format");
    SniffedFormat { header_line, delimiter }
}

fn detect_header(sample: &[String]) -> usize {
    // First line naming enough of the required columns wins.
    for (i, line) in sample.iter().enumerate() {
        let matches = REQUIRED_COLUMNS.iter().filter(|c| line.contains(**c)).count();
        if matches >= HEADER_MATCH_THRESHOLD {
            return i;
        }
    }

    // Fallback: the first line that looks like a delimited header at all,
    // even with unexpected column names.
    for (i, line) in sample.iter().enumerate() {
        let has_delim = line.bytes().any(|b| CANDIDATES.contains(&b));
        let has_alpha = line.chars().any(|c| c.is_alphabetic());
        if has_delim && has_alpha {
            return i;
        }
    }

    0
}

fn detect_delimiter(sample: &[String], header_line: usize) -> u8 {
    let window: Vec<&String> =
        sample.iter().skip(header_line).take(DELIMITER_WINDOW).collect();

    // Primary: raw occurrence counts across the window.
    let mut best = (0usize, b',');
    for cand in CANDIDATES {
        let count: usize =
            window.iter().map(|l| l.bytes().filter(|&b| b == cand).count()).sum();
        if count > best.0 {
            best = (count, cand);
        }
    }
    if best.0 > 0 {
        return best.1;
    }

    // Secondary: accept the first candidate that splits every non-empty
    // window line into the same field count (at least two).
    for cand in CANDIDATES {
        let mut counts = window
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.split(char::from(cand)).count());
        if let Some(first) = counts.next() {
            if first >= 2 && counts.all(|c| c == first) {
                return cand;
            }
        }
    }

    b','
}
