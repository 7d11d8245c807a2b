//! Data file discovery.

use std::path::{Path, PathBuf};

use crate::{IngestError, Result};

/// Extensions considered tabular data, matched case-insensitively.
const DATA_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

/// Bound on the directory listing embedded in a "no data file" error.
const LISTING_CAP: usize = 40;

/// Locate the single data file for a run.
///
/// Searches the directory's immediate entries first, then one level of
/// subdirectories. When several candidates match, the lexicographically
/// first path wins; the tie-break is deterministic but otherwise arbitrary,
/// so the choice is logged when it actually discards alternatives.
pub fn find_data_file(dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(IngestError::DataDirMissing { dir: dir.to_path_buf() });
    }

    let mut candidates = matching_files(dir)?;
    if candidates.is_empty() {
        for sub in sorted_entries(dir)?.into_iter().filter(|p| p.is_dir()) {
            candidates.extend(matching_files(&sub)?);
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Err(IngestError::NoDataFile {
            dir: dir.to_path_buf(),
            listing: listing_sample(dir),
        }),
        1 => Ok(candidates.remove(0)),
        n => {
            let chosen = candidates.remove(0);
            tracing::warn!(
                candidates = n,
                chosen = %chosen.display(),
                "multiple data files found, picking the lexicographically first"
            );
            Ok(chosen)
        }
    }
}

fn matching_files(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|p| p.is_file() && has_data_extension(p))
        .collect())
}

fn has_data_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| DATA_EXTENSIONS.iter().any(|d| e.eq_ignore_ascii_case(d)))
        .unwrap_or(false)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> =
        std::fs::read_dir(dir)?.filter_map(|e| e.ok().map(|e| e.path())).collect();
    entries.sort();
    Ok(entries)
}

/// Bounded recursive sample of what the directory actually contains, as
/// root-relative paths. Best effort: unreadable subtrees are simply absent.
fn listing_sample(dir: &Path) -> Vec<String> {
    let mut out = Vec::new();
    collect_listing(dir, dir, &mut out);
    out.sort();
    out.truncate(LISTING_CAP);
    out
}

fn collect_listing(root: &Path, dir: &Path, out: &mut Vec<String>) {
    let Ok(rd) = std::fs::read_dir(dir) else { return };
    for entry in rd.filter_map(|e| e.ok()) {
        let path = entry.path();
        out.push(path.strip_prefix(root).unwrap_or(&path).display().to_string());
        if path.is_dir() {
            collect_listing(root, &path, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let mut p = std::env::temp_dir();
        p.push(format!("dm-ingest-{}-{}-{}", name, std::process::id(), nanos));
        p
    }

    fn rm_rf(path: &Path) {
        let _ = std::fs::remove_dir_all(path);
    }

    #[test]
    fn missing_dir_is_a_distinct_error() {
        let root = tmp_dir("missing");
        let err = find_data_file(&root).unwrap_err();
        assert!(matches!(err, IngestError::DataDirMissing { .. }));
    }

    #[test]
    fn empty_dir_enumerates_contents() {
        let root = tmp_dir("empty");
        rm_rf(&root);
        std::fs::create_dir_all(root.join("sub")).unwrap();
        std::fs::write(root.join("notes.pdf"), b"").unwrap();

        let err = find_data_file(&root).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("no data file found"));
        assert!(msg.contains("notes.pdf"));
        assert!(msg.contains("sub"));

        rm_rf(&root);
    }

    #[test]
    fn picks_lexicographically_first() {
        let root = tmp_dir("tiebreak");
        rm_rf(&root);
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("b.csv"), b"x\n1\n").unwrap();
        std::fs::write(root.join("a.csv"), b"x\n1\n").unwrap();

        let found = find_data_file(&root).unwrap();
        assert!(found.ends_with("a.csv"));

        rm_rf(&root);
    }

    #[test]
    fn falls_back_to_one_subdirectory_level() {
        let root = tmp_dir("sublevel");
        rm_rf(&root);
        std::fs::create_dir_all(root.join("export")).unwrap();
        std::fs::write(root.join("export/events.csv"), b"x\n1\n").unwrap();

        let found = find_data_file(&root).unwrap();
        assert!(found.ends_with("export/events.csv"));

        rm_rf(&root);
    }

    #[test]
    fn top_level_file_beats_subdirectory() {
        let root = tmp_dir("toplevel");
        rm_rf(&root);
        std::fs::create_dir_all(root.join("deep")).unwrap();
        std::fs::write(root.join("deep/a.csv"), b"x\n").unwrap();
        std::fs::write(root.join("z.csv"), b"x\n").unwrap();

        let found = find_data_file(&root).unwrap();
        assert!(found.ends_with("z.csv"));

        rm_rf(&root);
    }
}
