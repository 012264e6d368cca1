//! Directory scanning functionality
//!
//! This module walks the source tree once and collects every file whose
//! name satisfies the run's pattern.

use std::fs::canonicalize;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::errors::{Result, not_a_directory_error};

use super::matcher::FilePattern;

/// A file found during scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    /// The file's base name
    pub name: String,
    /// The path to the file, rooted at the scanned directory
    pub path: PathBuf,
}

/// Scans a directory tree for files matching a pattern
///
/// The walk is recursive and sorted by file name at every level, so the
/// returned order is deterministic. An empty result is not an error.
///
/// # Arguments
/// * `source_root` - The directory to scan
/// * `pattern` - The pattern file names are matched against
/// * `exclude` - An optional directory skipped during the walk (usually the
///   output directory when it lives inside the source tree)
///
/// # Returns
/// * `Result<Vec<FileMatch>>` - The matching files
///
/// # Errors
/// Returns `NotADirectory` if `source_root` is missing or not a directory
pub fn scan_directory(
    source_root: &Path,
    pattern: &FilePattern,
    exclude: Option<&Path>,
) -> Result<Vec<FileMatch>> {
    if !source_root.is_dir() {
        return Err(not_a_directory_error(source_root.to_path_buf()));
    }

    debug!(
        "Scanning directory {} for '{}'",
        source_root.display(),
        pattern.as_str()
    );

    let excluded = exclude.and_then(|path| canonicalize(path).ok());
    let mut matches = Vec::new();

    let walker = WalkDir::new(source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, excluded.as_deref()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        if !is_regular_file(&entry) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(source_root).unwrap_or(path);
        let name = Path::new(entry.file_name());

        if pattern.is_match(name, relative) {
            matches.push(FileMatch {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: path.to_path_buf(),
            });
        }
    }

    debug!("Found {} matching files", matches.len());

    Ok(matches)
}

/// Plain files, and links that resolve to one; directory links are not followed
fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn is_excluded(entry: &DirEntry, excluded: Option<&Path>) -> bool {
    let Some(excluded) = excluded else {
        return false;
    };
    // The root itself is never excluded, even if it is the output directory.
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    canonicalize(entry.path())
        .map(|path| path == excluded)
        .unwrap_or(false)
}
