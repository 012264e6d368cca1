//! Mirrored destination paths
//!
//! This module derives where the output for a matched file goes: the file's
//! position relative to the source root is reproduced under the output root,
//! and the configured prefix is glued onto the file name.

use std::ffi::OsString;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::{Result, invalid_filename_error, path_creation_error, path_operation_error};

/// Derives the destination path for a matched file
///
/// The destination directory (and all missing ancestors) is created as a
/// side effect. Calling this twice with the same inputs succeeds both times.
///
/// # Arguments
/// * `source_root` - The directory the file was discovered under
/// * `matched_path` - The matched file, rooted at `source_root`
/// * `output_root` - The directory the source tree is mirrored into
/// * `output_prefix` - Prepended to the file name without a separator
///
/// # Returns
/// * `Result<PathBuf>` - `output_root / dirname(relative) / (prefix + basename)`
///
/// # Errors
/// * Returns an error if `matched_path` is not under `source_root`
/// * Returns an error if `matched_path` has no file name
/// * Returns `PathCreation` if the destination directory cannot be created
pub fn derive_destination(
    source_root: &Path,
    matched_path: &Path,
    output_root: &Path,
    output_prefix: &str,
) -> Result<PathBuf> {
    let relative = matched_path
        .strip_prefix(source_root)
        .map_err(|_| path_operation_error(matched_path.to_path_buf(), "relativise"))?;

    let file_name = relative
        .file_name()
        .ok_or_else(|| invalid_filename_error(matched_path.to_path_buf()))?;

    let destination_dir = match relative.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => output_root.join(parent),
        _ => output_root.to_path_buf(),
    };

    create_dir_all(&destination_dir)
        .map_err(|e| path_creation_error(e, destination_dir.clone()))?;

    let mut destination_name = OsString::from(output_prefix);
    destination_name.push(file_name);

    let destination = destination_dir.join(destination_name);
    debug!(
        "Mirrored {} -> {}",
        matched_path.display(),
        destination.display()
    );

    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_derive_nested_path() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("src");
        let output = temp_dir.path().join("out");

        let destination = derive_destination(
            &source,
            &source.join("a").join("b").join("y.txt"),
            &output,
            "new_",
        )
        .unwrap();

        assert_eq!(destination, output.join("a").join("b").join("new_y.txt"));
        assert!(output.join("a").join("b").is_dir());
        assert!(!destination.exists(), "Only the directory is created");
    }

    #[test]
    fn test_derive_top_level_file() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("src");
        let output = temp_dir.path().join("out");

        let destination =
            derive_destination(&source, &source.join("x.txt"), &output, "p_").unwrap();
        assert_eq!(destination, output.join("p_x.txt"));
        assert!(output.is_dir());
    }

    #[test]
    fn test_derive_empty_prefix_keeps_name() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("src");
        let output = temp_dir.path().join("out");

        let destination =
            derive_destination(&source, &source.join("a").join("x.txt"), &output, "").unwrap();
        assert_eq!(destination, output.join("a").join("x.txt"));
    }

    #[test]
    fn test_derive_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("src");
        let output = temp_dir.path().join("out");
        let matched = source.join("a").join("x.txt");

        let first = derive_destination(&source, &matched, &output, "p_").unwrap();
        let second = derive_destination(&source, &matched, &output, "p_").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_derive_outside_source_root() {
        let temp_dir = tempdir().unwrap();
        let result = derive_destination(
            &temp_dir.path().join("src"),
            Path::new("/elsewhere/x.txt"),
            &temp_dir.path().join("out"),
            "p_",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_derive_directory_creation_failure() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("src");
        // A regular file where the output root should be makes creation fail.
        let blocker = temp_dir.path().join("out");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let result = derive_destination(&source, &source.join("a").join("x.txt"), &blocker, "p_");
        assert!(matches!(
            result,
            Err(crate::errors::Error::PathCreation { .. })
        ));
    }
}
