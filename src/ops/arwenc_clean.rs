//! Implementation of `arwenc clean`.

use std::path::{Path, PathBuf};

use crate::builder::{BuildError, Codebase};
use crate::ops::arwenc_build::classify_directory;
use crate::util::fs::remove_file_if_exists;

/// Remove the derived artifacts of the project in `directory`.
///
/// Only files named after the main unit are touched; sources, the export
/// list and cargo's `target/` stay. Returns the paths actually removed.
pub fn clean(directory: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let (directory, kind) = classify_directory(directory)?;
    let paths = Codebase::new(kind, directory).artifact_paths()?;

    let mut removed = Vec::new();
    for path in paths.outputs() {
        let existed = remove_file_if_exists(path).map_err(|e| BuildError::Unreadable {
            path: path.to_path_buf(),
            message: format!("{:#}", e),
        })?;
        if existed {
            tracing::debug!("removed {}", path.display());
            removed.push(path.to_path_buf());
        }
    }

    Ok(removed)
}
