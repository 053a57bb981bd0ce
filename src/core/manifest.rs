//! Reading the package name out of a `Cargo.toml`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::util::fs::read_manifest;

/// Errors reading a systems-language manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {message}", path.display())]
    Unreadable { path: PathBuf, message: String },

    #[error("manifest {} has no `package.name`", path.display())]
    MissingPackageName { path: PathBuf },
}

/// Extract `package.name` from the manifest at `path`.
pub fn package_name(path: &Path) -> Result<String, ManifestError> {
    let table = read_manifest(path).map_err(|e| ManifestError::Unreadable {
        path: path.to_path_buf(),
        message: format!("{:#}", e),
    })?;

    table
        .get("package")
        .and_then(|package| package.get("name"))
        .and_then(|name| name.as_str())
        .map(str::to_string)
        .ok_or_else(|| ManifestError::MissingPackageName {
            path: path.to_path_buf(),
        })
}
