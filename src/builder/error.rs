//! Build error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::{ManifestError, SourceKind};

/// Error raised while building a project.
///
/// Every failure is fatal; nothing is retried and nothing written by a
/// failing stage is cleaned up.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("not a directory: {}", path.display())]
    InvalidDirectory { path: PathBuf },

    #[error("{}", unsupported_message(*kind, directory))]
    UnsupportedSourceKind {
        kind: Option<SourceKind>,
        directory: PathBuf,
    },

    #[error("no unit: [{suffix}] in {}", directory.display())]
    NoMainUnit { suffix: String, directory: PathBuf },

    #[error(
        "more [{suffix}] units aren't supported yet: {} in {}",
        candidates.join(", "),
        directory.display()
    )]
    AmbiguousMainUnit {
        suffix: String,
        directory: PathBuf,
        candidates: Vec<String>,
    },

    #[error("`{program}` failed:\n{output}")]
    Toolchain { program: String, output: String },

    #[error("no WASM binary was produced at {}", path.display())]
    MissingWasm { path: PathBuf },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to read {}: {message}", path.display())]
    Unreadable { path: PathBuf, message: String },

    #[error("unknown toolchain module `{key}`")]
    UnknownModule { key: String },

    #[error("toolchain module `{key}` is not available: {hint}")]
    DependencyMissing { key: String, hint: String },

    #[error("failed to install toolchain module `{key}`: {message}")]
    Install { key: String, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }
}

fn unsupported_message(kind: Option<SourceKind>, directory: &std::path::Path) -> String {
    match kind {
        Some(kind) => format!(
            "building `{}` projects is not supported yet ({})",
            kind,
            directory.display()
        ),
        None => format!(
            "could not determine the source kind of {} (expected a .c, .sol or Cargo.toml file)",
            directory.display()
        ),
    }
}
