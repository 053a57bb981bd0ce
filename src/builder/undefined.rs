//! Allowed-undefined symbol lists for `wasm-ld`.
//!
//! A contract imports the VM's host functions without defining them; the
//! linker needs the list of names it may leave undefined. Two lists ship with
//! arwenc: a release one and a debug one that adds the debug-print imports.

use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::BuildError;
use crate::util::config::BuildConfig;

/// Host functions available to every contract.
pub const API: &str = include_str!("../../resources/api.txt");

/// [`API`] plus the debug-only host functions.
pub const API_DEBUG: &str = include_str!("../../resources/api_debug.txt");

/// Locations of the two symbol lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedFiles {
    pub release: PathBuf,
    pub debug: PathBuf,
}

impl UndefinedFiles {
    /// The list matching the build mode.
    pub fn for_mode(&self, debug: bool) -> &Path {
        if debug {
            &self.debug
        } else {
            &self.release
        }
    }

    /// Write the bundled lists into `data_dir` unless configured elsewhere.
    ///
    /// Files whose content already matches are left untouched.
    pub fn prepare(data_dir: &Path, config: &BuildConfig) -> Result<Self, BuildError> {
        let release = match config.undefined_file {
            Some(ref path) => path.clone(),
            None => materialize(&data_dir.join("api.txt"), API)?,
        };
        let debug = match config.undefined_debug_file {
            Some(ref path) => path.clone(),
            None => materialize(&data_dir.join("api_debug.txt"), API_DEBUG)?,
        };
        Ok(UndefinedFiles { release, debug })
    }
}

fn materialize(path: &Path, contents: &str) -> Result<PathBuf, BuildError> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == contents) {
        return Ok(path.to_path_buf());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| BuildError::io(path, e))?;
    tracing::debug!("wrote {}", path.display());
    Ok(path.to_path_buf())
}
