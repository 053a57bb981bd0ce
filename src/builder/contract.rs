//! Solidity contracts.
//!
//! The unit is located, but no stages exist for it yet, so every build stops
//! with `UnsupportedSourceKind` before the soll toolchain is provisioned.

use std::path::{Path, PathBuf};

use crate::builder::codebase::{find_single_unit, BuildEnv};
use crate::builder::BuildError;
use crate::core::artifacts::ArtifactPaths;
use crate::core::SourceKind;

#[derive(Debug, Clone)]
pub struct ContractCodebase {
    directory: PathBuf,
}

impl ContractCodebase {
    pub fn new(directory: PathBuf) -> Self {
        ContractCodebase { directory }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn main_unit(&self) -> Result<PathBuf, BuildError> {
        find_single_unit(&self.directory, ".sol")
    }

    /// The error every build ends with, once the unit is known to exist.
    ///
    /// Main-unit problems are reported first so they are not masked.
    pub(crate) fn unsupported(&self) -> Result<BuildError, BuildError> {
        let unit = self.main_unit()?;
        tracing::warn!("no pipeline for {}", unit.display());
        Ok(BuildError::UnsupportedSourceKind {
            kind: Some(SourceKind::ContractLanguage),
            directory: self.directory.clone(),
        })
    }

    pub(crate) fn perform_build(
        &self,
        _env: &BuildEnv<'_>,
        _paths: &ArtifactPaths,
        _debug: bool,
    ) -> Result<(), BuildError> {
        Err(self.unsupported()?)
    }
}
