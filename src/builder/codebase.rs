//! The per-kind build pipelines and the steps they share.
//!
//! Every kind goes through the same sequence: provision its toolchain
//! modules, resolve the main unit, derive artifact paths, run its own stages,
//! then hex-encode the WASM binary. Only the stages differ. Kinds without
//! stages are rejected before anything is downloaded.

use std::path::{Path, PathBuf};

use crate::builder::contract::ContractCodebase;
use crate::builder::native::NativeCodebase;
use crate::builder::postprocess;
use crate::builder::systems::SystemsCodebase;
use crate::builder::undefined::UndefinedFiles;
use crate::builder::BuildError;
use crate::core::{ArtifactPaths, SourceKind};
use crate::deps::DependencyProvisioner;
use crate::util::fs::list_files;
use crate::util::process::ProcessExecutor;

/// External collaborators a pipeline needs while building.
#[derive(Clone, Copy)]
pub struct BuildEnv<'a> {
    pub provisioner: &'a dyn DependencyProvisioner,
    pub executor: &'a dyn ProcessExecutor,
    pub undefined: &'a UndefinedFiles,
}

/// A project directory paired with the pipeline for its source kind.
#[derive(Debug, Clone)]
pub enum Codebase {
    Native(NativeCodebase),
    Contract(ContractCodebase),
    Systems(SystemsCodebase),
}

impl Codebase {
    /// Pipeline for `kind` rooted at `directory`.
    pub fn new(kind: SourceKind, directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        match kind {
            SourceKind::NativeCompiled => Codebase::Native(NativeCodebase::new(directory)),
            SourceKind::ContractLanguage => Codebase::Contract(ContractCodebase::new(directory)),
            SourceKind::SystemsLanguage => Codebase::Systems(SystemsCodebase::new(directory)),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Codebase::Native(_) => SourceKind::NativeCompiled,
            Codebase::Contract(_) => SourceKind::ContractLanguage,
            Codebase::Systems(_) => SourceKind::SystemsLanguage,
        }
    }

    pub fn directory(&self) -> &Path {
        match self {
            Codebase::Native(c) => c.directory(),
            Codebase::Contract(c) => c.directory(),
            Codebase::Systems(c) => c.directory(),
        }
    }

    /// The entry-point source file whose name every artifact shares.
    pub fn main_unit(&self) -> Result<PathBuf, BuildError> {
        match self {
            Codebase::Native(c) => c.main_unit(),
            Codebase::Contract(c) => c.main_unit(),
            Codebase::Systems(c) => c.main_unit(),
        }
    }

    /// Artifact paths for this codebase, without building anything.
    pub fn artifact_paths(&self) -> Result<ArtifactPaths, BuildError> {
        Ok(ArtifactPaths::for_unit(&self.main_unit()?))
    }

    /// Run the whole pipeline. On success every artifact has been written.
    pub fn build(&self, env: &BuildEnv<'_>, debug: bool) -> Result<ArtifactPaths, BuildError> {
        if let Codebase::Contract(c) = self {
            return Err(c.unsupported()?);
        }

        for key in self.kind().dependencies() {
            env.provisioner.ensure_installed(key)?;
        }

        let paths = self.artifact_paths()?;
        tracing::info!("Main unit: {}", paths.unit.display());

        match self {
            Codebase::Native(c) => c.perform_build(env, &paths, debug)?,
            Codebase::Contract(c) => c.perform_build(env, &paths, debug)?,
            Codebase::Systems(c) => c.perform_build(env, &paths, debug)?,
        }

        if !paths.wasm.is_file() {
            return Err(BuildError::MissingWasm {
                path: paths.wasm.clone(),
            });
        }
        postprocess::tag(&paths.wasm, &paths.hex, &paths.hex_arwen)?;

        Ok(paths)
    }
}

/// The one file in `directory` whose name ends with `suffix`.
///
/// Matching is case-sensitive. Zero matches is [`BuildError::NoMainUnit`],
/// more than one is [`BuildError::AmbiguousMainUnit`].
pub fn find_single_unit(directory: &Path, suffix: &str) -> Result<PathBuf, BuildError> {
    let files = list_files(directory).map_err(|e| BuildError::Unreadable {
        path: directory.to_path_buf(),
        message: format!("{:#}", e),
    })?;

    let mut matches: Vec<PathBuf> = files
        .into_iter()
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().ends_with(suffix))
        })
        .collect();

    match matches.len() {
        0 => Err(BuildError::NoMainUnit {
            suffix: suffix.to_string(),
            directory: directory.to_path_buf(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(BuildError::AmbiguousMainUnit {
            suffix: suffix.to_string(),
            directory: directory.to_path_buf(),
            candidates: matches
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
        }),
    }
}
