//! Implementation of `arwenc build`.

use std::path::{Path, PathBuf};

use crate::builder::{BuildEnv, BuildError, Codebase, UndefinedFiles};
use crate::core::{detect, ArtifactPaths, SourceKind};
use crate::deps::{DependencyProvisioner, LocalProvisioner};
use crate::util::config::Config;
use crate::util::context::GlobalContext;
use crate::util::process::{ProcessExecutor, SystemExecutor};

/// Options for the build command.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Select debug flags and the debug symbol list
    pub debug: bool,
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Source kind the directory was classified as
    pub kind: SourceKind,

    /// Every path derived from the main unit
    pub artifacts: ArtifactPaths,
}

/// Build the project in `directory`.
///
/// Nothing written by a failed stage is removed.
pub fn build_project(
    directory: &Path,
    options: BuildOptions,
    provisioner: &dyn DependencyProvisioner,
    executor: &dyn ProcessExecutor,
    undefined: &UndefinedFiles,
) -> Result<BuildOutcome, BuildError> {
    let (directory, kind) = classify_directory(directory)?;

    tracing::info!("Building {}", directory.display());
    tracing::info!("Debug: {}", options.debug);
    tracing::info!("Source kind: {}", kind);

    let codebase = Codebase::new(kind, directory);
    let env = BuildEnv {
        provisioner,
        executor,
        undefined,
    };
    let artifacts = codebase.build(&env, options.debug)?;

    tracing::info!("Built {}", artifacts.hex_arwen.display());
    Ok(BuildOutcome { kind, artifacts })
}

/// [`build_project`] with the default provisioner and executor.
pub fn build_project_with_context(
    directory: &Path,
    debug: bool,
    ctx: &GlobalContext,
    config: &Config,
) -> Result<BuildOutcome, BuildError> {
    let provisioner = LocalProvisioner::new(ctx.tools_dir(), config.clone());
    let undefined = UndefinedFiles::prepare(&ctx.data_dir(), &config.build)?;

    build_project(
        directory,
        BuildOptions { debug },
        &provisioner,
        &SystemExecutor,
        &undefined,
    )
}

/// Absolute project directory and its detected kind.
///
/// Shared by every command that operates on a project directory.
pub fn classify_directory(directory: &Path) -> Result<(PathBuf, SourceKind), BuildError> {
    if !directory.is_dir() {
        return Err(BuildError::InvalidDirectory {
            path: directory.to_path_buf(),
        });
    }
    let directory = std::path::absolute(directory).map_err(|e| BuildError::io(directory, e))?;

    let kind = detect(&directory)
        .map_err(|e| BuildError::io(&directory, e))?
        .ok_or_else(|| BuildError::UnsupportedSourceKind {
            kind: None,
            directory: directory.clone(),
        })?;
    Ok((directory, kind))
}
