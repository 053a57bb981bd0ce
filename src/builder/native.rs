//! C contracts: clang → llc → wasm-ld.

use std::path::{Path, PathBuf};

use crate::builder::codebase::{find_single_unit, BuildEnv};
use crate::builder::toolchain::{invoke, LlvmToolchain};
use crate::builder::BuildError;
use crate::core::artifacts::{ArtifactPaths, EXPORT_EXTENSION};
use crate::util::fs::read_lines;

/// Toolchain module holding clang, llc and wasm-ld.
pub const LLVM_FOR_C: &str = "llvm-for-c";

#[derive(Debug, Clone)]
pub struct NativeCodebase {
    directory: PathBuf,
}

impl NativeCodebase {
    pub fn new(directory: PathBuf) -> Self {
        NativeCodebase { directory }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn main_unit(&self) -> Result<PathBuf, BuildError> {
        find_single_unit(&self.directory, ".c")
    }

    /// Symbols to export, in file order, from the directory's `.export` file.
    pub fn exports(&self) -> Result<Vec<String>, BuildError> {
        let file = find_single_unit(&self.directory, &format!(".{}", EXPORT_EXTENSION))?;
        read_lines(&file).map_err(|e| BuildError::Unreadable {
            path: file.clone(),
            message: format!("{:#}", e),
        })
    }

    pub(crate) fn perform_build(
        &self,
        env: &BuildEnv<'_>,
        paths: &ArtifactPaths,
        debug: bool,
    ) -> Result<(), BuildError> {
        let llvm = LlvmToolchain::new(env.provisioner.install_path(LLVM_FOR_C)?);
        let exports = self.exports()?;
        let undefined_file = env.undefined.for_mode(debug);

        tracing::info!("Compiling {}", paths.unit.display());
        invoke(env.executor, &llvm.frontend_command(&paths.unit))?;

        tracing::info!("Generating {}", paths.object.display());
        invoke(env.executor, &llvm.codegen_command(&paths.ll, &paths.object))?;

        tracing::info!("Linking {} ({} exports)", paths.wasm.display(), exports.len());
        invoke(
            env.executor,
            &llvm.link_command(&paths.object, &paths.wasm, undefined_file, &exports),
        )?;

        Ok(())
    }
}
