//! Rust contracts built with cargo.
//!
//! The crate must declare a `wasm` binary. Cargo builds it for
//! `wasm32-unknown-unknown` and the result is copied next to the manifest
//! under the package name, so it gets hex-encoded like any other unit.

use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::codebase::BuildEnv;
use crate::builder::toolchain::{invoke, CargoToolchain};
use crate::builder::BuildError;
use crate::core::artifacts::ArtifactPaths;
use crate::core::manifest::package_name;
use crate::core::source_kind::CARGO_MANIFEST;

/// Toolchain module providing cargo.
pub const RUST: &str = "rust";

/// Suffix of the placeholder main unit derived from the package name.
pub const RUST_UNIT_EXTENSION: &str = "rust";

#[derive(Debug, Clone)]
pub struct SystemsCodebase {
    directory: PathBuf,
}

impl SystemsCodebase {
    pub fn new(directory: PathBuf) -> Self {
        SystemsCodebase { directory }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.directory.join(CARGO_MANIFEST)
    }

    /// `<directory>/<package.name>.rust`. The file itself never exists; it
    /// only anchors the artifact names.
    pub fn main_unit(&self) -> Result<PathBuf, BuildError> {
        let name = package_name(&self.manifest_path())?;
        Ok(self
            .directory
            .join(format!("{}.{}", name, RUST_UNIT_EXTENSION)))
    }

    pub(crate) fn perform_build(
        &self,
        env: &BuildEnv<'_>,
        paths: &ArtifactPaths,
        debug: bool,
    ) -> Result<(), BuildError> {
        let cargo = CargoToolchain::new(&env.provisioner.install_path(RUST)?);

        let profile = if debug { "debug" } else { "release" };
        tracing::info!("Running cargo ({})", profile);
        invoke(env.executor, &cargo.build_command(&self.directory, debug))?;

        let produced = CargoToolchain::output_path(&self.directory, debug);
        if !produced.is_file() {
            return Err(BuildError::MissingWasm { path: produced });
        }
        fs::copy(&produced, &paths.wasm).map_err(|e| BuildError::io(&paths.wasm, e))?;
        tracing::debug!("copied {} to {}", produced.display(), paths.wasm.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::codebase::Codebase;
    use crate::builder::undefined::UndefinedFiles;
    use crate::core::SourceKind;
    use crate::test_support::{
        assert_has_arg, rust_project, MockExecutor, MockProcessOutput, MockProvisioner,
        WASM_BYTES, WASM_HEX,
    };
    use tempfile::TempDir;

    fn undefined() -> UndefinedFiles {
        UndefinedFiles {
            release: PathBuf::from("/data/api.txt"),
            debug: PathBuf::from("/data/api_debug.txt"),
        }
    }

    #[test]
    fn test_main_unit_from_package_name() {
        let tmp = TempDir::new().unwrap();
        rust_project(tmp.path(), "adder");

        let codebase = SystemsCodebase::new(tmp.path().to_path_buf());
        assert_eq!(codebase.main_unit().unwrap(), tmp.path().join("adder.rust"));
    }

    #[test]
    fn test_release_build_copies_cargo_output() {
        let tmp = TempDir::new().unwrap();
        rust_project(tmp.path(), "adder");
        let produced = CargoToolchain::output_path(tmp.path(), false);
        fs::create_dir_all(produced.parent().unwrap()).unwrap();

        let mut exec = MockExecutor::new();
        exec.creates("cargo", &produced, WASM_BYTES);
        let deps = MockProvisioner::new("/tools").with_path("rust", "/opt/rust");
        let undefined = undefined();
        let env = BuildEnv {
            provisioner: &deps,
            executor: &exec,
            undefined: &undefined,
        };

        let paths = Codebase::new(SourceKind::SystemsLanguage, tmp.path())
            .build(&env, false)
            .unwrap();

        assert_eq!(deps.installed(), vec!["rust"]);
        exec.verify().unwrap();
        let calls = exec.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].program,
            CargoToolchain::new(Path::new("/opt/rust")).cargo()
        );
        assert_has_arg(&calls[0].args, "--release");
        assert_has_arg(&calls[0].args, &tmp.path().join("target").display().to_string());
        assert_eq!(calls[0].cwd.as_deref(), Some(tmp.path()));

        assert_eq!(paths.wasm, tmp.path().join("adder.wasm"));
        assert_eq!(fs::read(&paths.wasm).unwrap(), WASM_BYTES);
        assert_eq!(fs::read_to_string(&paths.hex).unwrap(), WASM_HEX);
    }

    #[test]
    fn test_debug_build_omits_release_flag() {
        let tmp = TempDir::new().unwrap();
        rust_project(tmp.path(), "adder");
        let produced = CargoToolchain::output_path(tmp.path(), true);
        fs::create_dir_all(produced.parent().unwrap()).unwrap();

        let mut exec = MockExecutor::new();
        exec.creates("cargo", &produced, WASM_BYTES);
        let deps = MockProvisioner::new("/tools");
        let undefined = undefined();
        let env = BuildEnv {
            provisioner: &deps,
            executor: &exec,
            undefined: &undefined,
        };

        Codebase::new(SourceKind::SystemsLanguage, tmp.path())
            .build(&env, true)
            .unwrap();

        let calls = exec.calls();
        assert!(!calls[0].args.iter().any(|a| a == "--release"));
        assert!(tmp.path().join("adder.hex.arwen").exists());
    }

    #[test]
    fn test_cargo_failure_carries_output() {
        let tmp = TempDir::new().unwrap();
        rust_project(tmp.path(), "adder");

        let mut exec = MockExecutor::new();
        exec.expect_program(
            "cargo",
            MockProcessOutput::failure(101, "error[E0425]: cannot find value `x`"),
        );
        let deps = MockProvisioner::new("/tools");
        let undefined = undefined();
        let env = BuildEnv {
            provisioner: &deps,
            executor: &exec,
            undefined: &undefined,
        };

        let err = Codebase::new(SourceKind::SystemsLanguage, tmp.path())
            .build(&env, false)
            .unwrap_err();
        assert!(err.to_string().contains("error[E0425]"));
        assert!(!tmp.path().join("adder.wasm").exists());
    }

    #[test]
    fn test_missing_cargo_output() {
        let tmp = TempDir::new().unwrap();
        rust_project(tmp.path(), "adder");

        let exec = MockExecutor::new();
        let deps = MockProvisioner::new("/tools");
        let undefined = undefined();
        let env = BuildEnv {
            provisioner: &deps,
            executor: &exec,
            undefined: &undefined,
        };

        let err = Codebase::new(SourceKind::SystemsLanguage, tmp.path())
            .build(&env, false)
            .unwrap_err();
        match err {
            BuildError::MissingWasm { path } => {
                assert!(path.ends_with("target/wasm32-unknown-unknown/release/wasm.wasm"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_manifest_without_package() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Cargo.toml"), "[workspace]\n").unwrap();

        let err = SystemsCodebase::new(tmp.path().to_path_buf())
            .main_unit()
            .unwrap_err();
        assert!(matches!(err, BuildError::Manifest(_)));
    }
}
