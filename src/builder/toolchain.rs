//! Toolchain command construction.
//!
//! Each build stage is described as a [`CommandSpec`] before anything runs,
//! so the argument lists can be inspected and tested on their own. Running a
//! command goes through [`invoke`], the one place where a failed process turns
//! into a [`BuildError`].

use std::path::{Path, PathBuf};

use crate::builder::error::BuildError;
use crate::util::process::ProcessExecutor;

/// Target triple handed to the C frontend.
pub const CLANG_WASM_TRIPLE: &str = "wasm32-unknown-unknown-wasm";

/// Target triple handed to cargo.
pub const CARGO_WASM_TARGET: &str = "wasm32-unknown-unknown";

/// Binary name cargo is asked to build for Rust contracts.
pub const CARGO_WASM_BIN: &str = "wasm";

/// A command to execute, with program, arguments, and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The program to run (e.g., "clang-9", "cargo")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
    /// Working directory, inherited when unset
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// File name of the program, for messages.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

/// Run one stage, translating any process failure into [`BuildError::Toolchain`].
pub fn invoke(executor: &dyn ProcessExecutor, cmd: &CommandSpec) -> Result<(), BuildError> {
    executor.run(cmd).map_err(|err| {
        tracing::debug!("`{}` failed: {}", cmd.program_name(), err);
        BuildError::Toolchain {
            program: cmd.program_name(),
            output: err.captured_output(),
        }
    })
}

/// The clang/llc/wasm-ld triple shipped in the `llvm-for-c` module.
#[derive(Debug, Clone)]
pub struct LlvmToolchain {
    root: PathBuf,
}

impl LlvmToolchain {
    /// Toolchain whose binaries live directly in `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LlvmToolchain { root: root.into() }
    }

    pub fn clang(&self) -> PathBuf {
        self.root.join("clang-9")
    }

    pub fn llc(&self) -> PathBuf {
        self.root.join("llc")
    }

    pub fn wasm_ld(&self) -> PathBuf {
        self.root.join("wasm-ld")
    }

    /// `clang-9 -cc1` emitting LLVM IR for the WASM triple.
    ///
    /// The frontend names its output after the input, so the command runs
    /// inside the unit's directory to make the IR land next to it.
    pub fn frontend_command(&self, unit: &Path) -> CommandSpec {
        let mut cmd = CommandSpec::new(self.clang())
            .arg("-cc1")
            .arg("-Ofast")
            .arg("-emit-llvm")
            .arg(format!("-triple={}", CLANG_WASM_TRIPLE))
            .arg(unit.display().to_string());

        if let Some(dir) = unit.parent() {
            cmd = cmd.cwd(dir);
        }
        cmd
    }

    /// `llc` lowering the IR to a WASM object file.
    pub fn codegen_command(&self, ll: &Path, object: &Path) -> CommandSpec {
        CommandSpec::new(self.llc())
            .arg("-O3")
            .arg("-filetype=obj")
            .arg(ll.display().to_string())
            .arg("-o")
            .arg(object.display().to_string())
    }

    /// `wasm-ld` producing the final module with one `-export=` per symbol.
    pub fn link_command(
        &self,
        object: &Path,
        wasm: &Path,
        undefined_file: &Path,
        exports: &[String],
    ) -> CommandSpec {
        CommandSpec::new(self.wasm_ld())
            .arg("--verbose")
            .arg("--no-entry")
            .arg(object.display().to_string())
            .arg("-o")
            .arg(wasm.display().to_string())
            .arg("--strip-all")
            .arg(format!("-allow-undefined-file={}", undefined_file.display()))
            .args(exports.iter().map(|symbol| format!("-export={}", symbol)))
    }
}

/// Cargo from the `rust` module.
#[derive(Debug, Clone)]
pub struct CargoToolchain {
    cargo: PathBuf,
}

impl CargoToolchain {
    /// Cargo installed under `<root>/bin`.
    pub fn new(root: &Path) -> Self {
        CargoToolchain {
            cargo: root.join("bin").join(cargo_exe()),
        }
    }

    pub fn cargo(&self) -> &Path {
        &self.cargo
    }

    /// `cargo build --bin wasm --target=wasm32-unknown-unknown --target-dir <project>/target [--release]`.
    ///
    /// The target directory is pinned so an inherited `CARGO_TARGET_DIR` or an
    /// enclosing workspace cannot move the output away from [`Self::output_path`].
    pub fn build_command(&self, project: &Path, debug: bool) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.cargo)
            .arg("build")
            .arg("--bin")
            .arg(CARGO_WASM_BIN)
            .arg(format!("--target={}", CARGO_WASM_TARGET))
            .arg("--target-dir")
            .arg(target_dir(project).display().to_string())
            .cwd(project);

        if !debug {
            cmd = cmd.arg("--release");
        }
        cmd
    }

    /// Where cargo leaves the binary for a given profile.
    pub fn output_path(project: &Path, debug: bool) -> PathBuf {
        let profile = if debug { "debug" } else { "release" };
        target_dir(project)
            .join(CARGO_WASM_TARGET)
            .join(profile)
            .join(format!("{}.wasm", CARGO_WASM_BIN))
    }
}

fn target_dir(project: &Path) -> PathBuf {
    project.join("target")
}

fn cargo_exe() -> &'static str {
    if cfg!(windows) {
        "cargo.exe"
    } else {
        "cargo"
    }
}
