//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use thiserror::Error;

use crate::builder::toolchain::CommandSpec;

/// Failure of an external process.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with exit code {code:?}")]
    Exit {
        command: String,
        code: Option<i32>,
        /// Captured stdout followed by stderr.
        output: String,
    },
}

impl ProcessError {
    /// The diagnostic text captured from the process.
    ///
    /// For a process that never started this is the spawn error itself.
    pub fn captured_output(&self) -> String {
        match self {
            ProcessError::Spawn { .. } => self.to_string(),
            ProcessError::Exit { output, .. } => output.clone(),
        }
    }
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command and wait for completion.
    ///
    /// Blocks until the process exits; there is no timeout.
    pub fn exec(&self) -> Result<Output, ProcessError> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        cmd.output().map_err(|source| ProcessError::Spawn {
            program: self.program.display().to_string(),
            source,
        })
    }

    /// Execute and require a zero exit status.
    pub fn exec_and_check(&self) -> Result<Output, ProcessError> {
        let output = self.exec()?;
        if !output.status.success() {
            return Err(ProcessError::Exit {
                command: self.display_command(),
                code: output.status.code(),
                output: combined_output(&output),
            });
        }
        Ok(output)
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

impl From<&CommandSpec> for ProcessBuilder {
    fn from(spec: &CommandSpec) -> Self {
        let mut pb = ProcessBuilder::new(&spec.program).args(&spec.args);
        if let Some(ref cwd) = spec.cwd {
            pb = pb.cwd(cwd);
        }
        pb
    }
}

/// Stdout followed by stderr, lossily decoded.
fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}

/// Runs toolchain commands to completion.
///
/// The build pipelines only ever talk to this trait, so tests can record
/// argument lists and script failures without spawning anything.
pub trait ProcessExecutor {
    /// Run `cmd`, failing on a non-zero exit status.
    fn run(&self, cmd: &CommandSpec) -> Result<(), ProcessError>;
}

/// Executor that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl ProcessExecutor for SystemExecutor {
    fn run(&self, cmd: &CommandSpec) -> Result<(), ProcessError> {
        let pb = ProcessBuilder::from(cmd);
        tracing::debug!("running `{}`", pb.display_command());

        let output = pb.exec_and_check()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!("{}", stdout.trim_end());
        }
        Ok(())
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
