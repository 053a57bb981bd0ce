//! Test utilities and mocks for arwenc unit tests.
//!
//! This module provides mock implementations of the two external seams of a
//! build: toolchain provisioning and process execution.
//!
//! # Example
//!
//! ```rust,ignore
//! use arwenc::test_support::{MockExecutor, MockProcessOutput, MockProvisioner};
//!
//! #[test]
//! fn test_example() {
//!     let mut exec = MockExecutor::new();
//!     exec.expect_contains("llc", MockProcessOutput::failure(1, "error: bad syntax"));
//!
//!     let deps = MockProvisioner::new("/tools");
//!     // Hand both to build_project...
//! }
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{bail, Result};

use crate::builder::toolchain::CommandSpec;
use crate::builder::BuildError;
use crate::deps::DependencyProvisioner;
use crate::util::process::{ProcessError, ProcessExecutor};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Mock process output for testing.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Check if the process succeeded.
    pub fn success_status(&self) -> bool {
        self.status == 0
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Match if the program's file name equals the string.
    Program(String),
    /// Match if the full command line contains the substring.
    Contains(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &CommandSpec) -> bool {
        match self {
            CommandPattern::Program(name) => cmd.program_name() == *name,
            CommandPattern::Contains(s) => command_line(cmd).contains(s.as_str()),
        }
    }
}

/// A scripted response to a matching command.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    /// Pattern to match.
    pub pattern: CommandPattern,
    /// Output to return.
    pub output: MockProcessOutput,
    /// Files written when the command succeeds, simulating tool output.
    pub creates: Vec<(PathBuf, Vec<u8>)>,
    /// Number of times this expectation has been used.
    pub used: usize,
}

impl CommandExpectation {
    /// Create a new expectation.
    pub fn new(pattern: CommandPattern, output: MockProcessOutput) -> Self {
        CommandExpectation {
            pattern,
            output,
            creates: Vec::new(),
            used: 0,
        }
    }

    /// Write `content` to `path` whenever this expectation succeeds.
    pub fn creates(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.creates.push((path.into(), content.into()));
        self
    }
}

/// Mock process executor for testing command execution.
///
/// Records every command it is asked to run. Commands that match no
/// expectation succeed with empty output.
#[derive(Debug, Default)]
pub struct MockExecutor {
    expectations: Mutex<Vec<CommandExpectation>>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl MockExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        MockExecutor::default()
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&mut self, substring: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Contains(substring.to_string()),
            output,
        ))
    }

    /// Add an expectation for the program with file name `program`.
    pub fn expect_program(&mut self, program: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Program(program.to_string()),
            output,
        ))
    }

    /// Make the program named `program` succeed and write `path`.
    pub fn creates(
        &mut self,
        program: &str,
        path: impl Into<PathBuf>,
        content: impl Into<Vec<u8>>,
    ) -> &mut Self {
        self.expect_pattern(
            CommandExpectation::new(
                CommandPattern::Program(program.to_string()),
                MockProcessOutput::default(),
            )
            .creates(path, content),
        )
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&mut self, expectation: CommandExpectation) -> &mut Self {
        self.expectations
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .push(expectation);
        self
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Program file names of all recorded calls, in order.
    pub fn programs(&self) -> Vec<String> {
        self.calls().iter().map(CommandSpec::program_name).collect()
    }

    /// Verify that every expectation was used at least once.
    pub fn verify(&self) -> Result<()> {
        let expectations = self.expectations.lock().unwrap_or_else(|e| e.into_inner());
        for (i, exp) in expectations.iter().enumerate() {
            if exp.used == 0 {
                bail!("expectation {} ({:?}) was never used", i, exp.pattern);
            }
        }
        Ok(())
    }
}

impl ProcessExecutor for MockExecutor {
    fn run(&self, cmd: &CommandSpec) -> Result<(), ProcessError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(cmd.clone());

        let mut expectations = self.expectations.lock().unwrap_or_else(|e| e.into_inner());
        let Some(exp) = expectations.iter_mut().find(|e| e.pattern.matches(cmd)) else {
            return Ok(());
        };
        exp.used += 1;

        if !exp.output.success_status() {
            return Err(ProcessError::Exit {
                command: command_line(cmd),
                code: Some(exp.output.status),
                output: format!("{}{}", exp.output.stdout, exp.output.stderr),
            });
        }

        for (path, content) in &exp.creates {
            std::fs::write(path, content).map_err(|source| ProcessError::Spawn {
                program: cmd.program_name(),
                source,
            })?;
        }
        Ok(())
    }
}

fn command_line(cmd: &CommandSpec) -> String {
    let mut parts = vec![cmd.program.display().to_string()];
    parts.extend(cmd.args.iter().cloned());
    parts.join(" ")
}

/// Mock dependency provisioner.
///
/// Every known module resolves to `<root>/<key>`; `ensure_installed` only
/// records the call.
#[derive(Debug)]
pub struct MockProvisioner {
    root: PathBuf,
    overrides: HashMap<String, PathBuf>,
    installed: Mutex<Vec<String>>,
}

impl MockProvisioner {
    /// Create a provisioner resolving modules under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        MockProvisioner {
            root: root.into(),
            overrides: HashMap::new(),
            installed: Mutex::new(Vec::new()),
        }
    }

    /// Resolve `key` to an explicit directory.
    pub fn with_path(mut self, key: &str, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(key.to_string(), path.into());
        self
    }

    /// Keys passed to `ensure_installed`, in call order.
    pub fn installed(&self) -> Vec<String> {
        self.installed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl DependencyProvisioner for MockProvisioner {
    fn ensure_installed(&self, key: &str) -> Result<(), BuildError> {
        self.install_path(key)?;
        self.installed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(key.to_string());
        Ok(())
    }

    fn install_path(&self, key: &str) -> Result<PathBuf, BuildError> {
        if let Some(path) = self.overrides.get(key) {
            return Ok(path.clone());
        }
        if !crate::deps::catalogue::is_known(key) {
            return Err(BuildError::UnknownModule {
                key: key.to_string(),
            });
        }
        Ok(self.root.join(key))
    }
}

/// Assert that `args` contains `needle` at least once.
pub fn assert_has_arg(args: &[String], needle: &str) {
    assert!(
        args.iter().any(|a| a == needle),
        "expected argument `{}` in {:?}",
        needle,
        args
    );
}

/// Position of the first argument ending with `suffix`.
pub fn arg_position(args: &[String], suffix: &str) -> Option<usize> {
    args.iter().position(|a| a.ends_with(suffix))
}
