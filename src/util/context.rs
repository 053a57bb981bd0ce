//! Global context for arwenc operations.
//!
//! Provides centralized access to configuration and the per-user directories
//! that hold installed toolchain modules and the materialised symbol lists.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::util::config::{load_config, project_config_path, Config};

/// Environment variable overriding the arwenc home directory.
pub const HOME_ENV: &str = "ARWENC_HOME";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global arwenc data (~/.arwenc/)
    home: PathBuf,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = match std::env::var_os(HOME_ENV) {
            Some(home) => PathBuf::from(home),
            None => BaseDirs::new()
                .map(|b| b.home_dir().join(".arwenc"))
                .unwrap_or_else(|| PathBuf::from(".arwenc")),
        };

        Ok(GlobalContext {
            cwd,
            home,
            verbose: false,
        })
    }

    /// Create a GlobalContext rooted at an explicit home directory.
    pub fn with_home(cwd: PathBuf, home: PathBuf) -> Self {
        GlobalContext {
            cwd,
            home,
            verbose: false,
        }
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the arwenc home directory (~/.arwenc/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Resolve a user-supplied project path against the working directory.
    pub fn project_dir(&self, path: Option<&Path>) -> PathBuf {
        match path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => self.cwd.join(p),
            None => self.cwd.clone(),
        }
    }

    /// Default root for installed toolchain modules.
    pub fn tools_dir(&self) -> PathBuf {
        self.home.join("tools")
    }

    /// Directory holding the materialised undefined-symbol lists.
    pub fn data_dir(&self) -> PathBuf {
        self.home.join("data")
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Load the global config merged with the project config of `project`.
    pub fn load_config(&self, project: &Path) -> Config {
        load_config(&self.config_path(), &project_config_path(project))
    }
}
