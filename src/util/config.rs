//! Configuration file support for arwenc.
//!
//! arwenc reads two configuration files:
//! - Global: `~/.arwenc/config.toml` - User-wide defaults
//! - Project: `<project>/.arwenc/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! tools_dir = "/opt/arwenc/tools"
//!
//! [build]
//! undefined_file = "/opt/arwenc/api.txt"
//!
//! [net]
//! offline = true
//!
//! [modules.llvm-for-c]
//! tag = "v9-19feb"
//! path = "/opt/llvm-9/bin"
//!
//! [modules.rust]
//! system = true
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// arwenc configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory for installed toolchain modules
    pub tools_dir: Option<PathBuf>,

    /// Build settings
    pub build: BuildConfig,

    /// Network settings
    pub net: NetConfig,

    /// Per-module overrides of the built-in toolchain catalogue
    pub modules: BTreeMap<String, ModuleConfig>,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Allowed-undefined symbol list for release links
    pub undefined_file: Option<PathBuf>,

    /// Allowed-undefined symbol list for debug links
    pub undefined_debug_file: Option<PathBuf>,
}

/// Network-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// Never download toolchain modules
    pub offline: Option<bool>,
}

impl NetConfig {
    /// Whether downloads are disabled. Unset means online.
    pub fn is_offline(&self) -> bool {
        self.offline.unwrap_or(false)
    }
}

/// Override for a single toolchain module.
///
/// Every field is optional; unset fields fall back to the built-in catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleConfig {
    /// Release tag; also names the install directory
    pub tag: Option<String>,

    /// Archive URL, `{tag}` and `{platform}` are substituted
    pub url: Option<String>,

    /// Expected SHA256 of the archive
    pub sha256: Option<String>,

    /// Leading directory to strip while extracting
    pub strip_prefix: Option<String>,

    /// Preinstalled directory, used as-is and never downloaded
    pub path: Option<PathBuf>,

    /// Locate the module on PATH instead of downloading it
    pub system: Option<bool>,
}

impl ModuleConfig {
    /// Merge another module config into this one (other takes precedence).
    pub fn merge(&mut self, other: ModuleConfig) {
        if other.tag.is_some() {
            self.tag = other.tag;
        }
        if other.url.is_some() {
            self.url = other.url;
        }
        if other.sha256.is_some() {
            self.sha256 = other.sha256;
        }
        if other.strip_prefix.is_some() {
            self.strip_prefix = other.strip_prefix;
        }
        if other.path.is_some() {
            self.path = other.path;
        }
        if other.system.is_some() {
            self.system = other.system;
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.tools_dir.is_some() {
            self.tools_dir = other.tools_dir;
        }

        if other.build.undefined_file.is_some() {
            self.build.undefined_file = other.build.undefined_file;
        }
        if other.build.undefined_debug_file.is_some() {
            self.build.undefined_debug_file = other.build.undefined_debug_file;
        }

        if other.net.offline.is_some() {
            self.net.offline = other.net.offline;
        }

        for (key, module) in other.modules {
            self.modules.entry(key).or_default().merge(module);
        }
    }

    /// Module override for `key`, if any.
    pub fn module(&self, key: &str) -> Option<&ModuleConfig> {
        self.modules.get(key)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`<project>/.arwenc/config.toml`)
/// 2. Global config (`~/.arwenc/config.toml`)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the project config path (`<project>/.arwenc/config.toml`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".arwenc").join("config.toml")
}
