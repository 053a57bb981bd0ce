//! Built-in toolchain module catalogue.
//!
//! Each known key has default download coordinates which the `[modules.<key>]`
//! tables of the configuration can override field by field.

use std::path::PathBuf;

use crate::builder::BuildError;
use crate::util::config::{Config, ModuleConfig};

/// Module keys arwenc knows how to provision.
pub const KNOWN_MODULES: [&str; 4] = ["llvm-for-c", "soll", "llvm-for-soll", "rust"];

const VENDOR_BASE: &str = "https://ide.elrond.com";

/// Whether `key` names a module in the catalogue.
pub fn is_known(key: &str) -> bool {
    KNOWN_MODULES.contains(&key)
}

/// Fully resolved description of one toolchain module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpec {
    pub key: String,
    pub tag: String,
    pub url: Option<String>,
    pub sha256: Option<String>,
    pub strip_prefix: Option<String>,
    pub path: Option<PathBuf>,
    pub system: bool,
    /// Binary, relative to the install directory, whose presence proves the install
    pub probe: &'static str,
}

impl ModuleSpec {
    /// Resolve `key` from the built-in defaults and the configuration.
    pub fn resolve(key: &str, config: &Config) -> Result<Self, BuildError> {
        let (mut module, probe) = builtin(key).ok_or_else(|| BuildError::UnknownModule {
            key: key.to_string(),
        })?;

        if let Some(overrides) = config.module(key) {
            module.merge(overrides.clone());
        }

        Ok(ModuleSpec {
            key: key.to_string(),
            tag: module.tag.unwrap_or_else(|| "latest".to_string()),
            url: module.url,
            sha256: module.sha256,
            strip_prefix: module.strip_prefix,
            path: module.path,
            system: module.system.unwrap_or(false),
            probe,
        })
    }

    /// Download URL with `{tag}` and `{platform}` substituted.
    pub fn archive_url(&self) -> Option<String> {
        self.url.as_ref().map(|url| {
            url.replace("{tag}", &self.tag)
                .replace("{platform}", platform())
        })
    }

    /// File name of the probe binary, used when searching PATH.
    pub fn probe_name(&self) -> &'static str {
        self.probe.rsplit('/').next().unwrap_or(self.probe)
    }

    /// Number of directories between the install root and the probe binary.
    pub fn probe_depth(&self) -> usize {
        self.probe.matches('/').count()
    }
}

fn builtin(key: &str) -> Option<(ModuleConfig, &'static str)> {
    let vendor = |tag: &str, dir: &str| ModuleConfig {
        tag: Some(tag.to_string()),
        url: Some(format!("{}/{}/{{tag}}/{{platform}}-amd64.tar.gz", VENDOR_BASE, dir)),
        ..ModuleConfig::default()
    };

    match key {
        "llvm-for-c" => Some((vendor("v9-19feb", "vendor-llvm"), "clang-9")),
        "soll" => Some((vendor("v0.0.5", "vendor-soll"), "soll")),
        "llvm-for-soll" => Some((vendor("v10", "vendor-llvm-for-soll"), "llc")),
        "rust" => Some((
            ModuleConfig {
                tag: Some("stable".to_string()),
                system: Some(true),
                ..ModuleConfig::default()
            },
            "bin/cargo",
        )),
        _ => None,
    }
}

/// Platform segment of the vendor download URLs.
pub fn platform() -> &'static str {
    match std::env::consts::OS {
        "macos" => "osx",
        "windows" => "windows",
        _ => "linux",
    }
}
