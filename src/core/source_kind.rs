//! Source kinds and project classification.
//!
//! A project directory is classified by the files sitting directly inside
//! it. The markers are checked in a fixed order and the first match wins:
//!
//! 1. any `*.c` file → [`SourceKind::NativeCompiled`]
//! 2. any `*.sol` file → [`SourceKind::ContractLanguage`]
//! 3. a `Cargo.toml` manifest → [`SourceKind::SystemsLanguage`]
//!
//! A directory that carries several markers (say a `.c` file next to a
//! `Cargo.toml`) therefore resolves to the earliest kind in that list.

use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of the systems-language project manifest.
pub const CARGO_MANIFEST: &str = "Cargo.toml";

/// The toolchain family a project directory needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// C sources compiled through clang/llc/wasm-ld
    #[serde(rename = "c")]
    NativeCompiled,
    /// Solidity sources compiled through soll
    #[serde(rename = "sol")]
    ContractLanguage,
    /// Rust crates compiled through cargo
    #[serde(rename = "rust")]
    SystemsLanguage,
}

impl SourceKind {
    /// All kinds, in detection priority order.
    pub const ALL: [SourceKind; 3] = [
        SourceKind::NativeCompiled,
        SourceKind::ContractLanguage,
        SourceKind::SystemsLanguage,
    ];

    /// Short name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::NativeCompiled => "c",
            SourceKind::ContractLanguage => "sol",
            SourceKind::SystemsLanguage => "rust",
        }
    }

    /// File-name suffix whose presence marks a directory as this kind.
    pub fn marker(&self) -> &'static str {
        match self {
            SourceKind::NativeCompiled => ".c",
            SourceKind::ContractLanguage => ".sol",
            SourceKind::SystemsLanguage => CARGO_MANIFEST,
        }
    }

    /// Toolchain modules that must be installed before building.
    pub fn dependencies(&self) -> &'static [&'static str] {
        match self {
            SourceKind::NativeCompiled => &["llvm-for-c"],
            SourceKind::ContractLanguage => &["soll", "llvm-for-soll"],
            SourceKind::SystemsLanguage => &["rust"],
        }
    }

    /// Whether any of `file_names` carries this kind's marker.
    ///
    /// Matching is a case-insensitive suffix test.
    pub fn matches<'a>(&self, file_names: impl IntoIterator<Item = &'a str>) -> bool {
        let marker = self.marker().to_lowercase();
        file_names
            .into_iter()
            .any(|name| name.to_lowercase().ends_with(&marker))
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" => Ok(SourceKind::NativeCompiled),
            "sol" | "solidity" => Ok(SourceKind::ContractLanguage),
            "rust" | "rs" => Ok(SourceKind::SystemsLanguage),
            _ => Err(format!(
                "invalid source kind '{}'; expected 'c', 'sol', or 'rust'",
                s
            )),
        }
    }
}

/// Classify a list of file names. First matching kind wins.
pub fn classify<'a, I>(file_names: I) -> Option<SourceKind>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    let names = file_names.into_iter();
    SourceKind::ALL
        .into_iter()
        .find(|kind| kind.matches(names.clone()))
}

/// Classify a project directory by the files directly inside it.
///
/// Returns `Ok(None)` when no marker is present.
pub fn detect(directory: &Path) -> io::Result<Option<SourceKind>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        // Follows symlinks, so a linked source file still counts.
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    let kind = classify(names.iter().map(String::as_str));
    tracing::debug!(
        "classified {} as {:?} ({} files)",
        directory.display(),
        kind,
        names.len()
    );
    Ok(kind)
}
