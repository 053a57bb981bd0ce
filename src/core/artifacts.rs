//! Output paths derived from a main unit.
//!
//! Every artifact sits next to the main unit and shares its base name; only
//! the final suffix changes. Nothing here touches the filesystem.

use std::path::{Path, PathBuf};

/// Suffix of the LLVM IR file.
pub const LL_EXTENSION: &str = "ll";
/// Suffix of the object file.
pub const OBJECT_EXTENSION: &str = "o";
/// Suffix of the export list sidecar.
pub const EXPORT_EXTENSION: &str = "export";
/// Suffix of the WASM binary.
pub const WASM_EXTENSION: &str = "wasm";
/// Suffix of the hex encoding.
pub const HEX_EXTENSION: &str = "hex";
/// Suffix of the tagged hex encoding.
pub const HEX_ARWEN_EXTENSION: &str = "hex.arwen";

/// The full set of paths a build may read or write for one main unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub unit: PathBuf,
    pub ll: PathBuf,
    pub object: PathBuf,
    pub export: PathBuf,
    pub wasm: PathBuf,
    pub hex: PathBuf,
    pub hex_arwen: PathBuf,
}

impl ArtifactPaths {
    /// Derive all artifact paths from the main unit by suffix substitution.
    pub fn for_unit(unit: &Path) -> Self {
        ArtifactPaths {
            unit: unit.to_path_buf(),
            ll: unit.with_extension(LL_EXTENSION),
            object: unit.with_extension(OBJECT_EXTENSION),
            export: unit.with_extension(EXPORT_EXTENSION),
            wasm: unit.with_extension(WASM_EXTENSION),
            hex: unit.with_extension(HEX_EXTENSION),
            hex_arwen: unit.with_extension(HEX_ARWEN_EXTENSION),
        }
    }

    /// Files a build writes, in the order they are produced.
    ///
    /// The export list and the unit itself are inputs and never listed.
    pub fn outputs(&self) -> [&Path; 5] {
        [
            &self.ll,
            &self.object,
            &self.wasm,
            &self.hex,
            &self.hex_arwen,
        ]
    }
}
