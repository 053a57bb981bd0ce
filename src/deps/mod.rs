//! Toolchain module provisioning.
//!
//! Pipelines name the toolchains they need by module key (`llvm-for-c`,
//! `soll`, `llvm-for-soll`, `rust`) and go through [`DependencyProvisioner`]
//! to make sure each one is present and to find where it lives.

pub mod archive;
pub mod catalogue;
pub mod local;

use std::path::PathBuf;

use crate::builder::BuildError;

pub use catalogue::ModuleSpec;
pub use local::LocalProvisioner;

/// Installs and locates toolchain modules by key.
pub trait DependencyProvisioner {
    /// Make sure `key` is installed. Idempotent; cheap when already present.
    fn ensure_installed(&self, key: &str) -> Result<(), BuildError>;

    /// Directory the module `key` is (or would be) installed in.
    fn install_path(&self, key: &str) -> Result<PathBuf, BuildError>;
}
