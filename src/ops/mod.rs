//! High-level operations.
//!
//! This module contains the implementation of arwenc commands.

pub mod arwenc_build;
pub mod arwenc_clean;
pub mod arwenc_install;

pub use arwenc_build::{
    build_project, build_project_with_context, classify_directory, BuildOptions, BuildOutcome,
};
pub use arwenc_clean::clean;
pub use arwenc_install::{install, InstallOptions, InstalledModule};
