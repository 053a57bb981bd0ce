//! arwenc - builds smart-contract projects into Arwen VM bytecode
//!
//! This crate provides the core library functionality for arwenc, including
//! source detection, toolchain provisioning, the per-language build pipelines
//! and hex post-processing.

pub mod builder;
pub mod core;
pub mod deps;
pub mod ops;
pub mod util;

/// Test utilities and mocks for arwenc unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides mock implementations for process execution
/// and toolchain provisioning.
#[cfg(test)]
pub mod test_support;

pub use builder::{BuildError, Codebase};
pub use core::{ArtifactPaths, SourceKind};
pub use ops::{build_project, BuildOptions, BuildOutcome};
pub use util::context::GlobalContext;
