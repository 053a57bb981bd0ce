//! Contract build pipelines.
//!
//! A [`Codebase`] pairs a project directory with the stage sequence for its
//! source kind. External tools run through [`toolchain`] and finished WASM
//! binaries are hex-encoded by [`postprocess`].

pub mod codebase;
pub mod contract;
pub mod error;
pub mod native;
pub mod postprocess;
pub mod systems;
pub mod toolchain;
pub mod undefined;

pub use codebase::{BuildEnv, Codebase};
pub use error::BuildError;
pub use toolchain::{CargoToolchain, CommandSpec, LlvmToolchain};
pub use undefined::UndefinedFiles;
