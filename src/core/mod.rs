//! Core data structures for arwenc.
//!
//! - Source kinds and directory classification
//! - Artifact path derivation
//! - Systems-language manifest reading

pub mod artifacts;
pub mod manifest;
pub mod source_kind;

pub use artifacts::ArtifactPaths;
pub use manifest::ManifestError;
pub use source_kind::{detect, SourceKind};
