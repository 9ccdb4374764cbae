//! Core domain types for perfsweep
//!
//! This crate defines the parameter grid a sweep walks over, the
//! per-iteration run context, and the naming scheme for the artifacts
//! each iteration leaves behind. It has minimal dependencies so every
//! other crate in the workspace can share its vocabulary.

pub mod error;
pub mod placeholders;
pub mod types;

// Re-export commonly used types at the crate root
pub use error::GridError;
pub use types::{artifact_file_name, ArtifactKind, RunContext, SweepGrid, SweepParameter};
