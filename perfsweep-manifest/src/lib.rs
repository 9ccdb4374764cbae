//! Manifest store for perfsweep
//!
//! Templates are loaded once at startup into [`ManifestDocuments`] value
//! objects. Each iteration derives a mutated copy through the pure
//! functions in [`mutate`] and persists it before the cluster client
//! applies it. No schema validation happens here: a malformed manifest
//! surfaces when the cluster rejects it.

pub mod command;
pub mod documents;
pub mod error;
pub mod mutate;

pub use command::render_job_command;
pub use documents::{ManifestDocuments, ManifestSet};
pub use error::{ManifestError, ManifestResult};
pub use mutate::{replica_count, with_job_command, with_replica_count};
