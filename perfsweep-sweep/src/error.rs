//! Sweep error types

use crate::generator::GeneratorError;
use perfsweep_cluster::ClusterError;
use perfsweep_manifest::ManifestError;
use std::path::PathBuf;
use thiserror::Error;

/// Anything that can end a sweep
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Cluster operation failed: {0}")]
    Cluster(#[from] ClusterError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Config generation failed: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Failed to write artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SweepError {
    /// Process exit code for this failure.
    ///
    /// A failed external command's own exit status is passed through;
    /// everything else maps to 1.
    pub fn exit_code(&self) -> i32 {
        let status = match self {
            SweepError::Cluster(err) => err.exit_status(),
            SweepError::Generator(err) => err.exit_status(),
            _ => None,
        };
        status.filter(|code| *code != 0).unwrap_or(1)
    }

    /// Whether the failure was a cluster object that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, SweepError::Cluster(err) if err.is_not_found())
    }
}
