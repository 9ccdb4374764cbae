//! Manifest error types

use std::path::PathBuf;
use thiserror::Error;

pub type ManifestResult<T> = Result<T, ManifestError>;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to access manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Manifest {path} contains no documents")]
    Empty { path: PathBuf },

    #[error("No {kinds} document found in manifest")]
    MissingDocument { kinds: String },

    #[error("{kind} manifest has no field {field}")]
    MissingField { kind: String, field: &'static str },
}
