//! Domain-driven configuration management for perfsweep
//!
//! Configuration is split by concern (grid, paths, cluster, timing,
//! generator, job, logging). Every domain has defaults matching the
//! reference benchmark deployment, validates itself, and can be
//! overridden through `PERFSWEEP_*` environment variables.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    cluster::ClusterConfig,
    generator::GeneratorConfig,
    grid::GridConfig,
    job::JobConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    paths::{PathsConfig, ResolvedPaths},
    timing::TimingConfig,
    SweepConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
