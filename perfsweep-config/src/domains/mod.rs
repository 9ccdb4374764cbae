//! Domain-specific configuration modules

pub mod cluster;
pub mod generator;
pub mod grid;
pub mod job;
pub mod logging;
pub mod paths;
pub mod timing;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main perfsweep configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SweepConfig {
    /// Cluster-size x scenario-size grid
    #[serde(default)]
    pub grid: grid::GridConfig,

    /// Manifest, config and output locations
    #[serde(default)]
    pub paths: paths::PathsConfig,

    /// kubectl and resource identities
    #[serde(default)]
    pub cluster: cluster::ClusterConfig,

    /// Settle delays between cluster operations
    #[serde(default)]
    pub timing: timing::TimingConfig,

    /// External config generator
    #[serde(default)]
    pub generator: generator::GeneratorConfig,

    /// Load-generating job command
    #[serde(default)]
    pub job: job::JobConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl SweepConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.grid.validate()?;
        self.paths.validate()?;
        self.cluster.validate()?;
        self.timing.validate()?;
        self.generator.validate()?;
        self.job.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Non-fatal findings to report once logging is up
    pub fn warnings(&self) -> Vec<&'static str> {
        self.timing.warnings()
    }

    /// Render the configuration as YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
