//! Sweep grid configuration

use crate::error::ConfigResult;
use crate::validation::Validatable;
use perfsweep_core::{GridError, SweepGrid};
use serde::{Deserialize, Serialize};

/// The two axes of the parameter sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Replica counts to deploy, strictly ascending
    #[serde(default = "default_cluster_sizes")]
    pub cluster_sizes: Vec<u32>,

    /// Scenario sizes to generate for every cluster size, strictly ascending
    #[serde(default = "default_scenario_sizes")]
    pub scenario_sizes: Vec<u32>,
}

impl GridConfig {
    /// Build the sweep grid described by this configuration
    pub fn to_grid(&self) -> Result<SweepGrid, GridError> {
        SweepGrid::new(self.cluster_sizes.clone(), self.scenario_sizes.clone())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cluster_sizes: default_cluster_sizes(),
            scenario_sizes: default_scenario_sizes(),
        }
    }
}

impl Validatable for GridConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.to_grid()
            .map(|_| ())
            .map_err(|e| self.validation_error(e.to_string()))
    }

    fn domain_name(&self) -> &'static str {
        "grid"
    }
}

fn default_cluster_sizes() -> Vec<u32> {
    vec![3, 6]
}

fn default_scenario_sizes() -> Vec<u32> {
    vec![4, 8, 16, 32]
}
