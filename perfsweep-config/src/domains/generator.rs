//! External config generator invocation

use crate::error::ConfigResult;
use crate::validation::{validate_placeholders, validate_required_string, Validatable};
use perfsweep_core::placeholders;
use serde::{Deserialize, Serialize};

/// Command that materialises per-combination component configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Program to run
    #[serde(default = "default_program")]
    pub program: String,

    /// Argument template; see `perfsweep_core::placeholders`
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Named generation strategy passed through `{strategy}`
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            strategy: default_strategy(),
        }
    }
}

impl Validatable for GeneratorConfig {
    fn validate(&self) -> ConfigResult<()> {
        let domain = self.domain_name();
        validate_required_string(&self.program, "program", domain)?;
        validate_required_string(&self.strategy, "strategy", domain)?;
        validate_placeholders(
            &self.args.join(" "),
            &[
                placeholders::CLUSTER_SIZE,
                placeholders::SCENARIO_SIZE,
                placeholders::CONFIG_FOLDER,
            ],
            "args",
            domain,
        )
    }

    fn domain_name(&self) -> &'static str {
        "generator"
    }
}

fn default_program() -> String {
    "cargo".to_string()
}

fn default_args() -> Vec<String> {
    [
        "run",
        "--bin",
        "mbei-testdata-config",
        "--",
        "-n={cluster_size}",
        "-p={config_folder}",
        "-o",
        "{strategy}",
        "--size={scenario_size}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_strategy() -> String {
    "complex-factory".to_string()
}
