//! External config generator

use async_trait::async_trait;
use perfsweep_config::GeneratorConfig;
use perfsweep_core::{placeholders, SweepParameter};
use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::info;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("{program} exited with status {}", display_status(.status))]
    Failed { program: String, status: Option<i32> },

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

fn display_status(status: &Option<i32>) -> String {
    status.map_or_else(|| "unknown".to_string(), |code| code.to_string())
}

impl GeneratorError {
    pub fn exit_status(&self) -> Option<i32> {
        match self {
            GeneratorError::Failed { status, .. } => *status,
            GeneratorError::Spawn { .. } => None,
        }
    }
}

/// Materialises component configuration for one grid coordinate
#[async_trait]
pub trait ConfigGenerator: Send + Sync {
    /// Populate `config_folder` with configuration for `parameter`
    async fn generate(
        &self,
        parameter: SweepParameter,
        config_folder: &Path,
    ) -> Result<(), GeneratorError>;
}

/// Runs the configured generator program as a child process with inherited stdio
#[derive(Debug, Clone)]
pub struct ProcessConfigGenerator {
    program: String,
    args: Vec<String>,
    strategy: String,
}

impl ProcessConfigGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>, strategy: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args,
            strategy: strategy.into(),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(&config.program, config.args.clone(), &config.strategy)
    }

    /// Argument list with every placeholder filled in
    pub fn render_args(&self, parameter: SweepParameter, config_folder: &Path) -> Vec<String> {
        let cluster_size = parameter.cluster_size.to_string();
        let scenario_size = parameter.scenario_size.to_string();
        let folder = config_folder.to_string_lossy();

        self.args
            .iter()
            .map(|arg| {
                arg.replace(placeholders::CLUSTER_SIZE, &cluster_size)
                    .replace(placeholders::SCENARIO_SIZE, &scenario_size)
                    .replace(placeholders::CONFIG_FOLDER, &folder)
                    .replace(placeholders::STRATEGY, &self.strategy)
            })
            .collect()
    }
}

#[async_trait]
impl ConfigGenerator for ProcessConfigGenerator {
    async fn generate(
        &self,
        parameter: SweepParameter,
        config_folder: &Path,
    ) -> Result<(), GeneratorError> {
        let args = self.render_args(parameter, config_folder);
        info!(
            cluster_size = parameter.cluster_size,
            scenario_size = parameter.scenario_size,
            command = %format!("{} {}", self.program, args.join(" ")),
            "Generating component configuration"
        );

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|source| GeneratorError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(GeneratorError::Failed {
                program: self.program.clone(),
                status: status.code(),
            });
        }
        Ok(())
    }
}
