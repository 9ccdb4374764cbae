//! Configuration loading and environment variable handling

use crate::domains::utils::parse_size_list;
use crate::domains::SweepConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "PERFSWEEP".to_string(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<SweepConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: SweepConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<SweepConfig> {
        let mut config = SweepConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load from a file when one is given, otherwise from the environment
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<SweepConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut SweepConfig) -> ConfigResult<()> {
        self.apply_grid_overrides(&mut config.grid)?;
        self.apply_cluster_overrides(&mut config.cluster)?;
        self.apply_timing_overrides(&mut config.timing)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    fn apply_grid_overrides(
        &self,
        config: &mut crate::domains::grid::GridConfig,
    ) -> ConfigResult<()> {
        if let Ok(sizes) = self.get_env_var("CLUSTER_SIZES") {
            config.cluster_sizes = parse_size_list(&sizes)
                .map_err(|e| ConfigError::EnvError(format!("Invalid CLUSTER_SIZES: {}", e)))?;
        }

        if let Ok(sizes) = self.get_env_var("SCENARIO_SIZES") {
            config.scenario_sizes = parse_size_list(&sizes)
                .map_err(|e| ConfigError::EnvError(format!("Invalid SCENARIO_SIZES: {}", e)))?;
        }

        Ok(())
    }

    fn apply_cluster_overrides(
        &self,
        config: &mut crate::domains::cluster::ClusterConfig,
    ) -> ConfigResult<()> {
        if let Ok(kubectl) = self.get_env_var("KUBECTL") {
            config.kubectl = kubectl;
        }

        if let Ok(namespace) = self.get_env_var("NAMESPACE") {
            config.namespace = namespace;
        }

        if let Some(timeout) = self.get_seconds("READY_TIMEOUT_SECONDS")? {
            config.ready_timeout = timeout;
        }

        if let Some(timeout) = self.get_seconds("COMPLETE_TIMEOUT_SECONDS")? {
            config.complete_timeout = timeout;
        }

        if let Ok(strict) = self.get_env_var("STRICT_DELETES") {
            config.strict_deletes = strict
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid STRICT_DELETES: {}", e)))?;
        }

        Ok(())
    }

    fn apply_timing_overrides(
        &self,
        config: &mut crate::domains::timing::TimingConfig,
    ) -> ConfigResult<()> {
        if let Some(settle) = self.get_seconds("MESH_SETTLE_SECONDS")? {
            config.mesh_connectivity = settle;
        }

        Ok(())
    }

    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Read a whole-seconds duration override, if set
    fn get_seconds(&self, name: &str) -> ConfigResult<Option<Duration>> {
        match self.get_env_var(name) {
            Ok(raw) => {
                let seconds: u64 = raw
                    .parse()
                    .map_err(|e| ConfigError::EnvError(format!("Invalid {}: {}", name, e)))?;
                Ok(Some(Duration::from_secs(seconds)))
            }
            Err(_) => Ok(None),
        }
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
