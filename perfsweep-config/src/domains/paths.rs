//! Filesystem layout of a sweep run

use crate::error::ConfigResult;
use crate::validation::{validate_required_path, Validatable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest, config and output locations.
///
/// Relative paths are resolved against `base_dir`, or against the
/// fallback base the caller supplies when `base_dir` is unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory relative paths are resolved against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// Namespace manifest applied once before the sweep
    #[serde(default = "default_namespace_manifest")]
    pub namespace_manifest: PathBuf,

    /// Service + StatefulSet template, read once at startup
    #[serde(default = "default_workload_template")]
    pub workload_template: PathBuf,

    /// Job template, read once at startup
    #[serde(default = "default_job_template")]
    pub job_template: PathBuf,

    /// Workload manifest rewritten and applied every iteration
    #[serde(default = "default_workload_manifest")]
    pub workload_manifest: PathBuf,

    /// Job manifest rewritten and applied every iteration
    #[serde(default = "default_job_manifest")]
    pub job_manifest: PathBuf,

    /// Folder the config generator writes into
    #[serde(default = "default_config_folder")]
    pub config_folder: PathBuf,

    /// Folder artifacts are written to
    #[serde(default = "default_output_folder")]
    pub output_folder: PathBuf,
}

/// Paths with the base directory applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub namespace_manifest: PathBuf,
    pub workload_template: PathBuf,
    pub job_template: PathBuf,
    pub workload_manifest: PathBuf,
    pub job_manifest: PathBuf,
    pub config_folder: PathBuf,
    pub output_folder: PathBuf,
}

impl PathsConfig {
    /// Resolve every relative path against `base_dir`, or `fallback_base` if unset
    pub fn resolve(&self, fallback_base: &Path) -> ResolvedPaths {
        let base = match &self.base_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => fallback_base.join(dir),
            None => fallback_base.to_path_buf(),
        };
        let join = |p: &PathBuf| if p.is_absolute() { p.clone() } else { base.join(p) };

        ResolvedPaths {
            namespace_manifest: join(&self.namespace_manifest),
            workload_template: join(&self.workload_template),
            job_template: join(&self.job_template),
            workload_manifest: join(&self.workload_manifest),
            job_manifest: join(&self.job_manifest),
            config_folder: join(&self.config_folder),
            output_folder: join(&self.output_folder),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            namespace_manifest: default_namespace_manifest(),
            workload_template: default_workload_template(),
            job_template: default_job_template(),
            workload_manifest: default_workload_manifest(),
            job_manifest: default_job_manifest(),
            config_folder: default_config_folder(),
            output_folder: default_output_folder(),
        }
    }
}

impl Validatable for PathsConfig {
    fn validate(&self) -> ConfigResult<()> {
        let domain = self.domain_name();
        validate_required_path(&self.namespace_manifest, "namespace_manifest", domain)?;
        validate_required_path(&self.workload_template, "workload_template", domain)?;
        validate_required_path(&self.job_template, "job_template", domain)?;
        validate_required_path(&self.workload_manifest, "workload_manifest", domain)?;
        validate_required_path(&self.job_manifest, "job_manifest", domain)?;
        validate_required_path(&self.config_folder, "config_folder", domain)?;
        validate_required_path(&self.output_folder, "output_folder", domain)?;

        // The templates are read once; overwriting them would lose the pristine copy
        if self.workload_manifest == self.workload_template {
            return Err(self.validation_error("workload_manifest must differ from workload_template"));
        }
        if self.job_manifest == self.job_template {
            return Err(self.validation_error("job_manifest must differ from job_template"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "paths"
    }
}

fn default_namespace_manifest() -> PathBuf {
    PathBuf::from("mbei-namespace.yaml")
}

fn default_workload_template() -> PathBuf {
    PathBuf::from("mbei-component-base.yaml")
}

fn default_job_template() -> PathBuf {
    PathBuf::from("testing-job-base.yaml")
}

fn default_workload_manifest() -> PathBuf {
    PathBuf::from("mbei-component.yaml")
}

fn default_job_manifest() -> PathBuf {
    PathBuf::from("testing-job.yaml")
}

fn default_config_folder() -> PathBuf {
    PathBuf::from("config-folder")
}

fn default_output_folder() -> PathBuf {
    PathBuf::from("output-folder")
}
