//! Cluster access and resource identity configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, validate_timeout, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How to reach the cluster and which resources the sweep owns
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// kubectl binary to invoke
    #[serde(default = "default_kubectl")]
    pub kubectl: String,

    /// Arguments placed before every kubectl subcommand, e.g. `--context gke-perf`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kubectl_args: Vec<String>,

    /// Namespace every operation is scoped to
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// ConfigMap holding the generated component configuration
    #[serde(default = "default_config_object_name")]
    pub config_object_name: String,

    /// Label selector matching the workload pods
    #[serde(default = "default_workload_selector")]
    pub workload_selector: String,

    /// StatefulSet name; replica pods are `<workload_name>-<index>`
    #[serde(default = "default_workload_name")]
    pub workload_name: String,

    /// Container whose logs are collected from each replica
    #[serde(default = "default_component_container")]
    pub component_container: String,

    /// Job resource the load generator runs as
    #[serde(default = "default_job_resource")]
    pub job_resource: String,

    /// custom-columns spec for the pod scheduling table
    #[serde(default = "default_scheduling_columns")]
    pub scheduling_columns: String,

    /// Upper bound on waiting for workload pods to become Ready
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_ready_timeout"
    )]
    pub ready_timeout: Duration,

    /// Upper bound on waiting for the job to complete
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_complete_timeout"
    )]
    pub complete_timeout: Duration,

    /// Extra time granted to kubectl beyond its own `--timeout` before the child is abandoned
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_command_grace"
    )]
    pub command_grace: Duration,

    /// Abort when a delete fails for any reason other than "not found"
    #[serde(default = "crate::domains::utils::default_false")]
    pub strict_deletes: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            kubectl: default_kubectl(),
            kubectl_args: Vec::new(),
            namespace: default_namespace(),
            config_object_name: default_config_object_name(),
            workload_selector: default_workload_selector(),
            workload_name: default_workload_name(),
            component_container: default_component_container(),
            job_resource: default_job_resource(),
            scheduling_columns: default_scheduling_columns(),
            ready_timeout: default_ready_timeout(),
            complete_timeout: default_complete_timeout(),
            command_grace: default_command_grace(),
            strict_deletes: false,
        }
    }
}

impl Validatable for ClusterConfig {
    fn validate(&self) -> ConfigResult<()> {
        let domain = self.domain_name();
        validate_required_string(&self.kubectl, "kubectl", domain)?;
        validate_required_string(&self.namespace, "namespace", domain)?;
        validate_required_string(&self.config_object_name, "config_object_name", domain)?;
        validate_required_string(&self.workload_selector, "workload_selector", domain)?;
        validate_required_string(&self.workload_name, "workload_name", domain)?;
        validate_required_string(&self.component_container, "component_container", domain)?;
        validate_required_string(&self.job_resource, "job_resource", domain)?;
        validate_required_string(&self.scheduling_columns, "scheduling_columns", domain)?;

        validate_timeout(self.ready_timeout, "ready_timeout", domain)?;
        validate_timeout(self.complete_timeout, "complete_timeout", domain)?;

        if !self.workload_selector.contains('=') {
            return Err(self.validation_error(format!(
                "workload_selector '{}' must be a key=value label selector",
                self.workload_selector
            )));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "cluster"
    }
}

fn default_kubectl() -> String {
    "kubectl".to_string()
}

fn default_namespace() -> String {
    "mbei".to_string()
}

fn default_config_object_name() -> String {
    "component-config".to_string()
}

fn default_workload_selector() -> String {
    "app=mbei-component".to_string()
}

fn default_workload_name() -> String {
    "mbei-component".to_string()
}

fn default_component_container() -> String {
    "mbei-component".to_string()
}

fn default_job_resource() -> String {
    "job.batch/perftest-job".to_string()
}

fn default_scheduling_columns() -> String {
    "NODE:.spec.nodeName,NAME:.metadata.name".to_string()
}

fn default_ready_timeout() -> Duration {
    Duration::from_secs(360)
}

fn default_complete_timeout() -> Duration {
    Duration::from_secs(600)
}

fn default_command_grace() -> Duration {
    Duration::from_secs(30)
}
