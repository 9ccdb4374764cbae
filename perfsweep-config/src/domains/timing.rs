//! Settle delays between cluster operations
//!
//! The cluster gives no signal for "previous pods are fully torn down" or
//! "replicas have finished meshing with each other", so the sweep waits a
//! fixed amount of time instead. These delays are a known fragility: a
//! slow cluster can outlast them. Polling an explicit readiness signal
//! would replace them if the component ever exposes one.

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wait after deleting the workload for its pods to terminate
pub const WORKLOAD_TEARDOWN_SETTLE: Duration = Duration::from_secs(10);

/// Wait after deleting the previous job
pub const JOB_TEARDOWN_SETTLE: Duration = Duration::from_secs(2);

/// Wait after pods are Ready for replicas to open connections to each other.
/// Pod readiness says nothing about the mesh being established.
pub const MESH_CONNECTIVITY_SETTLE: Duration = Duration::from_secs(120);

/// Wait after applying the job before waiting on it
pub const JOB_LAUNCH_SETTLE: Duration = Duration::from_secs(5);

/// Wait after job completion before collecting logs
pub const JOB_COMPLETION_SETTLE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_workload_teardown"
    )]
    pub workload_teardown: Duration,

    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_job_teardown"
    )]
    pub job_teardown: Duration,

    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_mesh_connectivity"
    )]
    pub mesh_connectivity: Duration,

    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_job_launch"
    )]
    pub job_launch: Duration,

    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_job_completion"
    )]
    pub job_completion: Duration,
}

impl TimingConfig {
    /// All delays zeroed, for dry runs against a fake cluster
    pub fn immediate() -> Self {
        Self {
            workload_teardown: Duration::ZERO,
            job_teardown: Duration::ZERO,
            mesh_connectivity: Duration::ZERO,
            job_launch: Duration::ZERO,
            job_completion: Duration::ZERO,
        }
    }

    /// Settings that validate but are almost certainly wrong against a real cluster
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.workload_teardown.is_zero() {
            warnings.push("timing.workload_teardown is 0; the next apply may race pod termination");
        }
        if self.mesh_connectivity.is_zero() {
            warnings.push("timing.mesh_connectivity is 0; the job may start before replicas are meshed");
        }
        warnings
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            workload_teardown: WORKLOAD_TEARDOWN_SETTLE,
            job_teardown: JOB_TEARDOWN_SETTLE,
            mesh_connectivity: MESH_CONNECTIVITY_SETTLE,
            job_launch: JOB_LAUNCH_SETTLE,
            job_completion: JOB_COMPLETION_SETTLE,
        }
    }
}

impl Validatable for TimingConfig {
    fn validate(&self) -> ConfigResult<()> {
        // Zero delays are allowed; see `warnings`
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "timing"
    }
}

fn default_workload_teardown() -> Duration {
    WORKLOAD_TEARDOWN_SETTLE
}

fn default_job_teardown() -> Duration {
    JOB_TEARDOWN_SETTLE
}

fn default_mesh_connectivity() -> Duration {
    MESH_CONNECTIVITY_SETTLE
}

fn default_job_launch() -> Duration {
    JOB_LAUNCH_SETTLE
}

fn default_job_completion() -> Duration {
    JOB_COMPLETION_SETTLE
}
