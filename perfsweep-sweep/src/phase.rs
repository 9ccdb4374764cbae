//! Ordered sweep phases and their steps
//!
//! Every iteration walks [`Phase::ALL`] front to back. A phase expands
//! into [`Step`]s, and each step declares its [`FailurePolicy`] exactly
//! once, in [`Step::policy`]. The controller owns the only place that
//! acts on a policy. [`PrepareStep`]s run once per sweep, before
//! any coordinate.

use perfsweep_config::TimingConfig;
use std::fmt;
use std::time::Duration;

/// What happens when a step fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the sweep with the step's error
    Fatal,
    /// Log and continue; used for delete-before-recreate cleanup
    Tolerated,
}

/// Fixed waits between cluster operations; see `perfsweep_config::domains::timing`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    WorkloadTeardown,
    JobTeardown,
    MeshConnectivity,
    JobLaunch,
    JobCompletion,
}

impl Settle {
    pub fn duration(&self, timing: &TimingConfig) -> Duration {
        match self {
            Settle::WorkloadTeardown => timing.workload_teardown,
            Settle::JobTeardown => timing.job_teardown,
            Settle::MeshConnectivity => timing.mesh_connectivity,
            Settle::JobLaunch => timing.job_launch,
            Settle::JobCompletion => timing.job_completion,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Settle::WorkloadTeardown => "workload_teardown",
            Settle::JobTeardown => "job_teardown",
            Settle::MeshConnectivity => "mesh_connectivity",
            Settle::JobLaunch => "job_launch",
            Settle::JobCompletion => "job_completion",
        }
    }
}

/// Once-per-sweep setup, run before the first grid coordinate. Always fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepareStep {
    ApplyNamespace,
    SetNamespace,
}

impl PrepareStep {
    pub const ALL: [PrepareStep; 2] = [PrepareStep::ApplyNamespace, PrepareStep::SetNamespace];

    pub fn name(&self) -> &'static str {
        match self {
            PrepareStep::ApplyNamespace => "apply_namespace",
            PrepareStep::SetNamespace => "set_namespace",
        }
    }
}

impl fmt::Display for PrepareStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One externally observable action of an iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    GenerateConfig,
    DeleteConfigObject,
    CreateConfigObject,
    WriteWorkloadManifest,
    DeleteWorkload,
    DeleteJob,
    ApplyWorkload,
    AwaitWorkloadReady,
    WriteJobManifest,
    ApplyJob,
    AwaitJobComplete,
    CollectArtifacts,
    Settle(Settle),
}

impl Step {
    pub fn policy(&self) -> FailurePolicy {
        match self {
            Step::DeleteConfigObject | Step::DeleteWorkload | Step::DeleteJob => {
                FailurePolicy::Tolerated
            }
            _ => FailurePolicy::Fatal,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::GenerateConfig => "generate_config",
            Step::DeleteConfigObject => "delete_config_object",
            Step::CreateConfigObject => "create_config_object",
            Step::WriteWorkloadManifest => "write_workload_manifest",
            Step::DeleteWorkload => "delete_workload",
            Step::DeleteJob => "delete_job",
            Step::ApplyWorkload => "apply_workload",
            Step::AwaitWorkloadReady => "await_workload_ready",
            Step::WriteJobManifest => "write_job_manifest",
            Step::ApplyJob => "apply_job",
            Step::AwaitJobComplete => "await_job_complete",
            Step::CollectArtifacts => "collect_artifacts",
            Step::Settle(_) => "settle",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Settle(settle) => write!(f, "settle ({})", settle.name()),
            other => f.write_str(other.name()),
        }
    }
}

/// Per-iteration phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    GenerateConfig,
    PublishConfig,
    UpdateManifest,
    RecycleWorkload,
    Deploy,
    Launch,
    AwaitCompletion,
    Collect,
}

impl Phase {
    pub const ALL: [Phase; 8] = [
        Phase::GenerateConfig,
        Phase::PublishConfig,
        Phase::UpdateManifest,
        Phase::RecycleWorkload,
        Phase::Deploy,
        Phase::Launch,
        Phase::AwaitCompletion,
        Phase::Collect,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Phase::GenerateConfig => "generate_config",
            Phase::PublishConfig => "publish_config",
            Phase::UpdateManifest => "update_manifest",
            Phase::RecycleWorkload => "recycle_workload",
            Phase::Deploy => "deploy",
            Phase::Launch => "launch",
            Phase::AwaitCompletion => "await_completion",
            Phase::Collect => "collect",
        }
    }

    pub fn steps(&self) -> &'static [Step] {
        match self {
            Phase::GenerateConfig => &[Step::GenerateConfig],
            Phase::PublishConfig => &[Step::DeleteConfigObject, Step::CreateConfigObject],
            Phase::UpdateManifest => &[Step::WriteWorkloadManifest],
            Phase::RecycleWorkload => &[
                Step::DeleteWorkload,
                Step::Settle(Settle::WorkloadTeardown),
                Step::DeleteJob,
                Step::Settle(Settle::JobTeardown),
            ],
            Phase::Deploy => &[
                Step::ApplyWorkload,
                Step::AwaitWorkloadReady,
                Step::Settle(Settle::MeshConnectivity),
            ],
            Phase::Launch => &[
                Step::WriteJobManifest,
                Step::ApplyJob,
                Step::Settle(Settle::JobLaunch),
            ],
            Phase::AwaitCompletion => &[
                Step::AwaitJobComplete,
                Step::Settle(Settle::JobCompletion),
            ],
            Phase::Collect => &[Step::CollectArtifacts],
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
