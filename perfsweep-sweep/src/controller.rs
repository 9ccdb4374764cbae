//! Sweep controller

use crate::collector::ArtifactCollector;
use crate::error::SweepError;
use crate::generator::ConfigGenerator;
use crate::phase::{FailurePolicy, Phase, PrepareStep, Step};
use perfsweep_cluster::{ClusterClient, WaitTarget};
use perfsweep_config::{ClusterConfig, JobConfig, ResolvedPaths, SweepConfig, TimingConfig};
use perfsweep_core::{RunContext, SweepGrid, SweepParameter};
use perfsweep_manifest::{render_job_command, with_job_command, with_replica_count, ManifestSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};

/// Condition the workload pods must reach before the job is launched
const READY_CONDITION: &str = "Ready";

/// Condition the job must reach before artifacts are collected
const COMPLETE_CONDITION: &str = "complete";

/// One finished grid coordinate
#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub parameter: SweepParameter,
    pub artifacts: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Outcome of a sweep that ran every coordinate
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub completed: Vec<CompletedRun>,
    pub elapsed: Duration,
}

impl SweepReport {
    pub fn artifact_count(&self) -> usize {
        self.completed.iter().map(|run| run.artifacts.len()).sum()
    }
}

/// Drives every grid coordinate through [`Phase::ALL`]
pub struct SweepController {
    client: Arc<dyn ClusterClient>,
    generator: Arc<dyn ConfigGenerator>,
    collector: ArtifactCollector,
    manifests: ManifestSet,
    paths: ResolvedPaths,
    cluster: ClusterConfig,
    timing: TimingConfig,
    job: JobConfig,
}

impl SweepController {
    pub fn new(
        client: Arc<dyn ClusterClient>,
        generator: Arc<dyn ConfigGenerator>,
        manifests: ManifestSet,
        paths: ResolvedPaths,
        config: &SweepConfig,
    ) -> Self {
        Self {
            collector: ArtifactCollector::new(client.clone(), &config.cluster),
            client,
            generator,
            manifests,
            paths,
            cluster: config.cluster.clone(),
            timing: config.timing.clone(),
            job: config.job.clone(),
        }
    }

    /// Prepare the namespace, then run every coordinate of `grid` in order.
    ///
    /// Returns at the first fatal failure; coordinates after it are not started.
    pub async fn run(&self, grid: &SweepGrid) -> Result<SweepReport, SweepError> {
        let started = Instant::now();
        info!(
            coordinates = grid.len(),
            cluster_sizes = ?grid.cluster_sizes(),
            scenario_sizes = ?grid.scenario_sizes(),
            namespace = %self.cluster.namespace,
            "Starting sweep"
        );

        self.prepare().await?;

        let mut report = SweepReport::default();
        for parameter in grid.iter() {
            let ctx = self.context(parameter);
            let span = info_span!(
                "iteration",
                cluster_size = parameter.cluster_size,
                scenario_size = parameter.scenario_size
            );
            let iteration_started = Instant::now();
            let artifacts = self.run_iteration(&ctx).instrument(span).await?;
            let elapsed = iteration_started.elapsed();

            info!(
                cluster_size = parameter.cluster_size,
                scenario_size = parameter.scenario_size,
                artifacts = artifacts.len(),
                elapsed_secs = elapsed.as_secs(),
                "Iteration complete"
            );
            report.completed.push(CompletedRun {
                parameter,
                artifacts,
                elapsed,
            });
        }

        report.elapsed = started.elapsed();
        Ok(report)
    }

    /// Apply and select the namespace; any failure aborts the sweep
    async fn prepare(&self) -> Result<(), SweepError> {
        for step in PrepareStep::ALL {
            let result = match step {
                PrepareStep::ApplyNamespace => {
                    self.client
                        .apply_namespace(&self.paths.namespace_manifest)
                        .await
                }
                PrepareStep::SetNamespace => {
                    self.client
                        .set_active_namespace(&self.cluster.namespace)
                        .await
                }
            };

            if let Err(err) = result.map_err(SweepError::from) {
                error!(
                    step = %step,
                    error = %err,
                    exit_code = err.exit_code(),
                    "Prepare step failed, aborting sweep"
                );
                return Err(err);
            }
        }
        Ok(())
    }

    async fn run_iteration(&self, ctx: &RunContext) -> Result<Vec<PathBuf>, SweepError> {
        let mut artifacts = Vec::new();

        for phase in Phase::ALL {
            info!(phase = phase.name(), "Entering phase");
            for step in phase.steps() {
                self.run_step(*step, ctx, &mut artifacts).await?;
            }
        }

        Ok(artifacts)
    }

    fn context(&self, parameter: SweepParameter) -> RunContext {
        RunContext {
            parameter,
            workload_manifest: self.paths.workload_manifest.clone(),
            job_manifest: self.paths.job_manifest.clone(),
            config_folder: self.paths.config_folder.clone(),
            output_folder: self.paths.output_folder.clone(),
        }
    }

    /// Execute one step and apply its failure policy
    async fn run_step(
        &self,
        step: Step,
        ctx: &RunContext,
        artifacts: &mut Vec<PathBuf>,
    ) -> Result<(), SweepError> {
        let err = match self.execute(step, ctx, artifacts).await {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };

        match step.policy() {
            FailurePolicy::Tolerated if err.is_not_found() => {
                info!(step = %step, "Nothing to delete");
                Ok(())
            }
            FailurePolicy::Tolerated if !self.cluster.strict_deletes => {
                warn!(step = %step, error = %err, "Ignoring failed cleanup step");
                Ok(())
            }
            _ => {
                error!(
                    step = %step,
                    error = %err,
                    exit_code = err.exit_code(),
                    "Step failed, aborting sweep"
                );
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        step: Step,
        ctx: &RunContext,
        artifacts: &mut Vec<PathBuf>,
    ) -> Result<(), SweepError> {
        let client = self.client.as_ref();
        let cluster = &self.cluster;

        match step {
            Step::GenerateConfig => {
                self.generator
                    .generate(ctx.parameter, &ctx.config_folder)
                    .await?
            }
            Step::DeleteConfigObject => {
                client
                    .delete_config_object(&cluster.config_object_name)
                    .await?
            }
            Step::CreateConfigObject => {
                client
                    .create_config_object(&cluster.config_object_name, &ctx.config_folder)
                    .await?
            }
            Step::WriteWorkloadManifest => {
                with_replica_count(&self.manifests.workload, ctx.parameter.cluster_size)?
                    .persist(&ctx.workload_manifest)?;
                info!(
                    manifest = %ctx.workload_manifest.display(),
                    replicas = ctx.parameter.cluster_size,
                    "Updated workload manifest"
                );
            }
            Step::DeleteWorkload => client.delete_resource(&ctx.workload_manifest).await?,
            Step::DeleteJob => client.delete_resource(&ctx.job_manifest).await?,
            Step::ApplyWorkload => client.apply_resource(&ctx.workload_manifest).await?,
            Step::AwaitWorkloadReady => {
                client
                    .wait_for_condition(
                        &WaitTarget::pods(&cluster.workload_selector),
                        READY_CONDITION,
                        cluster.ready_timeout,
                    )
                    .await?
            }
            Step::WriteJobManifest => {
                let command = render_job_command(
                    &self.job.shell,
                    &self.job.command_template,
                    self.job.message_count,
                    ctx.parameter.scenario_size,
                );
                with_job_command(&self.manifests.job, &command)?.persist(&ctx.job_manifest)?;
                info!(
                    manifest = %ctx.job_manifest.display(),
                    scenario_size = ctx.parameter.scenario_size,
                    "Updated job manifest"
                );
            }
            Step::ApplyJob => client.apply_resource(&ctx.job_manifest).await?,
            Step::AwaitJobComplete => {
                client
                    .wait_for_condition(
                        &WaitTarget::named(&cluster.job_resource),
                        COMPLETE_CONDITION,
                        cluster.complete_timeout,
                    )
                    .await?
            }
            Step::CollectArtifacts => artifacts.extend(self.collector.collect(ctx).await?),
            Step::Settle(settle) => {
                let delay = settle.duration(&self.timing);
                if !delay.is_zero() {
                    info!(
                        settle = settle.name(),
                        seconds = delay.as_secs(),
                        "Waiting for cluster to settle"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        Ok(())
    }
}
