//! Artifact collection after a completed job

use crate::error::SweepError;
use perfsweep_cluster::{ClusterClient, LogTarget, ResourceQuery};
use perfsweep_config::ClusterConfig;
use perfsweep_core::{ArtifactKind, RunContext};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Writes scheduling data and logs for one iteration into the output folder
pub struct ArtifactCollector {
    client: Arc<dyn ClusterClient>,
    scheduling: ResourceQuery,
    job_logs: LogTarget,
    workload_name: String,
    component_container: String,
}

impl ArtifactCollector {
    pub fn new(client: Arc<dyn ClusterClient>, cluster: &ClusterConfig) -> Self {
        Self {
            client,
            scheduling: ResourceQuery::custom_columns("pod", &cluster.scheduling_columns),
            job_logs: LogTarget::resource(&cluster.job_resource),
            workload_name: cluster.workload_name.clone(),
            component_container: cluster.component_container.clone(),
        }
    }

    /// Collect every artifact for `ctx` in order, returning the written paths.
    ///
    /// Stops at the first failed read; files already written stay on disk.
    pub async fn collect(&self, ctx: &RunContext) -> Result<Vec<PathBuf>, SweepError> {
        let output_folder = ctx.output_folder();
        tokio::fs::create_dir_all(output_folder)
            .await
            .map_err(|source| SweepError::Io {
                path: output_folder.to_path_buf(),
                source,
            })?;

        let kinds = ArtifactKind::expected_for(ctx.parameter, &self.workload_name);
        let mut written = Vec::with_capacity(kinds.len());

        for kind in kinds {
            let contents = self.read(&kind).await?;
            let path = ctx.artifact_path(&kind);

            tokio::fs::write(&path, &contents)
                .await
                .map_err(|source| SweepError::Artifact {
                    path: path.clone(),
                    source,
                })?;

            info!(
                artifact = %path.display(),
                bytes = contents.len(),
                "Wrote artifact"
            );
            written.push(path);
        }

        Ok(written)
    }

    async fn read(&self, kind: &ArtifactKind) -> Result<Vec<u8>, SweepError> {
        let contents = match kind {
            ArtifactKind::PodScheduling => self.client.get_formatted(&self.scheduling).await?,
            ArtifactKind::Producer => self.client.get_logs(&self.job_logs).await?,
            ArtifactKind::Replica { workload, index } => {
                let pod = format!("{}-{}", workload, index);
                let target = LogTarget::container(&pod, &self.component_container);
                self.client.get_logs(&target).await?
            }
        };
        Ok(contents)
    }
}
