//! Shared fixtures for sweep integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use perfsweep_cluster::{
    ClusterClient, ClusterError, ClusterResult, FailureKind, LogTarget, ResourceQuery, WaitTarget,
};
use perfsweep_config::{ResolvedPaths, SweepConfig, TimingConfig};
use perfsweep_core::SweepParameter;
use perfsweep_manifest::{replica_count, ManifestDocuments, ManifestSet};
use perfsweep_sweep::{ConfigGenerator, GeneratorError, SweepController};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const WORKLOAD_TEMPLATE: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: mbei-component
  labels:
    app: mbei-component
spec:
  clusterIP: None
  selector:
    app: mbei-component
---
apiVersion: apps/v1
kind: StatefulSet
metadata:
  name: mbei-component
spec:
  serviceName: mbei-component
  replicas: 1
  selector:
    matchLabels:
      app: mbei-component
  template:
    metadata:
      labels:
        app: mbei-component
    spec:
      containers:
        - name: mbei-component
          image: mbei-component:latest
"#;

pub const JOB_TEMPLATE: &str = r#"apiVersion: batch/v1
kind: Job
metadata:
  name: perftest-job
spec:
  backoffLimit: 0
  template:
    spec:
      restartPolicy: Never
      containers:
        - name: perftest
          image: mbei-testdata:latest
          command: ["/bin/true"]
"#;

/// Which fake cluster operation should fail, and how
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    ApplyNamespace,
    CreateConfig,
    ReadyWait,
    CompleteWait,
    DeletesFail(FailureKind),
}

/// In-memory cluster that records every call as one line
#[derive(Default)]
pub struct RecordingCluster {
    calls: Mutex<Vec<String>>,
    faults: Mutex<Vec<Fault>>,
    current_replicas: Mutex<u64>,
}

impl RecordingCluster {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_fault(fault: Fault) -> Arc<Self> {
        let cluster = Self::default();
        cluster.faults.lock().unwrap().push(fault);
        Arc::new(cluster)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn faulted(&self, fault: Fault) -> bool {
        self.faults.lock().unwrap().contains(&fault)
    }

    fn delete_fault(&self) -> Option<FailureKind> {
        self.faults
            .lock()
            .unwrap()
            .iter()
            .find_map(|fault| match fault {
                Fault::DeletesFail(kind) => Some(*kind),
                _ => None,
            })
    }

    fn command_failed(operation: &str, kind: FailureKind, status: i32) -> ClusterError {
        ClusterError::CommandFailed {
            operation: operation.to_string(),
            status: Some(status),
            kind,
            stderr: format!("{operation} failed"),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[async_trait]
impl ClusterClient for RecordingCluster {
    async fn apply_namespace(&self, path: &Path) -> ClusterResult<()> {
        self.record(format!("apply_namespace {}", file_name(path)));
        if self.faulted(Fault::ApplyNamespace) {
            return Err(Self::command_failed("apply namespace", FailureKind::Other, 7));
        }
        Ok(())
    }

    async fn set_active_namespace(&self, name: &str) -> ClusterResult<()> {
        self.record(format!("set_namespace {name}"));
        Ok(())
    }

    async fn create_config_object(&self, name: &str, source_folder: &Path) -> ClusterResult<()> {
        self.record(format!("create_config {name} {}", file_name(source_folder)));
        if self.faulted(Fault::CreateConfig) {
            return Err(Self::command_failed("create configmap", FailureKind::AlreadyExists, 1));
        }
        Ok(())
    }

    async fn delete_config_object(&self, name: &str) -> ClusterResult<()> {
        self.record(format!("delete_config {name}"));
        match self.delete_fault() {
            Some(kind) => Err(Self::command_failed("delete configmap", kind, 1)),
            None => Ok(()),
        }
    }

    async fn delete_resource(&self, path: &Path) -> ClusterResult<()> {
        self.record(format!("delete {}", file_name(path)));
        if let Some(kind) = self.delete_fault() {
            return Err(Self::command_failed("delete resource", kind, 1));
        }
        if !path.exists() {
            // What `kubectl delete -f` prints for a manifest that was never written
            let stderr = format!("error: the path \"{}\" does not exist", path.display());
            return Err(ClusterError::CommandFailed {
                operation: "delete resource".to_string(),
                status: Some(1),
                kind: FailureKind::classify(&stderr),
                stderr,
            });
        }
        Ok(())
    }

    async fn apply_resource(&self, path: &Path) -> ClusterResult<()> {
        let manifest = ManifestDocuments::load(path)
            .map_err(|_| Self::command_failed("apply resource", FailureKind::NotFound, 1))?;

        match replica_count(&manifest) {
            Some(replicas) => {
                *self.current_replicas.lock().unwrap() = replicas;
                self.record(format!("apply {} replicas={replicas}", file_name(path)));
            }
            None => {
                let command = manifest.documents()[0]["spec"]["template"]["spec"]["containers"][0]
                    ["command"][2]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                self.record(format!("apply {} command={command}", file_name(path)));
            }
        }
        Ok(())
    }

    async fn wait_for_condition(
        &self,
        target: &WaitTarget,
        condition: &str,
        timeout: Duration,
    ) -> ClusterResult<()> {
        self.record(format!("wait {target} {condition}"));
        let fault = match condition {
            "Ready" => Fault::ReadyWait,
            _ => Fault::CompleteWait,
        };
        if self.faulted(fault) {
            return Err(ClusterError::Timeout {
                operation: "wait for condition".to_string(),
                timeout,
            });
        }
        Ok(())
    }

    async fn get_formatted(&self, query: &ResourceQuery) -> ClusterResult<Vec<u8>> {
        self.record(format!("get {}", query.resource));
        let replicas = *self.current_replicas.lock().unwrap();
        let mut table = String::from("NODE     NAME\n");
        for index in 0..replicas {
            table.push_str(&format!("node-{index}   mbei-component-{index}\n"));
        }
        table.push_str("node-0   perftest-job-x7k2p\n");
        Ok(table.into_bytes())
    }

    async fn get_logs(&self, target: &LogTarget) -> ClusterResult<Vec<u8>> {
        self.record(format!("logs {target}"));
        Ok(format!("log output of {}\n", target.resource).into_bytes())
    }
}

/// Config generator that records what it was asked to generate
#[derive(Default)]
pub struct RecordingGenerator {
    pub requests: Mutex<Vec<SweepParameter>>,
    exit_status: Option<i32>,
}

impl RecordingGenerator {
    /// A generator whose every run exits with `status`
    pub fn failing(status: i32) -> Self {
        Self {
            exit_status: Some(status),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ConfigGenerator for RecordingGenerator {
    async fn generate(
        &self,
        parameter: SweepParameter,
        config_folder: &Path,
    ) -> Result<(), GeneratorError> {
        std::fs::create_dir_all(config_folder).map_err(|source| GeneratorError::Spawn {
            program: "recording-generator".to_string(),
            source,
        })?;
        self.requests.lock().unwrap().push(parameter);
        if let Some(status) = self.exit_status {
            return Err(GeneratorError::Failed {
                program: "recording-generator".to_string(),
                status: Some(status),
            });
        }
        Ok(())
    }
}

pub fn immediate_config() -> SweepConfig {
    SweepConfig {
        timing: TimingConfig::immediate(),
        ..Default::default()
    }
}

pub fn resolved_paths(dir: &Path, config: &SweepConfig) -> ResolvedPaths {
    config.paths.resolve(dir)
}

pub fn controller(
    dir: &Path,
    cluster: Arc<RecordingCluster>,
    generator: Arc<RecordingGenerator>,
    config: &SweepConfig,
) -> SweepController {
    let manifests = ManifestSet {
        workload: ManifestDocuments::parse(WORKLOAD_TEMPLATE).unwrap(),
        job: ManifestDocuments::parse(JOB_TEMPLATE).unwrap(),
    };
    SweepController::new(
        cluster,
        generator,
        manifests,
        resolved_paths(dir, config),
        config,
    )
}

pub fn artifact_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}
