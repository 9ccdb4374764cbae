//! kubectl-backed cluster client

use crate::client::{ClusterClient, LogTarget, ResourceQuery, WaitTarget};
use crate::error::{ClusterError, ClusterResult, FailureKind};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

/// Runs every operation as a `kubectl` child process
#[derive(Debug, Clone)]
pub struct KubectlClient {
    program: String,
    base_args: Vec<String>,
    command_grace: Duration,
}

impl KubectlClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
            command_grace: Duration::from_secs(30),
        }
    }

    /// Arguments placed before every subcommand, e.g. `--context`
    pub fn with_base_args(mut self, base_args: Vec<String>) -> Self {
        self.base_args = base_args;
        self
    }

    /// Extra time a `wait` child gets beyond its own `--timeout` before it is killed
    pub fn with_command_grace(mut self, command_grace: Duration) -> Self {
        self.command_grace = command_grace;
        self
    }

    /// Run one kubectl invocation and return its raw stdout
    async fn run(
        &self,
        operation: &str,
        args: Vec<OsString>,
        deadline: Option<Duration>,
    ) -> ClusterResult<Vec<u8>> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        info!(
            operation,
            command = %self.render(&args),
            "Running command"
        );

        let output = match deadline {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| ClusterError::Timeout {
                    operation: operation.to_string(),
                    timeout: limit,
                })?,
            None => cmd.output().await,
        }
        .map_err(|source| ClusterError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !stderr.trim().is_empty() {
            debug!(operation, stderr = %stderr.trim(), "Command wrote to stderr");
        }

        if !output.status.success() {
            return Err(ClusterError::CommandFailed {
                operation: operation.to_string(),
                status: output.status.code(),
                kind: FailureKind::classify(&stderr),
                stderr,
            });
        }

        Ok(output.stdout)
    }

    fn render(&self, args: &[OsString]) -> String {
        std::iter::once(self.program.clone())
            .chain(self.base_args.iter().cloned())
            .chain(args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn args<const N: usize>(parts: [&str; N]) -> Vec<OsString> {
    parts.iter().map(OsString::from).collect()
}

fn with_path(mut args: Vec<OsString>, path: &Path) -> Vec<OsString> {
    args.push(path.as_os_str().to_os_string());
    args
}

#[async_trait]
impl ClusterClient for KubectlClient {
    async fn apply_namespace(&self, path: &Path) -> ClusterResult<()> {
        self.run("apply namespace", with_path(args(["apply", "-f"]), path), None)
            .await
            .map(|_| ())
    }

    async fn set_active_namespace(&self, name: &str) -> ClusterResult<()> {
        let namespace = format!("--namespace={}", name);
        self.run(
            "set active namespace",
            args(["config", "set-context", "--current", &namespace]),
            None,
        )
        .await
        .map(|_| ())
    }

    async fn create_config_object(&self, name: &str, source_folder: &Path) -> ClusterResult<()> {
        let mut from_file = OsString::from("--from-file=");
        from_file.push(source_folder.as_os_str());

        let mut create = args(["create", "configmap", name]);
        create.push(from_file);
        self.run("create configmap", create, None).await.map(|_| ())
    }

    async fn delete_config_object(&self, name: &str) -> ClusterResult<()> {
        self.run("delete configmap", args(["delete", "configmap", name]), None)
            .await
            .map(|_| ())
    }

    async fn delete_resource(&self, path: &Path) -> ClusterResult<()> {
        self.run("delete resource", with_path(args(["delete", "-f"]), path), None)
            .await
            .map(|_| ())
    }

    async fn apply_resource(&self, path: &Path) -> ClusterResult<()> {
        self.run("apply resource", with_path(args(["apply", "-f"]), path), None)
            .await
            .map(|_| ())
    }

    async fn wait_for_condition(
        &self,
        target: &WaitTarget,
        condition: &str,
        timeout: Duration,
    ) -> ClusterResult<()> {
        let mut wait = args(["wait"]);
        match target {
            WaitTarget::Selector { resource, selector } => {
                wait.extend(args([resource.as_str(), "--selector", selector.as_str()]));
            }
            WaitTarget::Named(resource) => wait.push(OsString::from(resource)),
        }
        wait.push(format!("--for=condition={}", condition).into());
        wait.push(format!("--timeout={}s", timeout.as_secs()).into());

        self.run(
            "wait for condition",
            wait,
            Some(timeout + self.command_grace),
        )
        .await
        .map(|_| ())
    }

    async fn get_formatted(&self, query: &ResourceQuery) -> ClusterResult<Vec<u8>> {
        let output = format!("-o={}", query.output);
        self.run("get", args(["get", query.resource.as_str(), &output]), None)
            .await
    }

    async fn get_logs(&self, target: &LogTarget) -> ClusterResult<Vec<u8>> {
        let mut logs = args(["logs", target.resource.as_str()]);
        if let Some(container) = &target.container {
            logs.push(OsString::from(container));
        }
        self.run("logs", logs, None).await
    }
}
