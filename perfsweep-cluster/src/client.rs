//! Cluster client trait and operation targets

use crate::error::ClusterResult;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// What a wait-for-condition call blocks on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitTarget {
    /// Every resource of a type matching a label selector, e.g. `pods` / `app=mbei-component`
    Selector { resource: String, selector: String },
    /// One named resource, e.g. `job.batch/perftest-job`
    Named(String),
}

impl WaitTarget {
    pub fn pods(selector: impl Into<String>) -> Self {
        WaitTarget::Selector {
            resource: "pods".to_string(),
            selector: selector.into(),
        }
    }

    pub fn named(resource: impl Into<String>) -> Self {
        WaitTarget::Named(resource.into())
    }
}

impl fmt::Display for WaitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitTarget::Selector { resource, selector } => write!(f, "{} ({})", resource, selector),
            WaitTarget::Named(resource) => f.write_str(resource),
        }
    }
}

/// A read-only `get` with an explicit output format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceQuery {
    pub resource: String,
    pub output: String,
}

impl ResourceQuery {
    pub fn custom_columns(resource: impl Into<String>, columns: &str) -> Self {
        Self {
            resource: resource.into(),
            output: format!("custom-columns={}", columns),
        }
    }
}

/// Whose logs to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub resource: String,
    pub container: Option<String>,
}

impl LogTarget {
    /// Aggregate logs of a resource such as a job
    pub fn resource(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            container: None,
        }
    }

    /// Logs of one container in one pod
    pub fn container(pod: &str, container: impl Into<String>) -> Self {
        Self {
            resource: format!("pod/{}", pod),
            container: Some(container.into()),
        }
    }
}

impl fmt::Display for LogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.container {
            Some(container) => write!(f, "{} [{}]", self.resource, container),
            None => f.write_str(&self.resource),
        }
    }
}

/// Cluster-control operations the sweep relies on.
///
/// Every call runs to completion (or timeout) before returning; the
/// sweep never has more than one outstanding.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Apply a namespace manifest; applying an existing namespace succeeds
    async fn apply_namespace(&self, path: &Path) -> ClusterResult<()>;

    /// Scope all subsequent operations to `name`
    async fn set_active_namespace(&self, name: &str) -> ClusterResult<()>;

    /// Create a config object from every file in `source_folder`; fails if it exists
    async fn create_config_object(&self, name: &str, source_folder: &Path) -> ClusterResult<()>;

    async fn delete_config_object(&self, name: &str) -> ClusterResult<()>;

    /// Delete every resource described by the manifest at `path`
    async fn delete_resource(&self, path: &Path) -> ClusterResult<()>;

    async fn apply_resource(&self, path: &Path) -> ClusterResult<()>;

    /// Block until `condition` holds on `target` or `timeout` elapses
    async fn wait_for_condition(
        &self,
        target: &WaitTarget,
        condition: &str,
        timeout: Duration,
    ) -> ClusterResult<()>;

    /// Standard output of a formatted `get`, byte for byte
    async fn get_formatted(&self, query: &ResourceQuery) -> ClusterResult<Vec<u8>>;

    /// Logs of `target`, byte for byte
    async fn get_logs(&self, target: &LogTarget) -> ClusterResult<Vec<u8>>;
}
