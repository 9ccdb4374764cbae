//! Cluster operation errors

use std::time::Duration;
use thiserror::Error;

pub type ClusterResult<T> = Result<T, ClusterError>;

/// Why a cluster command failed, as far as its stderr tells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The object did not exist
    NotFound,
    /// The object already existed
    AlreadyExists,
    Other,
}

impl FailureKind {
    /// Classify kubectl stderr such as `Error from server (NotFound): ...`.
    ///
    /// Only server reason codes and messages about a quoted object name or
    /// manifest path count; `resource mapping not found` stays [`FailureKind::Other`].
    pub fn classify(stderr: &str) -> Self {
        if stderr.contains("(NotFound)")
            || stderr.contains("\" not found")
            || stderr.contains("\" does not exist")
        {
            FailureKind::NotFound
        } else if stderr.contains("(AlreadyExists)") || stderr.contains("\" already exists") {
            FailureKind::AlreadyExists
        } else {
            FailureKind::Other
        }
    }
}

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("{operation} failed with {}: {}", status_label(.status), .stderr.trim())]
    CommandFailed {
        operation: String,
        status: Option<i32>,
        kind: FailureKind,
        stderr: String,
    },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{operation} did not finish within {timeout:?}")]
    Timeout {
        operation: String,
        timeout: Duration,
    },
}

impl ClusterError {
    /// Exit status of the failed command, when it ran to completion
    pub fn exit_status(&self) -> Option<i32> {
        match self {
            ClusterError::CommandFailed { status, .. } => *status,
            _ => None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ClusterError::CommandFailed { kind, .. } => *kind,
            _ => FailureKind::Other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == FailureKind::NotFound
    }
}

fn status_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_kubectl_stderr() {
        assert_eq!(
            FailureKind::classify(
                r#"Error from server (NotFound): configmaps "component-config" not found"#
            ),
            FailureKind::NotFound
        );
        assert_eq!(
            FailureKind::classify(
                r#"error: failed to create configmap: configmaps "component-config" already exists"#
            ),
            FailureKind::AlreadyExists
        );
        assert_eq!(
            FailureKind::classify("Unable to connect to the server: dial tcp: i/o timeout"),
            FailureKind::Other
        );
    }

    #[test]
    fn test_classify_missing_manifest_path() {
        assert_eq!(
            FailureKind::classify(
                r#"error: the path "/opt/bench/testing-job.yaml" does not exist"#
            ),
            FailureKind::NotFound
        );
    }

    #[test]
    fn test_classify_ignores_unanchored_not_found() {
        assert_eq!(
            FailureKind::classify(
                r#"error: resource mapping not found for name: "mbei-component" namespace: "" from "mbei-component.yaml": no matches for kind "StatefulSet" in version "apps/v2""#
            ),
            FailureKind::Other
        );
    }

    #[test]
    fn test_error_accessors() {
        let err = ClusterError::CommandFailed {
            operation: "delete configmap".to_string(),
            status: Some(1),
            kind: FailureKind::NotFound,
            stderr: "not found\n".to_string(),
        };
        assert_eq!(err.exit_status(), Some(1));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "delete configmap failed with exit status 1: not found");

        let err = ClusterError::Timeout {
            operation: "wait".to_string(),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(err.exit_status(), None);
        assert!(!err.is_not_found());
    }
}
