//! Cluster client adapter for perfsweep
//!
//! [`ClusterClient`] is the seam between the sweep controller and the
//! cluster: every operation the sweep needs is one typed async call that
//! either succeeds or reports the exit status and stderr of the failed
//! command. [`KubectlClient`] implements it by shelling out to `kubectl`.

pub mod client;
pub mod error;
pub mod kubectl;

#[cfg(feature = "testing")]
pub mod testing;

pub use client::{ClusterClient, LogTarget, ResourceQuery, WaitTarget};
pub use error::{ClusterError, ClusterResult, FailureKind};
pub use kubectl::KubectlClient;
