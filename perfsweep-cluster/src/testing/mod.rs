//! Testing utilities for perfsweep-cluster
//!
//! Requires the `testing` feature:
//!
//! ```toml
//! [dev-dependencies]
//! perfsweep-cluster = { path = "../perfsweep-cluster", features = ["testing"] }
//! ```

pub mod mocks;

pub use mocks::MockCluster;
