//! Logging initialisation for perfsweep
//!
//! Every crate in the workspace logs through `tracing`; this crate owns
//! the one place a subscriber gets installed.

pub mod init;

pub use init::{build_env_filter, init_logging_from_config};
