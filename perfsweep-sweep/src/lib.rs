//! Sweep controller for perfsweep
//!
//! [`SweepController`] walks the parameter grid and drives every
//! coordinate through the same ordered phase list (see [`phase`]):
//! generate config, publish it, update the workload manifest, recycle
//! the previous deployment, deploy, launch the load job, wait for it,
//! and collect artifacts. The first fatal failure aborts the whole sweep.

pub mod collector;
pub mod controller;
pub mod error;
pub mod generator;
pub mod phase;

pub use collector::ArtifactCollector;
pub use controller::{CompletedRun, SweepController, SweepReport};
pub use error::SweepError;
pub use generator::{ConfigGenerator, GeneratorError, ProcessConfigGenerator};
pub use phase::{FailurePolicy, Phase, PrepareStep, Settle, Step};
