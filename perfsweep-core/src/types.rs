//! Sweep grid, run context and artifact naming

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One coordinate of the sweep grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SweepParameter {
    /// Number of component replicas to deploy
    pub cluster_size: u32,
    /// Size of the generated workload scenario
    pub scenario_size: u32,
}

impl SweepParameter {
    pub fn new(cluster_size: u32, scenario_size: u32) -> Self {
        Self {
            cluster_size,
            scenario_size,
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cluster size {} / scenario size {}",
            self.cluster_size, self.scenario_size
        )
    }
}

/// Cartesian product of cluster sizes and scenario sizes.
///
/// Iteration is outer = cluster size, inner = scenario size, both
/// ascending. Later coordinates reuse namespace state left behind by
/// earlier ones, so the order is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepGrid {
    cluster_sizes: Vec<u32>,
    scenario_sizes: Vec<u32>,
}

impl SweepGrid {
    /// Build a grid, rejecting empty, zero-valued or non-ascending axes
    pub fn new(cluster_sizes: Vec<u32>, scenario_sizes: Vec<u32>) -> Result<Self, GridError> {
        validate_axis("cluster_sizes", &cluster_sizes)?;
        validate_axis("scenario_sizes", &scenario_sizes)?;
        Ok(Self {
            cluster_sizes,
            scenario_sizes,
        })
    }

    pub fn cluster_sizes(&self) -> &[u32] {
        &self.cluster_sizes
    }

    pub fn scenario_sizes(&self) -> &[u32] {
        &self.scenario_sizes
    }

    /// Number of coordinates in the grid
    pub fn len(&self) -> usize {
        self.cluster_sizes.len() * self.scenario_sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the grid in sweep order
    pub fn iter(&self) -> impl Iterator<Item = SweepParameter> + '_ {
        self.cluster_sizes.iter().flat_map(move |&cluster_size| {
            self.scenario_sizes
                .iter()
                .map(move |&scenario_size| SweepParameter::new(cluster_size, scenario_size))
        })
    }
}

fn validate_axis(axis: &'static str, values: &[u32]) -> Result<(), GridError> {
    if values.is_empty() {
        return Err(GridError::EmptyAxis { axis });
    }
    if values.contains(&0) {
        return Err(GridError::ZeroValue { axis });
    }
    for pair in values.windows(2) {
        if pair[1] <= pair[0] {
            return Err(GridError::NotAscending {
                axis,
                previous: pair[0],
                next: pair[1],
            });
        }
    }
    Ok(())
}

/// What an artifact file holds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Node placement table for every pod in the namespace
    PodScheduling,
    /// Aggregate logs of the load-generating job
    Producer,
    /// Container logs of one workload replica
    Replica { workload: String, index: u32 },
}

impl ArtifactKind {
    /// Label used in the artifact file name
    pub fn label(&self) -> String {
        match self {
            ArtifactKind::PodScheduling => "pod-scheduling".to_string(),
            ArtifactKind::Producer => "producer".to_string(),
            ArtifactKind::Replica { workload, index } => format!("{}-{}", workload, index),
        }
    }

    /// Every artifact one iteration at `parameter` produces, in collection order
    pub fn expected_for(parameter: SweepParameter, workload: &str) -> Vec<ArtifactKind> {
        let mut kinds = vec![ArtifactKind::PodScheduling, ArtifactKind::Producer];
        kinds.extend((0..parameter.cluster_size).map(|index| ArtifactKind::Replica {
            workload: workload.to_string(),
            index,
        }));
        kinds
    }
}

/// File name for an artifact: `{cluster_size}-{scenario_size}-{kind}.txt`
pub fn artifact_file_name(parameter: SweepParameter, kind: &ArtifactKind) -> String {
    format!(
        "{}-{}-{}.txt",
        parameter.cluster_size,
        parameter.scenario_size,
        kind.label()
    )
}

/// Per-iteration state, owned by exactly one sweep iteration
#[derive(Debug, Clone)]
pub struct RunContext {
    pub parameter: SweepParameter,
    /// Mutable workload manifest rewritten every iteration
    pub workload_manifest: PathBuf,
    /// Mutable job manifest rewritten every iteration
    pub job_manifest: PathBuf,
    /// Folder the config generator populates
    pub config_folder: PathBuf,
    /// Folder artifacts are written to
    pub output_folder: PathBuf,
}

impl RunContext {
    pub fn artifact_path(&self, kind: &ArtifactKind) -> PathBuf {
        self.output_folder
            .join(artifact_file_name(self.parameter, kind))
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }
}
