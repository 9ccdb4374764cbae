//! CLI argument parsing definitions

use clap::Parser;
use std::path::PathBuf;

/// Run the full benchmark sweep over every (cluster size, scenario size) pair
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Directory relative manifest and folder paths are resolved against
    #[arg(long, value_name = "PATH")]
    pub base_dir: Option<PathBuf>,

    /// Replica counts to sweep, ascending (example: --cluster-sizes 3,6)
    #[arg(long, value_name = "SIZES", value_delimiter = ',')]
    pub cluster_sizes: Option<Vec<u32>>,

    /// Scenario sizes to sweep, ascending (example: --scenario-sizes 4,8,16)
    #[arg(long, value_name = "SIZES", value_delimiter = ',')]
    pub scenario_sizes: Option<Vec<u32>>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    pub print_config: bool,
}
