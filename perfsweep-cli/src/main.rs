use anyhow::{Context, Result};
use clap::Parser;
use perfsweep_cluster::KubectlClient;
use perfsweep_config::{ConfigLoader, LogLevel, SweepConfig};
use perfsweep_logging::init_logging_from_config;
use perfsweep_manifest::ManifestSet;
use perfsweep_sweep::{ProcessConfigGenerator, SweepController};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

mod cli;
use cli::Cli;

/// Load configuration from file or use defaults
fn load_config(config_path: Option<&PathBuf>) -> Result<SweepConfig> {
    ConfigLoader::new().load(config_path).with_context(|| match config_path {
        Some(path) => format!("Failed to load configuration from {:?}", path),
        None => "Failed to load configuration from environment".to_string(),
    })
}

/// Command-line flags win over file and environment settings
fn apply_cli_overrides(config: &mut SweepConfig, cli: &Cli) -> Result<()> {
    if let Some(level) = &cli.log_level {
        config.logging.level = level.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    if let Some(sizes) = &cli.cluster_sizes {
        config.grid.cluster_sizes = sizes.clone();
    }
    if let Some(sizes) = &cli.scenario_sizes {
        config.grid.scenario_sizes = sizes.clone();
    }
    if let Some(dir) = &cli.base_dir {
        let dir = if dir.is_absolute() {
            dir.clone()
        } else {
            std::env::current_dir()
                .context("Failed to read current directory")?
                .join(dir)
        };
        config.paths.base_dir = Some(dir);
    }

    config
        .validate_all()
        .context("Invalid configuration after applying command-line flags")
}

/// Directory a relative `paths.base_dir` (or a missing one) is resolved against:
/// the config file's directory, else the directory holding the executable
fn fallback_base_dir(config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        return match parent {
            Some(parent) => Ok(parent.to_path_buf()),
            None => std::env::current_dir().context("Failed to read current directory"),
        };
    }

    let exe = std::env::current_exe().context("Failed to locate the perfsweep executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("Executable path has no parent directory")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    apply_cli_overrides(&mut config, &cli)?;

    if cli.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    init_logging_from_config(&config.logging)?;
    info!("perfsweep starting");
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    let grid = config.grid.to_grid().context("Invalid sweep grid")?;
    let paths = config
        .paths
        .resolve(&fallback_base_dir(cli.config.as_deref())?);
    info!(
        workload_template = %paths.workload_template.display(),
        job_template = %paths.job_template.display(),
        output = %paths.output_folder.display(),
        "Resolved paths"
    );

    let manifests = ManifestSet::load(&paths.workload_template, &paths.job_template)
        .context("Failed to load manifest templates")?;

    let client = KubectlClient::new(&config.cluster.kubectl)
        .with_base_args(config.cluster.kubectl_args.clone())
        .with_command_grace(config.cluster.command_grace);
    let generator = ProcessConfigGenerator::from_config(&config.generator);

    let controller = SweepController::new(
        Arc::new(client),
        Arc::new(generator),
        manifests,
        paths,
        &config,
    );

    match controller.run(&grid).await {
        Ok(report) => {
            for run in &report.completed {
                info!(
                    cluster_size = run.parameter.cluster_size,
                    scenario_size = run.parameter.scenario_size,
                    artifacts = run.artifacts.len(),
                    elapsed_secs = run.elapsed.as_secs(),
                    "Completed"
                );
            }
            info!(
                coordinates = report.completed.len(),
                artifacts = report.artifact_count(),
                elapsed_secs = report.elapsed.as_secs(),
                "Sweep finished"
            );
            Ok(())
        }
        Err(err) => {
            let code = err.exit_code();
            error!(error = %err, exit_code = code, "Sweep aborted");
            std::process::exit(code);
        }
    }
}
