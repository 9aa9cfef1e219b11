//! Vexilla CLI - average-color reports and square thumbnails for a directory
//! of PNG flag images.
//!
//! # Usage
//!
//! ```bash
//! # Write outputs/avg_colors.json and outputs/avg_colors.csv
//! vexilla avg-colors
//!
//! # Write outputs/thumbnails/<name>.png, 128x128 on white
//! vexilla thumbnails
//!
//! # Group the colors of outputs/avg_colors.json into outputs/clusters.json
//! vexilla clusters -k 4 --seed 42
//!
//! # Point at another directory and canvas size
//! vexilla thumbnails --source ./flags --size 256
//!
//! # View configuration
//! vexilla config show
//! ```
//!
//! Exit status is 0 on success, 3 when the source directory holds no PNG
//! files, and 1 on any other error.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vexilla_core::{Config, PipelineError};

mod cli;
mod logging;

/// Exit status for a source directory without PNG files.
const EXIT_NO_INPUT: u8 = 3;

/// Vexilla - average colors and thumbnails for PNG flag images.
#[derive(Parser, Debug)]
#[command(name = "vexilla")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(short, long, global = true, env = "VEXILLA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute each image's average RGB color and write JSON/CSV reports
    AvgColors(cli::avg_colors::AvgColorsArgs),

    /// Generate square thumbnails centered on a white background
    Thumbnails(cli::thumbnails::ThumbnailsArgs),

    /// Group the average colors into k-means clusters
    Clusters(cli::clusters::ClustersArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config problems go straight to stderr.
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Vexilla v{}", vexilla_core::VERSION);

    let result = match cli.command {
        Commands::AvgColors(args) => cli::avg_colors::execute(args, config),
        Commands::Thumbnails(args) => cli::thumbnails::execute(args, config),
        Commands::Clusters(args) => cli::clusters::execute(args, config),
        Commands::Config(args) => cli::config::execute(args, &config, cli.config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => exit_code_for(&e),
    }
}

/// Load the explicit config file, or the default one with a fallback to defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    use anyhow::Context;

    if let Some(path) = path {
        return Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `vexilla config path`."
            );
            Ok(Config::default())
        }
    }
}

/// Report `err` and pick the process exit status.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if let Some(PipelineError::EmptyInputSet { .. }) = err.downcast_ref::<PipelineError>() {
        // Nothing to do: a normal early exit, not a crash.
        println!("{err}");
        return ExitCode::from(EXIT_NO_INPUT);
    }
    eprintln!("Error: {err:#}");
    ExitCode::FAILURE
}
