//! Command implementations and the helpers they share.

pub mod avg_colors;
pub mod clusters;
pub mod config;
pub mod thumbnails;

use clap::Args;
use std::path::PathBuf;
use vexilla_core::{Config, FileFailure, PipelineError};

/// Source/output overrides and failure policy shared by both pipelines.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Directory containing the PNG images (not searched recursively)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Output root directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip files that fail and report them at the end instead of aborting
    #[arg(long)]
    pub keep_going: bool,
}

impl RunArgs {
    /// Apply the overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(source) = &self.source {
            config.general.source_dir = source.clone();
        }
        if let Some(output) = &self.output {
            config.general.output_dir = output.clone();
        }
        if self.keep_going {
            config.processing.fail_fast = false;
        }
    }
}

/// Create a progress bar for per-file processing.
///
/// Per-file debug logs share stderr with the bar, so the bar stays hidden
/// while debug logging is enabled.
pub(crate) fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    progress_bar(total, tracing::enabled!(tracing::Level::DEBUG))
}

fn progress_bar(total: u64, hidden: bool) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}

/// Print skipped files and turn them into a batch error.
pub(crate) fn check_failures(failures: &[FileFailure], total: usize) -> anyhow::Result<()> {
    if failures.is_empty() {
        return Ok(());
    }

    eprintln!("Failed ({}):", failures.len());
    for failure in failures {
        eprintln!("  {}: {}", failure.path.display(), failure.message);
    }
    Err(PipelineError::BatchFailed {
        failed: failures.len(),
        total,
    }
    .into())
}
