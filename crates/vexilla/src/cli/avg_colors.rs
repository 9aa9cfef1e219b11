//! The `vexilla avg-colors` command.

use clap::Args;
use std::time::{Duration, Instant};
use vexilla_core::pipeline::FileDiscovery;
use vexilla_core::{AverageColorReport, Config, ImageProcessor};

use super::{check_failures, create_progress_bar, RunArgs};

/// Arguments for the `avg-colors` command.
#[derive(Args, Debug)]
pub struct AvgColorsArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

/// Execute the avg-colors command.
pub fn execute(args: AvgColorsArgs, mut config: Config) -> anyhow::Result<()> {
    args.run.apply(&mut config);
    config.validate()?;

    let processor = ImageProcessor::new(&config);
    let files = processor.discover()?;
    tracing::info!(
        "Found {} PNG files ({} bytes) in {:?}",
        files.len(),
        FileDiscovery::total_size(&files),
        config.source_dir()
    );

    let progress = create_progress_bar(files.len() as u64);
    let start = Instant::now();
    let result = processor.average_colors(&files, |file| {
        progress.set_message(file.name.clone());
        progress.inc(1);
    });
    progress.finish_and_clear();
    let report = result?;

    print_summary(&report, config.report.sample_size, start.elapsed())?;
    check_failures(&report.failures, files.len())
}

/// Print the processed count, artifact paths and the first records.
fn print_summary(
    report: &AverageColorReport,
    sample_size: usize,
    elapsed: Duration,
) -> anyhow::Result<()> {
    println!("Processed {} images", report.records.len());
    println!(
        "Wrote: {} and {}",
        report.json_path.display(),
        report.csv_path.display()
    );
    println!("Sample (first {sample_size}):");
    for record in report.records.iter().take(sample_size) {
        println!("{}", serde_json::to_string(record)?);
    }
    tracing::debug!("Average-color run took {:?}", elapsed);
    Ok(())
}
