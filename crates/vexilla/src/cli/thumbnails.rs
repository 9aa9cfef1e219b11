//! The `vexilla thumbnails` command.

use clap::Args;
use std::time::Instant;
use vexilla_core::{Config, ImageProcessor, ThumbnailReport};

use super::{check_failures, create_progress_bar, RunArgs};

/// Arguments for the `thumbnails` command.
#[derive(Args, Debug, Default)]
pub struct ThumbnailsArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Thumbnail edge length in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Enlarge images smaller than the thumbnail to fill it
    #[arg(long)]
    pub upscale: bool,
}

impl ThumbnailsArgs {
    /// Apply the overrides on top of the loaded configuration.
    fn apply(&self, config: &mut Config) {
        self.run.apply(config);
        if let Some(size) = self.size {
            config.thumbnail.size = size;
        }
        if self.upscale {
            config.thumbnail.upscale = true;
        }
    }
}

/// Execute the thumbnails command.
pub fn execute(args: ThumbnailsArgs, mut config: Config) -> anyhow::Result<()> {
    args.apply(&mut config);
    config.validate()?;

    let processor = ImageProcessor::new(&config);
    let files = processor.discover()?;
    tracing::info!(
        "Generating {}px thumbnails for {} files",
        processor.thumbnail_size(),
        files.len()
    );

    let progress = create_progress_bar(files.len() as u64);
    let start = Instant::now();
    let result = processor.generate_thumbnails(&files, |file| {
        progress.set_message(file.name.clone());
        progress.inc(1);
    });
    progress.finish_and_clear();
    let report = result?;
    tracing::debug!("Thumbnail run took {:?}", start.elapsed());

    print_summary(&report, config.report.sample_size);
    check_failures(&report.failures, files.len())
}

/// Print the thumbnail count, directory and the first file names.
fn print_summary(report: &ThumbnailReport, sample_size: usize) {
    println!(
        "Created {} thumbnails in: {}",
        report.created.len(),
        report.output_dir.display()
    );
    println!("Sample:");
    for name in report.created.iter().take(sample_size) {
        println!("{name}");
    }
}
