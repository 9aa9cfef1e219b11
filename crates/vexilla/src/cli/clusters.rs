//! The `vexilla clusters` command.

use clap::Args;
use std::path::PathBuf;
use vexilla_core::{ClusterReport, Config, ImageProcessor};

/// Arguments for the `clusters` command.
#[derive(Args, Debug, Default)]
pub struct ClustersArgs {
    /// Output root directory holding the color report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of clusters
    #[arg(short)]
    pub k: Option<usize>,

    /// Seed for choosing the initial centroids
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of k-means iterations
    #[arg(long)]
    pub max_iterations: Option<usize>,
}

impl ClustersArgs {
    /// Apply the overrides on top of the loaded configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.general.output_dir = output.clone();
        }
        if let Some(k) = self.k {
            config.clusters.k = k;
        }
        if let Some(seed) = self.seed {
            config.clusters.seed = seed;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.clusters.max_iterations = max_iterations;
        }
    }
}

/// Execute the clusters command.
pub fn execute(args: ClustersArgs, mut config: Config) -> anyhow::Result<()> {
    args.apply(&mut config);
    config.validate()?;

    let report = ImageProcessor::new(&config).cluster_colors()?;
    print_summary(&report);
    Ok(())
}

/// Print one line per cluster: centroid, then member files.
fn print_summary(report: &ClusterReport) {
    println!(
        "Clustered into {} groups after {} iterations (seed {})",
        report.k, report.iterations, report.seed
    );
    println!("Wrote: {}", report.path.display());
    for (index, cluster) in report.clusters.iter().enumerate() {
        let files: Vec<&str> = cluster.members.iter().map(|m| m.file.as_str()).collect();
        println!(
            "Cluster {} ({}, {}, {}): {}",
            index + 1,
            cluster.centroid.r,
            cluster.centroid.g,
            cluster.centroid.b,
            files.join(", ")
        );
    }
}
