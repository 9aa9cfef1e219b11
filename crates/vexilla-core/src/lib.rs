//! Vexilla Core - batch pipelines over a directory of PNG flag images.
//!
//! Two independent pipelines share the same discovery and decode stages:
//!
//! ```text
//! Average colors: Discover → Decode → Mean RGB / 255 → avg_colors.json + avg_colors.csv
//! Thumbnails:     Discover → Decode → Fit + center on white S×S → thumbnails/<name>.png
//! Clusters:       avg_colors.json → k-means over RGB → clusters.json
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use vexilla_core::{Config, Vexilla};
//!
//! fn main() -> vexilla_core::Result<()> {
//!     let vexilla = Vexilla::new(Config::load()?);
//!     let report = vexilla.average_colors()?;
//!     println!("Processed {} images", report.records.len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, Result, VexillaError};
pub use output::{ReportFormat, ReportWriter};
pub use pipeline::{DiscoveredFile, ImageProcessor};
pub use types::{
    AverageColorReport, ClusterReport, ColorCluster, ColorRecord, FileFailure, ThumbnailReport,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Vexilla runner - discovers the source directory and runs a whole pipeline.
pub struct Vexilla {
    config: Config,
    processor: ImageProcessor,
}

impl Vexilla {
    /// Create a new Vexilla instance with the given configuration.
    pub fn new(config: Config) -> Self {
        tracing::debug!("Initializing Vexilla v{}", VERSION);
        let processor = ImageProcessor::new(&config);
        Self { config, processor }
    }

    /// Create a new Vexilla instance from the config file (or defaults).
    pub fn with_defaults() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::new(config))
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the average-color pipeline over the source directory.
    pub fn average_colors(&self) -> Result<AverageColorReport> {
        let files = self.processor.discover()?;
        Ok(self.processor.average_colors(&files, |_| {})?)
    }

    /// Run the thumbnail pipeline over the source directory.
    pub fn thumbnails(&self) -> Result<ThumbnailReport> {
        let files = self.processor.discover()?;
        Ok(self.processor.generate_thumbnails(&files, |_| {})?)
    }

    /// Cluster the colors of a previously written average-color report.
    pub fn clusters(&self) -> Result<ClusterReport> {
        Ok(self.processor.cluster_colors()?)
    }
}
