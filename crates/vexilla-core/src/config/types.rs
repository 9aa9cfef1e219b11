//! Sub-configuration structs with defaults matching the original batch scripts.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory scanned (non-recursively) for PNG files
    pub source_dir: PathBuf,

    /// Root directory for reports and thumbnails
    pub output_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("state_flags_png_1024/state_flags_png"),
            output_dir: PathBuf::from("outputs"),
        }
    }
}

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Abort the whole run on the first per-file error.
    ///
    /// When false, failing files are logged and skipped, outputs for the
    /// remaining files are written, and the run reports the failures at the end.
    pub fail_fast: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self { fail_fast: true }
    }
}

/// Average-color report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// JSON report file name, inside the output directory
    pub json_file: String,

    /// CSV report file name, inside the output directory
    pub csv_file: String,

    /// Number of records echoed in the console summary
    pub sample_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            json_file: "avg_colors.json".to_string(),
            csv_file: "avg_colors.csv".to_string(),
            sample_size: 10,
        }
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Canvas edge length in pixels (thumbnails are square)
    pub size: u32,

    /// Thumbnail directory name, inside the output directory
    pub dir_name: String,

    /// Enlarge images smaller than the canvas to fill it
    pub upscale: bool,

    /// Use the slowest, smallest PNG compression setting
    pub optimize: bool,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            size: 128,
            dir_name: "thumbnails".to_string(),
            upscale: false,
            optimize: true,
        }
    }
}

/// Color clustering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Number of clusters
    pub k: usize,

    /// Upper bound on assign/update rounds
    pub max_iterations: usize,

    /// Seed for picking the initial centroids
    pub seed: u64,

    /// Cluster report file name, inside the output directory
    pub json_file: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            k: 4,
            max_iterations: 100,
            seed: 42,
            json_file: "clusters.json".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
