//! Configuration management for Vexilla.
//!
//! Configuration is loaded from the platform config directory when a file
//! exists there; otherwise the defaults reproduce the original fixed layout
//! (`state_flags_png_1024/state_flags_png` in, `outputs/` out, 128px thumbnails).

mod types;
mod validate;

pub use types::*;
pub use validate::MAX_THUMBNAIL_SIZE;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Vexilla.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source and output locations
    pub general: GeneralConfig,

    /// Per-file failure policy
    pub processing: ProcessingConfig,

    /// Average-color report settings
    pub report: ReportConfig,

    /// Thumbnail generation settings
    pub thumbnail: ThumbnailConfig,

    /// Color clustering settings
    pub clusters: ClusterConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.vexilla.vexilla/config.toml
    /// - Linux: ~/.config/vexilla/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\vexilla\config\config.toml
    ///
    /// Falls back to ~/.vexilla/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "vexilla", "vexilla")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".vexilla").join("config.toml")
            })
    }

    /// Resolved source directory (with ~ expansion).
    pub fn source_dir(&self) -> PathBuf {
        expand(&self.general.source_dir)
    }

    /// Resolved output directory (with ~ expansion).
    pub fn output_dir(&self) -> PathBuf {
        expand(&self.general.output_dir)
    }

    /// Path of the JSON average-color report.
    pub fn json_path(&self) -> PathBuf {
        self.output_dir().join(&self.report.json_file)
    }

    /// Path of the CSV average-color report.
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir().join(&self.report.csv_file)
    }

    /// Directory thumbnails are written into.
    pub fn thumbnail_dir(&self) -> PathBuf {
        self.output_dir().join(&self.thumbnail.dir_name)
    }

    /// Path of the cluster report.
    pub fn clusters_path(&self) -> PathBuf {
        self.output_dir().join(&self.clusters.json_file)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn expand(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}
