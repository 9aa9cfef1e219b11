//! Configuration validation.

use crate::error::ConfigError;

use super::Config;

/// Largest accepted thumbnail canvas edge, in pixels.
pub const MAX_THUMBNAIL_SIZE: u32 = 8192;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnail.size == 0 {
            return Err(ConfigError::ValidationError(
                "thumbnail.size must be > 0".into(),
            ));
        }
        if self.thumbnail.size > MAX_THUMBNAIL_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "thumbnail.size must be at most {MAX_THUMBNAIL_SIZE} (got {})",
                self.thumbnail.size
            )));
        }
        if self.clusters.k == 0 {
            return Err(ConfigError::ValidationError(
                "clusters.k must be > 0".into(),
            ));
        }
        if self.clusters.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "clusters.max_iterations must be > 0".into(),
            ));
        }
        for (key, name) in [
            ("report.json_file", &self.report.json_file),
            ("report.csv_file", &self.report.csv_file),
            ("thumbnail.dir_name", &self.thumbnail.dir_name),
            ("clusters.json_file", &self.clusters.json_file),
        ] {
            if name.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{key} must not be empty"
                )));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(ConfigError::ValidationError(format!(
                    "{key} must be a plain name, got {name:?}"
                )));
            }
        }
        if self.report.json_file == self.report.csv_file {
            return Err(ConfigError::ValidationError(
                "report.json_file and report.csv_file must differ".into(),
            ));
        }
        if self.clusters.json_file == self.report.json_file
            || self.clusters.json_file == self.report.csv_file
        {
            return Err(ConfigError::ValidationError(
                "clusters.json_file must differ from the report files".into(),
            ));
        }
        if !matches!(
            self.logging.level.as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of error, warn, info, debug, trace (got {:?})",
                self.logging.level
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\" (got {:?})",
                self.logging.format
            )));
        }
        Ok(())
    }
}
