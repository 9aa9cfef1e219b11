//! Error types for the Vexilla pipelines.
//!
//! Errors are organized by stage so messages carry the path that failed and
//! the underlying reason.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Vexilla operations.
#[derive(Error, Debug)]
pub enum VexillaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VexillaError {
    /// The pipeline error wrapped by this error, if any.
    pub fn pipeline(&self) -> Option<&PipelineError> {
        match self {
            Self::Pipeline(e) => Some(e),
            _ => None,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source directory is missing, not a directory, or cannot be listed
    #[error("Source directory not found: {path} ({message})")]
    DirectoryNotFound { path: PathBuf, message: String },

    /// Source directory holds no PNG files
    #[error("No PNG files found in {}", path.display())]
    EmptyInputSet { path: PathBuf },

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Output directory or file could not be created or written
    #[error("Write error for {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// A previously written report could not be read back
    #[error("Cannot read report {path}: {message}")]
    ReportRead { path: PathBuf, message: String },

    /// A color report holds no records to cluster
    #[error("No color records in {}", path.display())]
    NoRecords { path: PathBuf },

    /// Some files failed while the batch was allowed to keep going
    #[error("{failed} of {total} files failed")]
    BatchFailed { failed: usize, total: usize },
}

impl PipelineError {
    /// Wrap an I/O failure on an output path.
    pub fn write(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Write {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Convenience type alias for Vexilla results.
pub type Result<T> = std::result::Result<T, VexillaError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
