//! Image decoding with content-based format detection.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::path::Path;

use crate::error::PipelineError;

/// Synchronous image decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

/// Result of decoding an image.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Open and fully decode the image at `path`.
    ///
    /// The file handle is dropped before this returns, on success and on error.
    pub fn decode(&self, path: &Path) -> Result<DecodedImage, PipelineError> {
        let reader = image::ImageReader::open(path)
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot open file: {}", e),
            })?
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;

        let format = reader.format().ok_or_else(|| PipelineError::Decode {
            path: path.to_path_buf(),
            message: "Unrecognized image format".to_string(),
        })?;

        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        tracing::trace!("Decoded {:?} as {:?} ({}x{})", path, format, width, height);
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }
}
