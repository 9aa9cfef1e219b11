//! Image processing pipeline components.
//!
//! - **discovery**: Find PNG files directly inside the source directory
//! - **decode**: Load and decode images
//! - **average**: Mean RGB color per image
//! - **thumbnail**: Square PNG thumbnails on a white canvas
//! - **cluster**: K-means grouping of average colors
//! - **processor**: Orchestrates both pipelines

pub mod average;
pub mod cluster;
pub mod decode;
pub mod discovery;
pub mod processor;
pub mod thumbnail;

// Re-exports for convenient access
pub use average::ColorAverager;
pub use cluster::{Clustering, ColorClusterer};
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use processor::ImageProcessor;
pub use thumbnail::ThumbnailGenerator;
