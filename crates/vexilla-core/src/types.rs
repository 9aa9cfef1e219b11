//! Core data types produced by the Vexilla pipelines.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Normalized average color of one image.
///
/// Field order is the serialized key order: `file`, `r`, `g`, `b`.
/// Channels lie in `[0, 1]` and are rounded to 6 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRecord {
    /// Source file basename, byte-identical to the file on disk
    pub file: String,

    /// Mean red channel
    pub r: f64,

    /// Mean green channel
    pub g: f64,

    /// Mean blue channel
    pub b: f64,
}

/// A file that could not be processed when the batch keeps going.
#[derive(Debug, Clone)]
pub struct FileFailure {
    /// Path of the failing source file
    pub path: PathBuf,

    /// Rendered error message
    pub message: String,
}

/// Result of an average-color run.
#[derive(Debug, Clone)]
pub struct AverageColorReport {
    /// One record per successfully processed image, in discovery order
    pub records: Vec<ColorRecord>,

    /// Where the JSON report was written
    pub json_path: PathBuf,

    /// Where the CSV report was written
    pub csv_path: PathBuf,

    /// Files skipped because they failed (always empty when failing fast)
    pub failures: Vec<FileFailure>,
}

/// Result of a thumbnail run.
#[derive(Debug, Clone)]
pub struct ThumbnailReport {
    /// File names of the thumbnails written, in discovery order
    pub created: Vec<String>,

    /// Directory the thumbnails were written into
    pub output_dir: PathBuf,

    /// Files skipped because they failed (always empty when failing fast)
    pub failures: Vec<FileFailure>,
}

/// An RGB point in the cluster report, rounded like [`ColorRecord`] channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// One image assigned to a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterMember {
    /// Source file basename, as in the color report
    pub file: String,

    /// Thumbnail path relative to the output directory
    pub thumbnail: String,
}

/// One k-means cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorCluster {
    /// Mean color of the members; empty clusters keep their last centroid
    pub centroid: Centroid,

    /// Members in color-report order
    pub members: Vec<ClusterMember>,
}

/// Result of a clustering run, serialized as the cluster report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReport {
    /// Number of clusters produced
    pub k: usize,

    /// Seed used to pick the initial centroids
    pub seed: u64,

    /// Assign/update rounds performed
    pub iterations: usize,

    /// Clusters in index order
    pub clusters: Vec<ColorCluster>,

    /// Where the report was written
    #[serde(skip)]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_record_key_order() {
        let record = ColorRecord {
            file: "alabama.png".to_string(),
            r: 1.0,
            g: 0.5,
            b: 0.0,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"file":"alabama.png","r":1.0,"g":0.5,"b":0.0}"#);
    }
}
