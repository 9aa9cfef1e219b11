//! Pipeline orchestration: discovery, per-file transform, and sinks for the
//! average-color and thumbnail runs, plus clustering of the color report.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::output::{read_report, write_json_file, write_report, ReportFormat};
use crate::types::{
    AverageColorReport, Centroid, ClusterMember, ClusterReport, ColorCluster, ColorRecord,
    FileFailure, ThumbnailReport,
};

use super::average::{round_to_decimals, ColorAverager, CHANNEL_DECIMALS};
use super::cluster::ColorClusterer;
use super::decode::ImageDecoder;
use super::discovery::{DiscoveredFile, FileDiscovery};
use super::thumbnail::ThumbnailGenerator;

/// Runs both pipelines over the files of one source directory.
pub struct ImageProcessor {
    config: Config,
    discovery: FileDiscovery,
    decoder: ImageDecoder,
    averager: ColorAverager,
    thumbnail_gen: ThumbnailGenerator,
    clusterer: ColorClusterer,
}

impl ImageProcessor {
    /// Create a new image processor with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            discovery: FileDiscovery::new(),
            decoder: ImageDecoder::new(),
            averager: ColorAverager::new(),
            thumbnail_gen: ThumbnailGenerator::new(config.thumbnail.clone()),
            clusterer: ColorClusterer::new(&config.clusters),
        }
    }

    /// Discover the PNG files of the configured source directory.
    pub fn discover(&self) -> PipelineResult<Vec<DiscoveredFile>> {
        self.discovery.discover(&self.config.source_dir())
    }

    /// Decode one file and compute its color record.
    pub fn average_file(&self, file: &DiscoveredFile) -> PipelineResult<ColorRecord> {
        let start = std::time::Instant::now();
        let decoded = self.decoder.decode(&file.path)?;
        let record = self.averager.record(&file.name, &decoded.image);
        tracing::debug!(
            "Averaged {:?} ({}x{}) in {:?}",
            file.name,
            decoded.width,
            decoded.height,
            start.elapsed()
        );
        Ok(record)
    }

    /// Decode one file and write its thumbnail into `dest_dir`.
    ///
    /// Returns the path of the written thumbnail.
    pub fn thumbnail_file(
        &self,
        file: &DiscoveredFile,
        dest_dir: &Path,
    ) -> PipelineResult<PathBuf> {
        let start = std::time::Instant::now();
        let decoded = self.decoder.decode(&file.path)?;
        let out_path = dest_dir.join(&file.name);
        self.thumbnail_gen.write(&decoded.image, &out_path)?;
        tracing::debug!(
            "Thumbnail for {:?} ({}x{}) in {:?}",
            file.name,
            decoded.width,
            decoded.height,
            start.elapsed()
        );
        Ok(out_path)
    }

    /// Average every file, then write the JSON and CSV reports.
    ///
    /// `on_file` is called after each file, successful or not. Reports are
    /// only written once the whole batch is done; when failing fast, nothing
    /// is written if any file fails.
    pub fn average_colors<F>(
        &self,
        files: &[DiscoveredFile],
        mut on_file: F,
    ) -> PipelineResult<AverageColorReport>
    where
        F: FnMut(&DiscoveredFile),
    {
        let mut records = Vec::with_capacity(files.len());
        let mut failures = Vec::new();

        for file in files {
            let result = self.average_file(file);
            on_file(file);
            match result {
                Ok(record) => records.push(record),
                Err(e) => self.handle_failure(file, e, &mut failures)?,
            }
        }

        let json_path = self.config.json_path();
        let csv_path = self.config.csv_path();
        write_report(&json_path, &records, ReportFormat::Json)?;
        write_report(&csv_path, &records, ReportFormat::Csv)?;
        tracing::info!("Wrote {} color records", records.len());

        Ok(AverageColorReport {
            records,
            json_path,
            csv_path,
            failures,
        })
    }

    /// Write a thumbnail for every file, one at a time.
    ///
    /// Each thumbnail is on disk before the next file is decoded, so earlier
    /// thumbnails survive a later failure.
    pub fn generate_thumbnails<F>(
        &self,
        files: &[DiscoveredFile],
        mut on_file: F,
    ) -> PipelineResult<ThumbnailReport>
    where
        F: FnMut(&DiscoveredFile),
    {
        let output_dir = self.config.thumbnail_dir();
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| PipelineError::write(&output_dir, e))?;

        let mut created = Vec::with_capacity(files.len());
        let mut failures = Vec::new();

        for file in files {
            let result = self.thumbnail_file(file, &output_dir);
            on_file(file);
            match result {
                Ok(_) => created.push(file.name.clone()),
                Err(e) => self.handle_failure(file, e, &mut failures)?,
            }
        }

        tracing::info!("Wrote {} thumbnails to {:?}", created.len(), output_dir);
        Ok(ThumbnailReport {
            created,
            output_dir,
            failures,
        })
    }

    /// Cluster the records of the JSON color report and write the cluster report.
    pub fn cluster_colors(&self) -> PipelineResult<ClusterReport> {
        let source = self.config.json_path();
        let records = read_report(&source)?;
        if records.is_empty() {
            return Err(PipelineError::NoRecords { path: source });
        }
        tracing::info!("Clustering {} colors from {:?}", records.len(), source);

        let mut report = self.cluster_records(&records);
        report.path = self.config.clusters_path();
        write_json_file(&report.path, &report)?;
        tracing::info!("Wrote {} clusters to {:?}", report.k, report.path);
        Ok(report)
    }

    /// Group `records` by color with k-means.
    ///
    /// The returned report's `path` is left empty.
    pub fn cluster_records(&self, records: &[ColorRecord]) -> ClusterReport {
        let points: Vec<[f64; 3]> = records.iter().map(|r| [r.r, r.g, r.b]).collect();
        let clustering = self.clusterer.cluster(&points);

        let clusters = clustering
            .centroids
            .iter()
            .enumerate()
            .map(|(index, &centroid)| {
                let [r, g, b] = centroid.map(|c| round_to_decimals(c, CHANNEL_DECIMALS));
                ColorCluster {
                    centroid: Centroid { r, g, b },
                    members: clustering
                        .members(index)
                        .map(|i| self.member(&records[i]))
                        .collect(),
                }
            })
            .collect();

        ClusterReport {
            k: clustering.centroids.len(),
            seed: self.config.clusters.seed,
            iterations: clustering.iterations,
            clusters,
            path: PathBuf::new(),
        }
    }

    fn member(&self, record: &ColorRecord) -> ClusterMember {
        ClusterMember {
            file: record.file.clone(),
            thumbnail: format!("{}/{}", self.config.thumbnail.dir_name, record.file),
        }
    }

    /// Propagate `err` when failing fast; otherwise record it and carry on.
    fn handle_failure(
        &self,
        file: &DiscoveredFile,
        err: PipelineError,
        failures: &mut Vec<FileFailure>,
    ) -> PipelineResult<()> {
        if self.config.processing.fail_fast {
            return Err(err);
        }
        tracing::error!("Failed: {:?} - {}", file.path, err);
        failures.push(FileFailure {
            path: file.path.clone(),
            message: err.to_string(),
        });
        Ok(())
    }

    /// Canvas edge length of generated thumbnails.
    pub fn thumbnail_size(&self) -> u32 {
        self.thumbnail_gen.size()
    }
}
