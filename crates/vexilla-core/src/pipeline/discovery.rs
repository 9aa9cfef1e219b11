//! File discovery for finding PNG images in a source directory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PipelineError, PipelineResult};

/// Extension accepted by discovery, compared case-insensitively.
const PNG_EXTENSION: &str = "png";

/// Discovers PNG files directly inside a directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDiscovery;

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// File name without directory
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new() -> Self {
        Self
    }

    /// Discover all PNG files directly inside `dir`.
    ///
    /// Only regular files one level deep are returned (symlinks are followed,
    /// subdirectories are not entered). The result is sorted by file name.
    ///
    /// Fails with [`PipelineError::DirectoryNotFound`] if `dir` is missing or
    /// unreadable, and with [`PipelineError::EmptyInputSet`] if nothing matches.
    pub fn discover(&self, dir: &Path) -> PipelineResult<Vec<DiscoveredFile>> {
        if !dir.is_dir() {
            let message = if dir.exists() {
                "not a directory"
            } else {
                "no such directory"
            };
            return Err(PipelineError::DirectoryNotFound {
                path: resolve(dir),
                message: message.to_string(),
            });
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(PipelineError::DirectoryNotFound {
                        path: resolve(dir),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };

            if !entry.file_type().is_file() || !Self::is_supported(entry.path()) {
                continue;
            }

            let name = match entry.file_name().to_str() {
                Some(name) => name.to_string(),
                None => {
                    tracing::warn!("Non UTF-8 file name: {:?}", entry.file_name());
                    entry.file_name().to_string_lossy().into_owned()
                }
            };
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

            files.push(DiscoveredFile {
                name,
                path: entry.into_path(),
                size,
            });
        }

        if files.is_empty() {
            return Err(PipelineError::EmptyInputSet {
                path: resolve(dir),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!("Discovered {} PNG files in {:?}", files.len(), dir);
        Ok(files)
    }

    /// Check if a file has a `.png` extension (any case).
    fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(PNG_EXTENSION))
            .unwrap_or(false)
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}

/// Absolute form of `dir` for diagnostics.
fn resolve(dir: &Path) -> PathBuf {
    std::fs::canonicalize(dir)
        .or_else(|_| std::path::absolute(dir))
        .unwrap_or_else(|_| dir.to_path_buf())
}
