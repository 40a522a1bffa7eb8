// THEORY:
// The `pipeline` module is the top-level API of the converter. It wires the
// core modules into one pass over a directory tree:
//
//   walk_files -> TrackFilter -> decode -> find_borders -> RoadDocument::save
//
// Files are handled strictly one after another. The first decode or I/O
// failure ends the whole batch and is returned to the caller; there is no
// per-file recovery.

use crate::config::RoadConfig;
use crate::core_modules::border_detector::border_detector::{DetectorConfig, find_borders};
use crate::core_modules::dir_walker::walk_files;
use crate::core_modules::road_document::{ROAD_EXTENSION, RoadDocument};
use crate::core_modules::track_filter::TrackFilter;
use crate::error::{Result, RoadError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// Re-export key data structures for the public API.
pub use crate::core_modules::border_detector::border_detector::{BorderSample, BorderScan};
pub use crate::core_modules::road_document::EmptyTrack;

/// What happened to a single converted image.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Written {
        output: PathBuf,
        samples: usize,
        dropped_rows: usize,
    },
    /// No border was found and the config asks to skip such images.
    SkippedEmpty,
}

/// Totals for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub files_seen: usize,
    pub files_converted: usize,
    pub files_skipped_empty: usize,
    pub samples_written: usize,
}

pub struct ConversionPipeline {
    config: RoadConfig,
    detector: DetectorConfig,
    filter: TrackFilter,
}

impl ConversionPipeline {
    pub fn new(config: RoadConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            detector: config.detector(),
            filter: config.track_filter(),
            config,
        })
    }

    pub fn config(&self) -> &RoadConfig {
        &self.config
    }

    /// Where the road document for `image_path` is written.
    pub fn output_path(image_path: &Path) -> PathBuf {
        image_path.with_extension(ROAD_EXTENSION)
    }

    /// Decodes `path` and scans it without writing anything.
    pub fn scan_file(&self, path: &Path) -> Result<BorderScan> {
        let image = image::open(path)
            .map_err(|source| RoadError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        Ok(find_borders(&image, &self.detector))
    }

    /// Converts one image into its `.road` file.
    pub fn convert_file(&self, path: &Path) -> Result<FileOutcome> {
        info!("Analyze file: {}", path.display());
        let scan = self.scan_file(path)?;

        let output = Self::output_path(path);
        let Some(document) =
            RoadDocument::from_scan(self.config.scale(), &scan, self.config.empty_track)
        else {
            warn!("No road border found in {}, no output written", path.display());
            Self::remove_stale_output(&output)?;
            return Ok(FileOutcome::SkippedEmpty);
        };

        if scan.samples.is_empty() {
            warn!("No road border found in {}, writing zero pin only", path.display());
        }

        info!("Write output file: {}", output.display());
        document.save(&output)?;

        Ok(FileOutcome::Written {
            output,
            samples: scan.samples.len(),
            dropped_rows: scan.dropped_rows.len(),
        })
    }

    /// A skipped image must not keep the `.road` file of an earlier run.
    fn remove_stale_output(output: &Path) -> Result<()> {
        match std::fs::remove_file(output) {
            Ok(()) => {
                info!("Removed stale output file: {}", output.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RoadError::io(output, e)),
        }
    }

    /// Converts every track image below `root`. Stops at the first error.
    pub fn run(&self, root: &Path) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for entry in walk_files(root) {
            let path = entry?;
            summary.files_seen += 1;

            if !self.filter.accepts(&path) {
                debug!("Skipping {}", path.display());
                continue;
            }

            match self.convert_file(&path)? {
                FileOutcome::Written { samples, .. } => {
                    summary.files_converted += 1;
                    summary.samples_written += samples;
                }
                FileOutcome::SkippedEmpty => summary.files_skipped_empty += 1,
            }
        }

        info!(
            files_seen = summary.files_seen,
            files_converted = summary.files_converted,
            files_skipped_empty = summary.files_skipped_empty,
            samples_written = summary.samples_written,
            "batch finished"
        );
        Ok(summary)
    }
}
