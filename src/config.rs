// THEORY:
// All tunables of the converter live in one immutable `RoadConfig`. It is built
// once at startup (defaults, then an optional TOML file, then CLI overrides),
// validated, and handed to the pipeline by reference. Nothing is read from
// process-wide globals.

use crate::core_modules::border_detector::border_detector::{DetectorConfig, MissingRightBorder};
use crate::core_modules::pixel::pixel::{BorderColor, Tolerance};
use crate::core_modules::road_document::EmptyTrack;
use crate::core_modules::track_filter::TrackFilter;
use crate::error::{Result, RoadError};
use serde::Deserialize;
use std::path::Path;

/// Default vertical distance in pixels between scanned rows.
pub const DEFAULT_SCAN_INTERVAL: u32 = 100;
/// Default per-channel color tolerance.
pub const DEFAULT_COLOR_TOLERANCE: Tolerance = 20;
pub const DEFAULT_TRACK_PREFIX: &str = "background_";
pub const DEFAULT_TRACK_EXTENSION: &str = ".png";

/// Configuration for the conversion pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoadConfig {
    /// Interval between the y coordinates of sampled road border points.
    pub scan_interval: u32,
    /// Maximum (exclusive) per-channel difference between target and sample.
    pub color_tolerance: Tolerance,
    /// Asphalt color marking the road.
    pub target_color: BorderColor,
    /// File name prefix identifying track background images.
    pub track_prefix: String,
    /// File name extension of track background images, including the dot.
    pub track_extension: String,
    /// Must match the scale factor of the background image inside the game.
    pub scale_x: f64,
    pub scale_y: f64,
    pub missing_right_border: MissingRightBorder,
    pub empty_track: EmptyTrack,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            scan_interval: DEFAULT_SCAN_INTERVAL,
            color_tolerance: DEFAULT_COLOR_TOLERANCE,
            target_color: BorderColor::ASPHALT,
            track_prefix: DEFAULT_TRACK_PREFIX.to_string(),
            track_extension: DEFAULT_TRACK_EXTENSION.to_string(),
            scale_x: 1.0,
            scale_y: 1.0,
            missing_right_border: MissingRightBorder::default(),
            empty_track: EmptyTrack::default(),
        }
    }
}

impl RoadConfig {
    pub fn validate(&self) -> Result<()> {
        if self.scan_interval == 0 {
            return Err(RoadError::InvalidConfig(
                "scan_interval must be greater than zero".to_string(),
            ));
        }
        if self.color_tolerance == 0 {
            return Err(RoadError::InvalidConfig(
                "color_tolerance must be greater than zero, no pixel could match".to_string(),
            ));
        }
        if self.track_extension.is_empty() {
            return Err(RoadError::InvalidConfig(
                "track_extension must not be empty".to_string(),
            ));
        }
        for (name, value) in [("scale_x", self.scale_x), ("scale_y", self.scale_y)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RoadError::InvalidConfig(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn detector(&self) -> DetectorConfig {
        DetectorConfig {
            scan_interval: self.scan_interval,
            color_tolerance: self.color_tolerance,
            target_color: self.target_color,
            missing_right_border: self.missing_right_border,
        }
    }

    pub fn track_filter(&self) -> TrackFilter {
        TrackFilter::new(&self.track_prefix, &self.track_extension)
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }
}

/// Reads a TOML config file. Keys missing from the file keep their defaults.
pub fn load_config(path: &Path) -> Result<RoadConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| RoadError::io(path, e))?;
    let config: RoadConfig = toml::from_str(&contents).map_err(|source| RoadError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config)
}
