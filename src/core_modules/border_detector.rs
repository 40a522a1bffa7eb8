// THEORY:
// The `BorderDetector` turns a decoded track background into a list of road
// border samples. It is a stateless utility: one image in, one `BorderScan` out,
// no memory of previous images.
//
// Algorithm:
// 1.  **Row selection**: candidate rows start at the bottom pixel row (native
//     y = height - 1) and step upwards by `scan_interval` while y >= 1. Row 0 is
//     never scanned. In the game's coordinate space (0, 0) is the bottom left
//     corner, so walking native rows bottom-up walks the track from its start.
// 2.  **Left edge**: the first pixel from the left whose color is within
//     tolerance of the asphalt color.
// 3.  **Right edge**: the first matching pixel scanning back from the right
//     edge of the image, stopping just before the left edge.
// 4.  **Coordinate flip**: the recorded row is `height - y`, the distance from
//     the image's top edge in the game's flipped space.
//
// A row with a left edge but no right edge is resolved by `MissingRightBorder`.

use crate::core_modules::pixel::pixel::{BorderColor, Pixel, Tolerance};

pub mod border_detector {
    use super::*;
    use image::RgbaImage;
    use serde::Deserialize;
    use tracing::{debug, trace, warn};

    /// What to do with a row where a left border was found but no right border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
    #[serde(rename_all = "kebab-case")]
    pub enum MissingRightBorder {
        /// Emit no sample for the row.
        #[default]
        Drop,
        /// Emit a degenerate sample with `right == left`.
        SinglePixel,
    }

    /// Detector tunables, extracted from `RoadConfig`.
    #[derive(Debug, Clone, Copy)]
    pub struct DetectorConfig {
        pub scan_interval: u32,
        pub color_tolerance: Tolerance,
        pub target_color: BorderColor,
        pub missing_right_border: MissingRightBorder,
    }

    /// One scanned row with a detected road.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BorderSample {
        /// `image_height - native_y`.
        pub row: u32,
        pub left: u32,
        pub right: u32,
    }

    /// The result of scanning a single image.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct BorderScan {
        pub image_width: u32,
        pub image_height: u32,
        /// Samples in scan order.
        pub samples: Vec<BorderSample>,
        /// Native rows that had a left border but no right border and were dropped.
        pub dropped_rows: Vec<u32>,
    }

    impl BorderScan {
        pub fn last(&self) -> Option<&BorderSample> {
            self.samples.last()
        }
    }

    /// Native y coordinates of the rows to scan, in scan order.
    pub fn scan_rows(image_height: u32, scan_interval: u32) -> impl Iterator<Item = u32> {
        (1..image_height).rev().step_by(scan_interval.max(1) as usize)
    }

    /// Scans `image` and returns every border sample found.
    pub fn find_borders(image: &RgbaImage, config: &DetectorConfig) -> BorderScan {
        let (width, height) = image.dimensions();
        let matches = |x: u32, y: u32| {
            Pixel::from(image.get_pixel(x, y))
                .matches(&config.target_color, config.color_tolerance)
        };

        let mut samples = Vec::new();
        let mut dropped_rows = Vec::new();

        for y in scan_rows(height, config.scan_interval) {
            let Some(left) = (0..width).find(|&x| matches(x, y)) else {
                trace!(y, "no left border");
                continue;
            };

            let right = ((left + 1)..width).rev().find(|&x| matches(x, y));
            let right = match (right, config.missing_right_border) {
                (Some(right), _) => right,
                (None, MissingRightBorder::SinglePixel) => {
                    debug!(y, left, "no right border, recording single pixel sample");
                    left
                }
                (None, MissingRightBorder::Drop) => {
                    warn!(y, left, "left border without right border, row dropped");
                    dropped_rows.push(y);
                    continue;
                }
            };

            let sample = BorderSample {
                row: height - y,
                left,
                right,
            };
            debug!(?sample, "border found");
            samples.push(sample);
        }

        BorderScan {
            image_width: width,
            image_height: height,
            samples,
            dropped_rows,
        }
    }
}
