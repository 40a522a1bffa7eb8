// THEORY:
// A road document is the text file the game loads to know where the road is on
// a track background:
//
//     <scaleFactorX> <scaleFactorY>
//     <row> <leftX> <rightX>
//     ...
//     <imageHeight> <lastLeftX> <lastRightX>
//
// The last line pins the final boundary point to the full image height by
// repeating the last detected edges. When nothing was detected, `EmptyTrack`
// decides between writing an explicit `0 0` pin and writing no file at all.
//
// Scale factors always carry a fractional part (`1.0`, not `1`) because that is
// what existing `.road` files contain.

use crate::core_modules::border_detector::border_detector::{BorderSample, BorderScan};
use crate::error::{Result, RoadError};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const ROAD_EXTENSION: &str = "road";

/// What to write for an image where no border sample was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyTrack {
    /// Write the header and a final `<height> 0 0` line.
    #[default]
    PinZero,
    /// Write nothing for that image.
    Skip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadDocument {
    pub scale_x: f64,
    pub scale_y: f64,
    pub samples: Vec<BorderSample>,
    /// The final line; its row is the image height.
    pub end: BorderSample,
}

impl RoadDocument {
    /// Builds the document for `scan`. Returns `None` when the scan is empty
    /// and `empty` is [`EmptyTrack::Skip`].
    pub fn from_scan(scale: (f64, f64), scan: &BorderScan, empty: EmptyTrack) -> Option<Self> {
        let (left, right) = match (scan.last(), empty) {
            (Some(last), _) => (last.left, last.right),
            (None, EmptyTrack::PinZero) => (0, 0),
            (None, EmptyTrack::Skip) => return None,
        };

        Some(Self {
            scale_x: scale.0,
            scale_y: scale.1,
            samples: scan.samples.clone(),
            end: BorderSample {
                row: scan.image_height,
                left,
                right,
            },
        })
    }

    pub fn image_height(&self) -> u32 {
        self.end.row
    }

    /// Number of lines the rendered document has.
    pub fn line_count(&self) -> usize {
        self.samples.len() + 2
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        write!(writer, "{self}")?;
        writer.flush()
    }

    /// Creates or truncates `path` and writes the document into it.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| RoadError::io(path, e))?;
        self.write_to(BufWriter::new(file)).map_err(|e| RoadError::io(path, e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| RoadError::io(path, e))?;
        Self::parse(&text)
    }

    /// Parses the text form back. Blank lines are ignored and `\r\n` endings
    /// are accepted.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .split('\n')
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) = lines.next().ok_or_else(|| RoadError::Parse {
            line: 1,
            message: "empty document".to_string(),
        })?;
        let [scale_x, scale_y] = parse_fields::<f64, 2>(header_line, header)?;

        let mut rows = Vec::new();
        for (number, line) in lines {
            let [row, left, right] = parse_fields::<u32, 3>(number, line)?;
            rows.push(BorderSample { row, left, right });
        }

        let end = rows.pop().ok_or_else(|| RoadError::Parse {
            line: header_line + 1,
            message: "missing final image height line".to_string(),
        })?;

        Ok(Self {
            scale_x,
            scale_y,
            samples: rows,
            end,
        })
    }
}

fn parse_fields<T, const N: usize>(line: usize, text: &str) -> Result<[T; N]>
where
    T: std::str::FromStr + Copy + Default,
    T::Err: fmt::Display,
{
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != N {
        return Err(RoadError::Parse {
            line,
            message: format!("expected {N} fields, found {}", tokens.len()),
        });
    }

    let mut fields = [T::default(); N];
    for (field, token) in fields.iter_mut().zip(tokens) {
        *field = token.parse().map_err(|e| RoadError::Parse {
            line,
            message: format!("invalid number {token:?}: {e}"),
        })?;
    }
    Ok(fields)
}

/// Renders `value` with a fractional part, e.g. `1.0` rather than `1`.
pub fn format_scale(value: f64) -> String {
    format!("{value:?}")
}

impl fmt::Display for RoadDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", format_scale(self.scale_x), format_scale(self.scale_y))?;
        for sample in self.samples.iter().chain(std::iter::once(&self.end)) {
            writeln!(f, "{} {} {}", sample.row, sample.left, sample.right)?;
        }
        Ok(())
    }
}
