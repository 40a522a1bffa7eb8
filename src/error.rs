// THEORY:
// Every failure the converter can hit funnels into `RoadError`. Decoding and
// I/O failures carry the path that caused them so the batch abort message
// points at the offending file. Rows without a border are not errors and never
// show up here.

use std::path::PathBuf;

/// Errors raised while loading configuration, converting images or reading
/// road documents back.
#[derive(Debug, thiserror::Error)]
pub enum RoadError {
    #[error("failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("malformed road document at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl RoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RoadError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RoadError>;
