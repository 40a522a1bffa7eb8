// THEORY:
// This file is the entry point for the `road_bounds` library crate. It exposes
// `ConversionPipeline` and `RoadConfig` as the high-level interface used by the
// command line runner, and keeps the building blocks (`core_modules`) public
// for callers that want to scan a single image or read a `.road` file back.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod pipeline;

pub use config::{RoadConfig, load_config};
pub use error::RoadError;
pub use pipeline::{BatchSummary, ConversionPipeline, FileOutcome};
