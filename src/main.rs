use anyhow::{Context, Result};
use clap::Parser;
use road_bounds::core_modules::border_detector::border_detector::MissingRightBorder;
use road_bounds::core_modules::pixel::pixel::BorderColor;
use road_bounds::core_modules::road_document::EmptyTrack;
use road_bounds::{ConversionPipeline, RoadConfig, load_config};
use std::path::PathBuf;

/// Converts track background images into .road border files.
#[derive(Parser, Debug)]
#[command(name = "road_bounds")]
#[command(version)]
struct Cli {
    /// Root directory searched recursively for track images
    root: PathBuf,

    /// TOML file with converter settings; flags below override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Interval in pixels between scanned rows
    #[arg(long, value_name = "PIXELS")]
    interval: Option<u32>,

    /// Per-channel color tolerance (exclusive)
    #[arg(long)]
    tolerance: Option<u8>,

    /// Road border color as R,G,B
    #[arg(long, value_name = "R,G,B")]
    color: Option<BorderColor>,

    /// File name prefix of track images
    #[arg(long)]
    prefix: Option<String>,

    /// File name extension of track images, e.g. .png
    #[arg(long)]
    extension: Option<String>,

    /// Horizontal scale factor written to the header
    #[arg(long)]
    scale_x: Option<f64>,

    /// Vertical scale factor written to the header
    #[arg(long)]
    scale_y: Option<f64>,

    /// Rows with a left border but no right border
    #[arg(long, value_enum)]
    missing_right: Option<MissingRightBorder>,

    /// Images where no border was found at all
    #[arg(long, value_enum)]
    empty: Option<EmptyTrack>,
}

impl Cli {
    fn road_config(&self) -> Result<RoadConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RoadConfig::default(),
        };

        if let Some(interval) = self.interval {
            config.scan_interval = interval;
        }
        if let Some(tolerance) = self.tolerance {
            config.color_tolerance = tolerance;
        }
        if let Some(color) = self.color {
            config.target_color = color;
        }
        if let Some(prefix) = &self.prefix {
            config.track_prefix = prefix.clone();
        }
        if let Some(extension) = &self.extension {
            config.track_extension = extension.clone();
        }
        if let Some(scale_x) = self.scale_x {
            config.scale_x = scale_x;
        }
        if let Some(scale_y) = self.scale_y {
            config.scale_y = scale_y;
        }
        if let Some(policy) = self.missing_right {
            config.missing_right_border = policy;
        }
        if let Some(policy) = self.empty {
            config.empty_track = policy;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let pipeline = ConversionPipeline::new(cli.road_config()?)?;

    pipeline
        .run(&cli.root)
        .with_context(|| format!("Conversion aborted under {}", cli.root.display()))?;

    println!("Done");
    Ok(())
}
