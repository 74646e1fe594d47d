use anyhow::{Context, Result};
use clap::Parser;
use shadowcast::draw::{DrawConfig, draw_scene, start_session};
use shadowcast::io::{FootprintSink, GeoJsonFile, sample_footprints};
use shadowcast::{HeightStrategy, Pipeline, ShadowConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ground shadows of extruded building footprints.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// GeoJSON footprints to read. Sample data is generated when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Where the sample data is written
    #[arg(long, default_value = "data/buildings.geojson")]
    output: PathBuf,

    /// Sun azimuth in degrees from north, clockwise
    #[arg(long, allow_hyphen_values = true)]
    azimuth: Option<f64>,

    /// Sun altitude in degrees above the horizon
    #[arg(long, allow_hyphen_values = true)]
    altitude: Option<f64>,

    /// Seed of the random height generator
    #[arg(long)]
    seed: Option<u64>,

    /// Skip drawing the scene in the Rerun viewer
    #[arg(long)]
    no_draw: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ShadowConfig::from_file(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?,
        None => ShadowConfig::new(),
    };
    if let Some(azimuth) = args.azimuth {
        config.sun.azimuth = azimuth;
    }
    if let Some(altitude) = args.altitude {
        config.sun.altitude = altitude;
    }
    if let (Some(seed), HeightStrategy::Random { min, max, .. }) = (args.seed, config.heights) {
        config.heights = HeightStrategy::Random { min, max, seed };
    }

    let source = match &args.input {
        Some(path) => GeoJsonFile::new(path),
        None => {
            info!("Generating sample building data...");
            let sink = GeoJsonFile::new(&args.output);
            sink.save(&sample_footprints()?)
                .with_context(|| format!("Failed to write: {}", args.output.display()))?;
            sink
        }
    };

    let report = Pipeline::new(config).run(&source)?;
    for (b, shadow) in report.buildings.iter().zip(report.shadows.iter()) {
        info!("Shadow {}: {:?}", b.id, shadow.vertices());
    }
    for s in report.skipped.iter() {
        info!("Skipped building {} ({:?}): {}", s.index, s.id, s.error);
    }

    if !args.no_draw {
        info!("Visualizing buildings, shadows, and sun position in 3D...");
        let draw_config = DrawConfig::new();
        let session = start_session(&draw_config)?;
        draw_scene(&session, &report.scene, &draw_config)?;
        info!("Visualization complete.");
    }

    Ok(())
}
