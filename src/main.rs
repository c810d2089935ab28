use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bevy::prelude::*;
use clap::Parser;
use starfall_core::GalaxyConfig;
use starfall_render::plugin::StarfallRenderPlugin;
use starfall_sensor::{Profile, ReplaySource};
use starfall_sim::pipeline::SensorSource;
use starfall_sim::{Galaxy, SensorLink, SimulationPlugin};

#[derive(Parser, Debug)]
#[command(about = "Glowing starfield of bouncing particles driven by a depth sensor")]
struct Args {
    /// JSON file with galaxy settings; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of stars
    #[arg(long)]
    stars: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Replay recorded sensor messages (one JSON object per line)
    #[arg(long)]
    sensor_replay: Option<PathBuf>,

    /// Use a scrolling sine ridge for the synthetic sensor
    #[arg(long)]
    wave: bool,

    /// Pause between sensor acquisitions
    #[arg(long, default_value_t = 33)]
    sensor_interval_ms: u64,

    /// Start the sensor feed right away instead of waiting for [S]
    #[arg(long)]
    sensor_on: bool,
}

// load here to keep main clean
fn load_config(args: &Args) -> Result<GalaxyConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening config {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GalaxyConfig::default(),
    };
    if let Some(stars) = args.stars {
        config.star_count = stars;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn sensor_link(args: &Args) -> Result<SensorLink> {
    let source = match &args.sensor_replay {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening sensor recording {}", path.display()))?;
            let replay = ReplaySource::from_reader(BufReader::new(file))
                .with_context(|| format!("reading sensor recording {}", path.display()))?;
            SensorSource::Replay(replay)
        }
        None if args.wave => SensorSource::Synthetic(Profile::Wave),
        None => SensorSource::Synthetic(Profile::Flat),
    };
    let mut link = SensorLink::new(source, Duration::from_millis(args.sensor_interval_ms));
    if args.sensor_on {
        link.start().context("starting sensor feed")?;
    }
    Ok(link)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    let galaxy = Galaxy::from_config(config).context("building galaxy")?;
    let link = sensor_link(&args)?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Starfall".into(),
                resolution: (1920.0, 1080.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(galaxy)
        .insert_resource(link)
        .add_plugins(SimulationPlugin)
        .add_plugins(StarfallRenderPlugin)
        .run();

    Ok(())
}
