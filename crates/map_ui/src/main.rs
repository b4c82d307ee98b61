//! Desktop host for the ride map and promo map widgets.
mod app;
mod ui;

use std::path::{Path, PathBuf};

use clap::Parser;
use map_core::config::{WidgetsConfig, CONFIG_FILE_NAME};

/// SwiftRide landing page maps
#[derive(Parser, Debug)]
#[command(name = "map_ui")]
#[command(about = "Ride map and promo map on the desktop", long_about = None)]
#[command(version)]
struct Args {
    /// Widget config file; missing files fall back to defaults
    #[arg(long, env = "RIDE_MAPS_CONFIG", default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Seed for the simulated fleet (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Pretend the user is at this latitude (requires --lng)
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Pretend the user is at this longitude (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args);
    ui::app_shell::run(config)
}

fn load_config(args: &Args) -> WidgetsConfig {
    let mut config = read_config_or_default(&args.config);
    if let Some(seed) = args.seed {
        config.ride_map = config.ride_map.with_seed(seed);
    }
    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        let location = map_core::geo::Location::new(lat, lng);
        if location.is_finite() {
            config.user_location = Some(location);
        } else {
            tracing::warn!(lat, lng, "ignoring non-finite user location");
        }
    }
    config
}

fn read_config_or_default(path: &Path) -> WidgetsConfig {
    match WidgetsConfig::load(path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "config loaded");
            config
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            WidgetsConfig::default()
        }
    }
}
