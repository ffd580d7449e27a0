#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the route safety analyzer.
//!
//! Reads a route description (points, POIs, metadata) from JSON, runs
//! the full analysis pipeline, and writes the resulting
//! `RouteAnalysis` as JSON to stdout or a file. Pass `--seed` to make
//! the simulated traffic and hazard draws reproducible.

use std::fs;
use std::path::PathBuf;

use chrono::Timelike as _;
use clap::Parser;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng as _;
use route_safety_analysis::{AnalysisConfig, RouteInput, analyze_route};

/// Analyze a planned heavy-vehicle route for safety risks.
#[derive(Parser)]
#[command(name = "route-safety")]
#[command(about = "Analyze a planned heavy-vehicle route for safety risks")]
struct Cli {
    /// Path to the route input JSON (points, POIs, metadata).
    #[arg(long)]
    route: PathBuf,

    /// TOML file overriding the default analysis policy.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the simulation RNG. Omitted means a fresh entropy
    /// seed, i.e. a different simulation every run.
    #[arg(long)]
    seed: Option<u64>,

    /// Departure hour of day (0-23). Overrides the route metadata;
    /// defaults to the current local hour.
    #[arg(long)]
    hour: Option<u8>,

    /// Write the analysis JSON here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,
}

/// Errors surfaced to the user by the CLI.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Reading the route file or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The route input is not valid JSON for the expected schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] route_safety_analysis::ConfigError),
}

/// Departure hour resolution: the `--hour` flag wins, then the route
/// metadata, then the current local hour. Always wrapped into 0-23.
fn resolve_hour(flag: Option<u8>, metadata: Option<u8>) -> u8 {
    flag.or(metadata).unwrap_or_else(current_hour) % 24
}

fn current_hour() -> u8 {
    u8::try_from(chrono::Local::now().hour()).unwrap_or(0)
}

fn main() -> Result<(), CliError> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_toml_path(path)?,
        None => AnalysisConfig::default(),
    };

    let input: RouteInput = serde_json::from_str(&fs::read_to_string(&cli.route)?)?;

    let hour = resolve_hour(cli.hour, input.metadata.departure_hour);

    let mut rng = cli.seed.map_or_else(
        ChaCha8Rng::from_entropy,
        ChaCha8Rng::seed_from_u64,
    );
    if let Some(seed) = cli.seed {
        log::info!("using fixed RNG seed {seed}");
    }

    let analysis = analyze_route(&input, hour, &config, &mut rng);

    let json = if cli.pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, json)?;
            log::info!("wrote analysis to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
