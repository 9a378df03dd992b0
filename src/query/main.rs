//! Query driver.
//!
//! Initializes the proximity service for one city profile (running
//! preprocessing if no cached artifact exists) and prints the two figures
//! for a label coordinate.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use wayside::cache::ArtifactCache;
use wayside::config::Config;
use wayside::ProximityService;

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Compute intersection proximity for a label coordinate")]
struct Args {
    /// Config file with city profiles
    #[arg(short, long, default_value = "wayside.toml")]
    config: PathBuf,

    /// City profile to query against
    #[arg(short, long)]
    profile: String,

    /// Label latitude
    lat: f64,

    /// Label longitude
    lng: f64,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = Config::load_from_file(&args.config)?;
    let profile = config.profiles.get(&args.profile).with_context(|| {
        format!(
            "profile '{}' not found in {}",
            args.profile,
            args.config.display()
        )
    })?;

    let cache = ArtifactCache::new(&config.cache_dir);
    let service = ProximityService::initialize(profile, &cache, false)?;

    let result = service.compute_proximity(args.lat, args.lng)?;
    println!(
        "distance_to_segment_end: {:.2} m",
        result.distance_to_segment_end
    );
    println!("middleness_pct: {:.1}", result.middleness_pct);

    Ok(())
}
