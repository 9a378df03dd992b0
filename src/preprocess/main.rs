//! Preprocessing driver.
//!
//! Builds the real-segment artifact for one or more city profiles. Profiles
//! with a matching cached artifact are skipped unless `--force` is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use wayside::cache::ArtifactCache;
use wayside::config::Config;
use wayside::service::preprocess;

#[derive(Parser, Debug)]
#[command(name = "preprocess")]
#[command(about = "Build real street segments for one or more city profiles")]
struct Args {
    /// Config file with city profiles
    #[arg(short, long, default_value = "wayside.toml")]
    config: PathBuf,

    /// City profiles to preprocess
    #[arg(required = true)]
    profiles: Vec<String>,

    /// Rebuild even if a cached artifact exists
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = Config::load_from_file(&args.config)?;
    let cache = ArtifactCache::new(&config.cache_dir);

    for name in &args.profiles {
        let profile = config
            .profiles
            .get(name)
            .with_context(|| format!("profile '{name}' not found in {}", args.config.display()))?;

        let fingerprint = profile.fingerprint();
        if !args.force && cache.contains(&fingerprint) {
            info!("Profile '{name}' already preprocessed ({fingerprint}), skipping");
            continue;
        }

        info!("Preprocessing profile '{name}'...");
        let segments =
            preprocess(profile).with_context(|| format!("preprocessing profile '{name}'"))?;
        cache.store(&fingerprint, &segments)?;
        info!("Finished profile '{name}'");
    }

    Ok(())
}
