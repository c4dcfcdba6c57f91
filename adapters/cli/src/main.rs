#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Hype Type headlessly.

mod session;
mod typist;
mod words;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use hype_type_core::UpgradeCatalog;
use hype_type_world::SessionConfig;
use tracing_subscriber::EnvFilter;

use crate::session::RunOptions;

/// Headless Hype Type runner.
#[derive(Debug, Parser)]
#[command(name = "hype-type", version, about)]
struct Args {
    /// TOML session configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// JSON word list keyed by language and difficulty.
    #[arg(long, value_name = "PATH")]
    words: Option<PathBuf>,
    /// Language to draw words from.
    #[arg(long, default_value = words::BUILT_IN_LANGUAGE)]
    language: String,
    /// Simulated seconds to play.
    #[arg(long, default_value_t = 60)]
    seconds: u32,
    /// Overrides the configured seed.
    #[arg(long)]
    seed: Option<u64>,
    /// JSON upgrade catalog; affordable nodes are bought as points arrive.
    #[arg(long, value_name = "PATH")]
    upgrades: Option<PathBuf>,
    /// Wave the run starts at.
    #[arg(long, default_value_t = 1)]
    start_wave: u32,
    /// Typing speed of the scripted player.
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(1..=60))]
    keys_per_second: u32,
}

/// Entry point for the Hype Type command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str::<SessionConfig>(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let words = words::load(args.words.as_deref(), &args.language)?;
    let catalog = args
        .upgrades
        .as_deref()
        .map(|path| -> Result<UpgradeCatalog> {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read upgrades {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid upgrades {}", path.display()))
        })
        .transpose()?;

    tracing::info!(
        seed = config.seed,
        language = %args.language,
        words = words.len(),
        "starting run"
    );
    let options = RunOptions {
        seconds: args.seconds,
        start_wave: args.start_wave,
        keys_per_second: args.keys_per_second,
    };
    let summary = session::run(config, words, catalog, &options)?;
    println!("{summary}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
