//! merge-images - stack images into a single file.

mod cli;

use std::process;

use clap::Parser;
use tracing::{debug, Level};

use merge_images::config::{self, Config};
use merge_images::{MergeEngine, MergeError};

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), MergeError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = if cli.config.is_some() {
        Config::load_required(&config_path)
    } else {
        Config::load(&config_path)
    }
    .map_err(MergeError::Config)?;
    debug!(path = %config_path.display(), "loaded config");

    let options = cli.merge_options(config.default_options());
    let engine = MergeEngine::from_config(&config);

    let result = engine.merge(&cli.images, &options).await?;

    if cli.json {
        let json = serde_json::to_string(&result).map_err(|e| MergeError::Encode(e.to_string()))?;
        println!("{json}");
    }
    eprintln!("Saved: {} ({}x{})", result.path.display(), result.width, result.height);

    Ok(())
}
