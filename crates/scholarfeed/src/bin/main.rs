use std::{path::Path, process::ExitCode};

use clap::Parser;
use color_eyre::{Result, eyre::WrapErr};
use libscholarfeed::{
    batch::Batch,
    config::{Config, DEFAULT_CONFIG_PATH},
    fetch::SemanticScholar,
    pacing::FixedDelay,
};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, prelude::*};

use crate::cli::Cli;

mod cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(ErrorLayer::default())
        .init();
    color_eyre::install()?;

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
    };
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    let pacer = if cli.no_delay {
        FixedDelay::none()
    } else {
        FixedDelay::from(&config.pacing)
    };
    let source = SemanticScholar::new(&config)?;
    let batch = Batch::new(config.authors, config.output_dir, source, pacer);

    let report = batch.run().await.wrap_err_with(|| {
        format!(
            "Failed to create output directory {}",
            batch.output_dir().display()
        )
    })?;

    if cli.strict && report.failed() > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
