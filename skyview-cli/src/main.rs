//! Binary crate for the `skyview` command-line front end.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Human-friendly output formatting and the periodic-refresh loop

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod display;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
