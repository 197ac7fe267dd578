//! Binary crate for the `hike` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive preference entry
//! - The forecast view (loading indicator, error banner, daily cards)

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
