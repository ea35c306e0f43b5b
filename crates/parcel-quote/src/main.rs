//! parcel-quote binary
//!
//! Quote, confirm, and inspect parcel shipments from the command line.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{commands::Command, config::QuoteConfig};

#[derive(Debug, Parser)]
#[command(name = "parcel-quote", version, about = "Parcel shipment quotes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean on stdout
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    info!("parcel-quote v{}", parcel_common::VERSION);

    let config = QuoteConfig::load()?;
    debug!("Loaded configuration: {:?}", config);

    let output = commands::run(&cli.command, &config)?;
    println!("{output}");
    Ok(())
}
