//! CLI entry point for the Flibusta client.

use anyhow::Result;
use clap::Parser;
use flibusta_core::{Config, FlibustaClient};
use tracing::debug;

mod cli;
mod commands;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let config = Config::from_env()?;
    let client = FlibustaClient::new(&config)?;

    match args.command {
        Command::Search { query } => commands::run_search_command(&client, &query).await,
        Command::Info { id } => commands::run_info_command(&client, &id).await,
        Command::Get {
            id,
            format,
            output_dir,
        } => commands::run_get_command(&client, &id, &format, &output_dir).await,
    }
}
