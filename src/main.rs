//! blocgen - Blocklist compiler for kernel packet-filter ad blockers.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use blocgen::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    // Diagnostics go to stderr by default; --log-file routes them to a file
    // so the primary output stays clean.
    let builder = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time();

    match cli.log_file {
        Some(ref path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let subscriber = builder.with_writer(Arc::new(file)).with_ansi(false).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    match cli.command {
        Commands::Compile {
            input,
            output,
            whitelist,
            timeout,
        } => blocgen::commands::compile::run(&input, &output, whitelist.as_deref(), timeout).await,
        Commands::Stats {
            json,
            counters,
            snapshot,
        } => blocgen::commands::stats::run(&counters, &snapshot, json).await,
        Commands::Version => {
            println!("blocgen {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
