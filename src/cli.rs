//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::resolver::DEFAULT_TIMEOUT_SECS;
use crate::stats::{COUNTERS_FILE, SNAPSHOT_FILE};

#[derive(Parser)]
#[command(name = "blocgen")]
#[command(author, version, about = "Blocklist compiler for kernel packet-filter ad blockers")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write diagnostics to a file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a rule file into the blocklist source/header artifact
    Compile {
        /// Rule file: one domain or dotted-quad address per line
        input: PathBuf,

        /// Output data file; the header is written next to it with a .h extension
        output: PathBuf,

        /// Optional whitelist file of glob/exact exclusion patterns
        whitelist: Option<PathBuf>,

        /// Name resolution timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },

    /// Show runtime blocking statistics from the engine's counter file
    Stats {
        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Counter file written by the packet-filter engine
        #[arg(long, default_value = COUNTERS_FILE)]
        counters: PathBuf,

        /// Previous-sample snapshot used for rate calculation
        #[arg(long, default_value = SNAPSHOT_FILE)]
        snapshot: PathBuf,
    },

    /// Print version information
    Version,
}
