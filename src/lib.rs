//! # blocgen - Blocklist Compiler for Kernel Packet-Filter Ad Blockers
//!
//! A one-shot batch tool that turns a human-edited list of domains and
//! addresses into the compact source/header artifact a kernel-level
//! packet-filtering engine compiles against.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                       blocgen                          │
//! ├────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                            │
//! │    └── Commands: compile, stats, version               │
//! ├────────────────────────────────────────────────────────┤
//! │  Rule parser                                           │
//! │    └── one entry per line, # comments, blanks dropped  │
//! ├────────────────────────────────────────────────────────┤
//! │  Whitelist matcher (regex-compiled globs)              │
//! │    └── *.example.com wildcards + exact matches         │
//! ├────────────────────────────────────────────────────────┤
//! │  Resolver (dns-lookup + tokio timeout)                 │
//! │    └── literal pass-through, full A-record expansion   │
//! ├────────────────────────────────────────────────────────┤
//! │  Emitter                                               │
//! │    └── __u32 array + domain array + size constants     │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use blocgen::builder;
//! use blocgen::emitter;
//! use blocgen::resolver::SystemResolver;
//! use blocgen::whitelist::Whitelist;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let rules = std::fs::read_to_string("blocklist.txt")?;
//!     let whitelist = Whitelist::load(Some(Path::new("whitelist.txt")))?;
//!     let resolver = SystemResolver::default();
//!
//!     let result = builder::build(&rules, &whitelist, &resolver).await;
//!     emitter::emit(&result, Path::new("src/ip_blacklist.c"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`builder`] - Orchestration: parse, filter, resolve, aggregate
//! - [`cli`] - Command-line interface definitions
//! - [`codec`] - Dotted-quad <-> canonical 32-bit address conversion
//! - [`commands`] - CLI command implementations
//! - [`emitter`] - Source/header artifact serialization
//! - [`error`] - Fatal error taxonomy
//! - [`resolver`] - Name resolution with timeout
//! - [`rules`] - Rule file parsing
//! - [`stats`] - Runtime counter file and rate snapshots
//! - [`utils`] - Formatting helpers
//! - [`whitelist`] - Glob/exact exclusion patterns

pub mod builder;
pub mod cli;
pub mod codec;
pub mod commands;
pub mod emitter;
pub mod error;
pub mod resolver;
pub mod rules;
pub mod stats;
pub mod utils;
pub mod whitelist;

pub use cli::{Cli, Commands};
