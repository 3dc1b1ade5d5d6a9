//! Fatal error classes that abort a compilation run.
//!
//! Everything else (per-entry resolution failures in particular) is local:
//! counted, logged, and reported in the end-of-run summary.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FatalError {
    /// The rule file is absent or unreadable. Nothing is emitted.
    #[error("Input file {0}: {1}")]
    Input(PathBuf, std::io::Error),

    /// The output directory cannot be created.
    #[error("Output directory {0}: {1}")]
    Output(PathBuf, std::io::Error),
}
