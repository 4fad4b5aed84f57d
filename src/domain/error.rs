//! Fatal error taxonomy for a formatting run.
//!
//! Anything in here stops the run. Per-record problems are not
//! errors; they are counted in `RunStats`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepError {
    /// Input file missing, unreadable, or its header cannot be decoded
    #[error("cannot read input '{path}': {reason}")]
    Input { path: PathBuf, reason: String },

    /// A configured column is not in the header row
    #[error("required column '{column}' not found (available: {})", available.join(", "))]
    MissingColumn { column: String, available: Vec<String> },

    /// Output destination cannot be created or written
    #[error("cannot write output '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rejected configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
