use std::path::PathBuf;

use thiserror::Error;

/// Core error type shared across tabcheck crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A case file required by a strict load is missing.
    #[error("case file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The case file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The case file is not valid delimited text.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience alias for results returned by tabcheck crates.
pub type Result<T> = std::result::Result<T, Error>;
