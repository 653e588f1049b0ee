//! Delimited case-file loading.

use std::path::Path;

use tracing::{debug, warn};

use crate::combination::Combination;
use crate::error::{Error, Result};

/// How a missing case file is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// A missing file yields zero cases.
    #[default]
    Soft,
    /// A missing file is an error.
    Strict,
}

/// Pick tab when the first line has more tabs than commas, comma otherwise.
pub fn detect_delimiter(first_line: &str) -> u8 {
    let tabs = first_line.matches('\t').count();
    let commas = first_line.matches(',').count();
    if tabs > commas { b'\t' } else { b',' }
}

/// Load every row of a case file as a [`Combination`].
pub fn load_cases(path: &Path, mode: LoadMode) -> Result<Vec<Combination>> {
    if !path.exists() {
        return match mode {
            LoadMode::Soft => {
                warn!(path = %path.display(), "case file not found, no cases loaded");
                Ok(Vec::new())
            }
            LoadMode::Strict => Err(Error::NotFound(path.to_path_buf())),
        };
    }

    let contents = std::fs::read_to_string(path)?;
    let cases = read_cases(&contents)?;
    debug!(path = %path.display(), cases = cases.len(), "case file loaded");
    Ok(cases)
}

/// Parse case rows from file contents.
///
/// The first record names the columns. Short rows leave trailing columns
/// absent; extra fields past the header are ignored.
pub fn read_cases(contents: &str) -> Result<Vec<Combination>> {
    let first_line = contents.lines().next().unwrap_or_default();
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers = reader.headers()?.clone();
    let mut cases = Vec::new();
    for record in reader.records() {
        let record = record?;
        cases.push(Combination::from_pairs(
            headers.iter().zip(record.iter()),
        ));
    }
    Ok(cases)
}
