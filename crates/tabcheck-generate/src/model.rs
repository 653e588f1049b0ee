use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The three shipped case suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteKind {
    Pairwise,
    Random,
    Negative,
}

impl SuiteKind {
    pub const ALL: [SuiteKind; 3] = [SuiteKind::Pairwise, SuiteKind::Random, SuiteKind::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            SuiteKind::Pairwise => "pairwise",
            SuiteKind::Random => "random",
            SuiteKind::Negative => "negative",
        }
    }

    /// Default case file, relative to the data directory.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            SuiteKind::Pairwise => "pairwise_tests.txt",
            SuiteKind::Random => "random_tests.csv",
            SuiteKind::Negative => "negative_tests.csv",
        }
    }

    pub fn default_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.default_file_name())
    }

    /// Pairwise suites are written tab-separated, the others comma-separated.
    pub fn default_delimiter(&self) -> u8 {
        match self {
            SuiteKind::Pairwise => b'\t',
            SuiteKind::Random | SuiteKind::Negative => b',',
        }
    }
}

impl std::fmt::Display for SuiteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pairwise interaction coverage of a set of combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCoverage {
    /// Level pairs that occur in at least one valid combination.
    pub required: usize,
    /// Required pairs present in the suite.
    pub covered: usize,
}

impl PairCoverage {
    pub fn is_complete(&self) -> bool {
        self.covered >= self.required
    }

    pub fn fraction(&self) -> f64 {
        if self.required == 0 {
            1.0
        } else {
            self.covered as f64 / self.required as f64
        }
    }
}

/// Summary of a written suite file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub kind: SuiteKind,
    pub path: PathBuf,
    pub cases: usize,
    pub valid_cases: usize,
    pub invalid_cases: usize,
    pub coverage: PairCoverage,
    pub bytes_written: u64,
    /// sha256 of the written file.
    pub fingerprint: String,
}
