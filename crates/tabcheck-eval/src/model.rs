use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use tabcheck_core::Combination;
use tabcheck_generate::SuiteKind;

use crate::metrics::SuiteMetrics;
use crate::oracle::OraclePolicy;

/// Options for a suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateOptions {
    pub policy: OraclePolicy,
    /// Also fail any case the constraint validator rejects.
    pub require_valid: bool,
    /// Limit the number of failing cases listed in the report.
    pub max_examples: usize,
    /// Emit failures.json with every failing case.
    pub write_failures: bool,
    /// Artifacts go to a fresh run directory under this path when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            policy: OraclePolicy::CrashIsFailure,
            require_valid: false,
            max_examples: 20,
            write_failures: true,
            out_dir: None,
        }
    }
}

impl EvaluateOptions {
    /// Options a shipped suite is run with.
    pub fn for_suite(kind: SuiteKind) -> Self {
        Self {
            policy: OraclePolicy::for_suite(kind),
            require_valid: kind == SuiteKind::Pairwise,
            ..Self::default()
        }
    }
}

/// A single oracle failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub code: String,
    pub message: String,
}

impl Failure {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// What the renderer did with a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum CaseOutcome {
    Rendered { lines: usize, chars: usize },
    Rejected { kind: String, message: String },
}

impl CaseOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, CaseOutcome::Rendered { .. })
    }
}

/// Result of one case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    /// Zero-based position in the suite.
    pub index: usize,
    pub combination: Combination,
    pub valid: bool,
    pub reason: String,
    pub outcome: CaseOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<Failure>,
    pub elapsed_us: u128,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of a suite run.
#[derive(Debug, Clone)]
pub struct SuiteResult {
    pub run_dir: Option<PathBuf>,
    pub metrics_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub failures_path: Option<PathBuf>,
    pub metrics: SuiteMetrics,
    pub report: String,
    pub cases: Vec<CaseResult>,
}

impl SuiteResult {
    pub fn is_success(&self) -> bool {
        self.metrics.failed == 0
    }

    pub fn failed_cases(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|case| !case.passed())
    }
}
