use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tabcheck_core::violations;

use crate::model::CaseResult;

/// Metrics contract version for suite runs.
pub const METRICS_VERSION: &str = "0.1";

/// Machine-readable metrics for a suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteMetrics {
    pub metrics_version: String,
    pub run_id: String,
    pub suite: String,
    pub renderer: String,
    pub policy: String,
    pub require_valid: bool,
    pub cases_total: u64,
    pub passed: u64,
    pub failed: u64,
    pub valid: u64,
    pub invalid: u64,
    pub rendered: u64,
    pub rejected: u64,
    /// Cases violating each rule, keyed by rule code.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub rule_violations: BTreeMap<String, u64>,
    /// Oracle failures keyed by failure code.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub failure_codes: BTreeMap<String, u64>,
    pub performance: PerformanceMetrics,
}

/// Performance timings for the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub render_ms: u128,
    pub total_ms: u128,
}

/// Counters accumulated over case results.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    pub cases_total: u64,
    pub passed: u64,
    pub failed: u64,
    pub valid: u64,
    pub invalid: u64,
    pub rendered: u64,
    pub rejected: u64,
    pub rule_violations: BTreeMap<String, u64>,
    pub failure_codes: BTreeMap<String, u64>,
}

impl Tally {
    pub fn record(&mut self, result: &CaseResult) {
        self.cases_total += 1;
        if result.passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        if result.valid {
            self.valid += 1;
        } else {
            self.invalid += 1;
        }
        if result.outcome.is_rendered() {
            self.rendered += 1;
        } else {
            self.rejected += 1;
        }
        for rule in violations(&result.combination) {
            *self.rule_violations.entry(rule.code().to_string()).or_default() += 1;
        }
        for failure in &result.failures {
            *self.failure_codes.entry(failure.code.clone()).or_default() += 1;
        }
    }
}
