//! Oracle policies deciding whether a render outcome passes.

use serde::{Deserialize, Serialize};

use tabcheck_core::{Combination, DataMix, HeadersMode, MissingValues, VALUE_ERROR, Verdict};
use tabcheck_generate::SuiteKind;

use crate::model::Failure;
use crate::render::RenderError;
use crate::request::NA_TOKEN;

/// Marker every designated rejection message carries.
pub const REJECTION_MARKER: &str = "not supported";

/// First explicit header label, expected in output for explicit headers.
pub const EXPLICIT_HEADER: &str = "Col_Hex_0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OraclePolicy {
    /// Any error fails the case, valid or not.
    CrashIsFailure,
    /// The case must raise the designated rejection.
    CrashIsExpected,
    /// Valid cases must render; invalid ones may render or be rejected.
    ValidMustSucceed,
}

impl OraclePolicy {
    pub const ALL: [OraclePolicy; 3] = [
        OraclePolicy::CrashIsFailure,
        OraclePolicy::CrashIsExpected,
        OraclePolicy::ValidMustSucceed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OraclePolicy::CrashIsFailure => "crash_is_failure",
            OraclePolicy::CrashIsExpected => "crash_is_expected",
            OraclePolicy::ValidMustSucceed => "valid_must_succeed",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|policy| policy.as_str() == label)
    }

    /// The policy a shipped suite is judged under.
    pub fn for_suite(kind: SuiteKind) -> Self {
        match kind {
            SuiteKind::Pairwise => OraclePolicy::CrashIsFailure,
            SuiteKind::Random => OraclePolicy::ValidMustSucceed,
            SuiteKind::Negative => OraclePolicy::CrashIsExpected,
        }
    }
}

impl std::fmt::Display for OraclePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Judge one render outcome; an empty list means the case passed.
pub fn check_case(
    policy: OraclePolicy,
    combination: &Combination,
    verdict: &Verdict,
    outcome: &Result<String, RenderError>,
) -> Vec<Failure> {
    match (policy, outcome) {
        (OraclePolicy::CrashIsFailure, Ok(output)) => check_output(combination, output),
        (OraclePolicy::CrashIsFailure, Err(err)) => vec![render_error(err)],

        (OraclePolicy::CrashIsExpected, Ok(_)) => {
            let expected = combination.expected_exception().unwrap_or(VALUE_ERROR);
            vec![Failure::new(
                "expected_error_not_raised",
                format!("expected {expected} but the table rendered"),
            )]
        }
        (OraclePolicy::CrashIsExpected, Err(err)) => check_expected_error(combination, err),

        (OraclePolicy::ValidMustSucceed, Ok(output)) if verdict.valid => {
            check_output(combination, output)
        }
        (OraclePolicy::ValidMustSucceed, Ok(_)) => Vec::new(),
        (OraclePolicy::ValidMustSucceed, Err(err)) if verdict.valid => vec![render_error(err)],
        (OraclePolicy::ValidMustSucceed, Err(err)) if is_rejection(err) => Vec::new(),
        (OraclePolicy::ValidMustSucceed, Err(err)) => vec![Failure::new(
            "ungraceful_error",
            format!("invalid case failed without a rejection: {} {}", err.kind(), err),
        )],
    }
}

/// True for the renderer's designated rejection of an option combination.
pub fn is_rejection(err: &RenderError) -> bool {
    err.kind() == VALUE_ERROR && err.message().contains(REJECTION_MARKER)
}

/// Content checks applied to every output a valid case produces.
pub fn check_output(combination: &Combination, output: &str) -> Vec<Failure> {
    let mut failures = Vec::new();

    if output.trim().is_empty() {
        failures.push(Failure::new("empty_output", "renderer produced no output"));
    }

    let na_requested = combination.missing_values() == Some(MissingValues::Na)
        && combination.data_mix() == Some(DataMix::MixedNone);
    if na_requested && !output.contains(NA_TOKEN) {
        failures.push(Failure::new(
            "missing_token_absent",
            format!("missing cells were not shown as {NA_TOKEN}"),
        ));
    }

    if combination.headers_mode() == Some(HeadersMode::Explicit) && !output.contains(EXPLICIT_HEADER)
    {
        failures.push(Failure::new(
            "explicit_header_absent",
            format!("explicit header {EXPLICIT_HEADER} missing from output"),
        ));
    }

    failures
}

fn check_expected_error(combination: &Combination, err: &RenderError) -> Vec<Failure> {
    let expected = combination.expected_exception().unwrap_or(VALUE_ERROR);
    let mut failures = Vec::new();
    if err.kind() != expected {
        failures.push(Failure::new(
            "unexpected_error_kind",
            format!("expected {expected}, got {}: {err}", err.kind()),
        ));
    }
    if !err.message().contains(REJECTION_MARKER) {
        failures.push(Failure::new(
            "error_message_mismatch",
            format!("error message does not mention '{REJECTION_MARKER}': {err}"),
        ));
    }
    failures
}

fn render_error(err: &RenderError) -> Failure {
    Failure::new("render_error", format!("{}: {err}", err.kind()))
}
