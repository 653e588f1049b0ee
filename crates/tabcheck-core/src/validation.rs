use serde::{Deserialize, Serialize};

use crate::combination::Combination;
use crate::constraints::violations;
use crate::params::{DOMAINS, TABLE_FORMAT, TableFormat};

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Structured validation issue with location and hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub path: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ValidationIssue {
    pub fn new(
        severity: IssueSeverity,
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            path: path.into(),
            message: message.into(),
            hint,
        }
    }
}

/// Aggregated validation report with errors and warnings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    pub fn push_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Full diagnostic view of a combination.
///
/// Every violated rule becomes an error. Missing factor columns and levels
/// outside the suite domains become warnings; they never change the verdict.
pub fn validate_report(combination: &Combination) -> ValidationReport {
    let mut report = ValidationReport::default();

    for rule in violations(combination) {
        report.push_error(ValidationIssue::new(
            IssueSeverity::Error,
            rule.code(),
            format!("/rules/{}", rule.number()),
            rule.reason(),
            None,
        ));
    }

    for name in combination.missing_factors() {
        report.push_warning(ValidationIssue::new(
            IssueSeverity::Warning,
            "factor_missing",
            format!("/{name}"),
            format!("column '{name}' is absent"),
            Some("regenerate the suite with every factor column".to_string()),
        ));
    }

    for (name, levels) in DOMAINS {
        let Some(value) = combination.get(name) else {
            continue;
        };
        let known = levels.contains(&value)
            || (name == TABLE_FORMAT && TableFormat::from_label(value).is_some());
        if !known {
            report.push_warning(ValidationIssue::new(
                IssueSeverity::Warning,
                "unknown_level",
                format!("/{name}"),
                format!("'{value}' is not a known level of {name}"),
                Some(format!("expected one of: {}", levels.join(", "))),
            ));
        }
    }

    report
}
