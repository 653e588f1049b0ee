//! Core contracts for tabcheck.
//!
//! This crate defines the six-factor parameter model, the combination type
//! read from case files, the five inter-parameter constraints, and the case
//! loader shared by the generator, the evaluator and the CLI.

pub mod cases;
pub mod combination;
pub mod constraints;
pub mod error;
pub mod params;
pub mod validation;

pub use cases::{LoadMode, detect_delimiter, load_cases, read_cases};
pub use combination::Combination;
pub use constraints::{Rule, Verdict, validate, violations};
pub use error::{Error, Result};
pub use params::{
    DOMAINS, DataMix, EXPECTED_EXCEPTION, FACTOR_NAMES, HeadersMode, InputType, MissingValues,
    RowIndices, Size, TableFormat, VALUE_ERROR,
};
pub use validation::{IssueSeverity, ValidationIssue, ValidationReport, validate_report};

/// Current contract version for suite and metrics artifacts.
pub const SUITE_VERSION: &str = "0.1";
