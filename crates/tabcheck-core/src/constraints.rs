//! The five inter-parameter constraints.
//!
//! Rules are independent: the verdict is their conjunction and evaluation
//! order only decides which reason is reported for an invalid combination.

use serde::{Deserialize, Serialize};

use crate::combination::Combination;
use crate::params::{DataMix, HeadersMode, InputType, MissingValues, Size};

/// Reason reported for a combination that satisfies every rule.
pub const VALID_REASON: &str = "Valid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Dict-shaped input cannot take headers from the first row.
    DictRejectsFirstRow,
    /// Key headers need dict-shaped input.
    KeysRequiresDict,
    /// The NA token is only meaningful when the data has absent cells.
    NaRequiresMixedNone,
    /// Row-major input has no keys to use as headers.
    ListRejectsKeys,
    /// Wide text needs a format with column separators.
    WideTextRequiresGridFormat,
}

impl Rule {
    pub const ALL: [Rule; 5] = [
        Rule::DictRejectsFirstRow,
        Rule::KeysRequiresDict,
        Rule::NaRequiresMixedNone,
        Rule::ListRejectsKeys,
        Rule::WideTextRequiresGridFormat,
    ];

    pub fn number(&self) -> u8 {
        match self {
            Rule::DictRejectsFirstRow => 1,
            Rule::KeysRequiresDict => 2,
            Rule::NaRequiresMixedNone => 3,
            Rule::ListRejectsKeys => 4,
            Rule::WideTextRequiresGridFormat => 5,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Rule::DictRejectsFirstRow => "dict_rejects_first_row",
            Rule::KeysRequiresDict => "keys_requires_dict",
            Rule::NaRequiresMixedNone => "na_requires_mixed_none",
            Rule::ListRejectsKeys => "list_rejects_keys",
            Rule::WideTextRequiresGridFormat => "wide_text_requires_grid_format",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Rule::DictRejectsFirstRow => "FirstRow headers not supported for dict-based inputs",
            Rule::KeysRequiresDict => "Keys headers require dict-based inputs",
            Rule::NaRequiresMixedNone => "MissingValues='NA' requires DataMix='MixedNone'",
            Rule::ListRejectsKeys => "Keys headers not supported for ListOfLists",
            Rule::WideTextRequiresGridFormat => "WideText requires grid/psql/github format",
        }
    }

    /// Human-readable reason naming the rule number.
    pub fn reason(&self) -> String {
        format!("Rule {} violated: {}", self.number(), self.message())
    }

    /// Whether the combination satisfies this rule.
    pub fn holds(&self, combination: &Combination) -> bool {
        let dict_shaped = combination
            .input_type()
            .is_some_and(|input| input.is_dict_shaped());
        let headers = combination.headers_mode();

        match self {
            Rule::DictRejectsFirstRow => !(dict_shaped && headers == Some(HeadersMode::FirstRow)),
            Rule::KeysRequiresDict => headers != Some(HeadersMode::Keys) || dict_shaped,
            Rule::NaRequiresMixedNone => {
                combination.missing_values() != Some(MissingValues::Na)
                    || combination.data_mix() == Some(DataMix::MixedNone)
            }
            Rule::ListRejectsKeys => {
                !(combination.input_type() == Some(InputType::ListOfLists)
                    && headers == Some(HeadersMode::Keys))
            }
            Rule::WideTextRequiresGridFormat => {
                combination.size() != Some(Size::WideText)
                    || combination
                        .table_format()
                        .is_some_and(|format| format.is_grid_like())
            }
        }
    }
}

/// Validity decision for one combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
    pub reason: String,
    /// First violated rule, in rule order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
}

impl Verdict {
    fn valid() -> Self {
        Self {
            valid: true,
            reason: VALID_REASON.to_string(),
            rule: None,
        }
    }

    fn violated(rule: Rule) -> Self {
        Self {
            valid: false,
            reason: rule.reason(),
            rule: Some(rule),
        }
    }
}

/// Decide validity; the first failing rule supplies the reason.
pub fn validate(combination: &Combination) -> Verdict {
    Rule::ALL
        .iter()
        .find(|rule| !rule.holds(combination))
        .map(|rule| Verdict::violated(*rule))
        .unwrap_or_else(Verdict::valid)
}

/// Every rule the combination violates, in rule order.
pub fn violations(combination: &Combination) -> Vec<Rule> {
    Rule::ALL
        .iter()
        .copied()
        .filter(|rule| !rule.holds(combination))
        .collect()
}
