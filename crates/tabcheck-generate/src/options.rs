//! Header and row-index specifications derived from a combination.

use std::collections::BTreeMap;

use serde::Serialize;

use tabcheck_core::{HeadersMode, InputType, RowIndices};

use crate::synth::{column_key, dimensions};

/// Headers passed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum HeaderSpec {
    /// No headers argument.
    None,
    /// Positional header labels.
    Labels(Vec<String>),
    /// Relabel dict-shaped data by column key.
    Relabel(BTreeMap<String, String>),
    /// Use the first data row as headers.
    FirstRow,
    /// Use the keys of dict-shaped data as headers.
    Keys,
}

impl HeaderSpec {
    pub fn is_none(&self) -> bool {
        matches!(self, HeaderSpec::None)
    }
}

/// Row index passed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum IndexSpec {
    /// Leave the renderer default in place.
    Default,
    Always,
    Never,
    /// One label per data row.
    Labels(Vec<String>),
}

impl IndexSpec {
    pub fn is_default(&self) -> bool {
        matches!(self, IndexSpec::Default)
    }

    /// Drop the first custom label when the first data row becomes headers.
    pub fn for_headers(self, headers: &HeaderSpec) -> Self {
        match (self, headers) {
            (IndexSpec::Labels(labels), HeaderSpec::FirstRow) => {
                IndexSpec::Labels(labels.into_iter().skip(1).collect())
            }
            (spec, _) => spec,
        }
    }
}

pub fn header_label(idx: usize) -> String {
    format!("Col_Hex_{idx}")
}

pub fn index_label(idx: usize) -> String {
    format!("id_{idx}")
}

/// Header specification for a headers mode.
///
/// Explicit headers on dict-shaped input are a key→label mapping so the
/// renderer relabels by key rather than by position.
pub fn headers(headers_mode: &str, input_type: &str, size: &str) -> HeaderSpec {
    let cols = dimensions(size).cols;
    let dict_shaped = InputType::from_label(input_type).is_some_and(|input| input.is_dict_shaped());

    match HeadersMode::from_label(headers_mode) {
        Some(HeadersMode::Explicit) if dict_shaped => HeaderSpec::Relabel(
            (0..cols)
                .map(|idx| (column_key(idx), header_label(idx)))
                .collect(),
        ),
        Some(HeadersMode::Explicit) => HeaderSpec::Labels((0..cols).map(header_label).collect()),
        Some(HeadersMode::FirstRow) => HeaderSpec::FirstRow,
        Some(HeadersMode::Keys) => HeaderSpec::Keys,
        None => HeaderSpec::None,
    }
}

/// Index specification for a row-indices mode.
pub fn show_index(row_indices: &str, size: &str) -> IndexSpec {
    match RowIndices::from_label(row_indices) {
        Some(RowIndices::Always) => IndexSpec::Always,
        Some(RowIndices::Never) => IndexSpec::Never,
        Some(RowIndices::Custom) => {
            IndexSpec::Labels((0..dimensions(size).rows).map(index_label).collect())
        }
        None => IndexSpec::Default,
    }
}
