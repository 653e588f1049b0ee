//! Concrete tabular values for a combination.

use std::collections::BTreeMap;

use serde::Serialize;

use tabcheck_core::{DataMix, InputType, Size};

/// Sentence written into column 0 of every row for the `WideText` size.
pub const WIDE_TEXT: &str = "This is a very long text string intended to test layout.";

/// A single cell handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// Absent value, distinct from the empty string.
    Missing,
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Display text, substituting `missing` for absent values.
    pub fn display(&self, missing: &str) -> String {
        match self {
            Cell::Text(value) => value.clone(),
            Cell::Number(value) => value.to_string(),
            Cell::Missing => missing.to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Tabular data in one of the three shapes the renderer accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TabularValue {
    /// Row-major sequence of rows.
    Rows(Vec<Vec<Cell>>),
    /// One key→value mapping per row.
    Records(Vec<BTreeMap<String, Cell>>),
    /// Column-major mapping of key→column.
    Columns(BTreeMap<String, Vec<Cell>>),
}

impl TabularValue {
    pub fn shape(&self) -> &'static str {
        match self {
            TabularValue::Rows(_) => "rows",
            TabularValue::Records(_) => "records",
            TabularValue::Columns(_) => "columns",
        }
    }

    pub fn is_dict_shaped(&self) -> bool {
        !matches!(self, TabularValue::Rows(_))
    }

    pub fn row_count(&self) -> usize {
        match self {
            TabularValue::Rows(rows) => rows.len(),
            TabularValue::Records(records) => records.len(),
            TabularValue::Columns(columns) => columns.values().map(Vec::len).max().unwrap_or(0),
        }
    }

    /// Column keys of dict-shaped data, in key order.
    pub fn keys(&self) -> Option<Vec<String>> {
        match self {
            TabularValue::Rows(_) => None,
            TabularValue::Records(records) => {
                let mut keys: Vec<String> = Vec::new();
                for record in records {
                    for key in record.keys() {
                        if !keys.contains(key) {
                            keys.push(key.clone());
                        }
                    }
                }
                Some(keys)
            }
            TabularValue::Columns(columns) => Some(columns.keys().cloned().collect()),
        }
    }

    /// Row-major view of the data. Dict-shaped values are laid out in key
    /// order; short columns and absent record keys read as missing.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        match self {
            TabularValue::Rows(rows) => rows.clone(),
            TabularValue::Records(records) => {
                let keys = self.keys().unwrap_or_default();
                records
                    .iter()
                    .map(|record| {
                        keys.iter()
                            .map(|key| record.get(key).cloned().unwrap_or(Cell::Missing))
                            .collect()
                    })
                    .collect()
            }
            TabularValue::Columns(columns) => (0..self.row_count())
                .map(|row| {
                    columns
                        .values()
                        .map(|column| column.get(row).cloned().unwrap_or(Cell::Missing))
                        .collect()
                })
                .collect(),
        }
    }
}

/// Grid size for a size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

/// Any size label containing "Small" is 2x2; everything else is 5x4.
pub fn dimensions(size: &str) -> Dimensions {
    if size.contains("Small") {
        Dimensions { rows: 2, cols: 2 }
    } else {
        Dimensions { rows: 5, cols: 4 }
    }
}

/// Synthetic key for column `idx` of dict-shaped data.
pub fn column_key(idx: usize) -> String {
    format!("Head{idx}")
}

/// Build the tabular value for a combination's shape, data mix and size.
///
/// Deterministic in its inputs. An unrecognized input type yields the
/// row-major grid.
pub fn generate(input_type: &str, data_mix: &str, size: &str) -> TabularValue {
    let grid = base_grid(data_mix, size);
    let cols = dimensions(size).cols;

    match InputType::from_label(input_type) {
        Some(InputType::ListOfDicts) => TabularValue::Records(
            grid.into_iter()
                .map(|row| {
                    row.into_iter()
                        .enumerate()
                        .map(|(col, cell)| (column_key(col), cell))
                        .collect()
                })
                .collect(),
        ),
        Some(InputType::DictOfColumns) => {
            let mut columns = BTreeMap::new();
            for col in 0..cols {
                let column: Vec<Cell> = grid.iter().map(|row| row[col].clone()).collect();
                columns.insert(column_key(col), column);
            }
            TabularValue::Columns(columns)
        }
        Some(InputType::ListOfLists) | None => TabularValue::Rows(grid),
    }
}

fn base_grid(data_mix: &str, size: &str) -> Vec<Vec<Cell>> {
    let Dimensions { rows, cols } = dimensions(size);
    let mix = DataMix::from_label(data_mix);
    let wide = Size::from_label(size) == Some(Size::WideText);

    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    let cell = mix_cell(mix, row, col);
                    if wide && col == 0 {
                        Cell::from(WIDE_TEXT)
                    } else {
                        cell
                    }
                })
                .collect()
        })
        .collect()
}

fn mix_cell(mix: Option<DataMix>, row: usize, col: usize) -> Cell {
    match mix {
        Some(DataMix::IntsFloats) => Cell::Number((row * 10 + col) as f64 + 0.5),
        Some(DataMix::MixedNone) if row == 1 && col == 1 => Cell::Missing,
        Some(DataMix::MixedNone) => Cell::Text(format!("val_{row}_{col}")),
        Some(DataMix::Strings) | None => Cell::Text(format!("r{row}c{col}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Cell {
        Cell::from(value)
    }

    #[test]
    fn small_strings_grid() {
        let value = generate("ListOfLists", "Strings", "Small2x2");
        assert_eq!(
            value,
            TabularValue::Rows(vec![
                vec![text("r0c0"), text("r0c1")],
                vec![text("r1c0"), text("r1c1")],
            ])
        );
    }

    #[test]
    fn mixed_none_places_missing_at_one_one() {
        let value = generate("ListOfLists", "MixedNone", "Small2x2");
        assert_eq!(
            value,
            TabularValue::Rows(vec![
                vec![text("val_0_0"), text("val_0_1")],
                vec![text("val_1_0"), Cell::Missing],
            ])
        );
    }

    #[test]
    fn ints_floats_follow_row_major_formula() {
        let rows = generate("ListOfLists", "IntsFloats", "Medium5x4").to_rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[3][2], Cell::Number(32.5));
        assert_eq!(rows[0][0].display(""), "0.5");
    }

    #[test]
    fn wide_text_overrides_column_zero_after_mix() {
        for mix in ["Strings", "IntsFloats", "MixedNone"] {
            let rows = generate("ListOfLists", mix, "WideText").to_rows();
            assert_eq!(rows.len(), 5);
            assert!(rows.iter().all(|row| row[0] == text(WIDE_TEXT)), "{mix}");
            assert_ne!(rows[0][1], text(WIDE_TEXT));
        }
    }

    #[test]
    fn records_use_synthetic_keys() {
        let value = generate("ListOfDicts", "Strings", "Small2x2");
        let TabularValue::Records(records) = &value else {
            panic!("expected records, got {}", value.shape());
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("Head1"), Some(&text("r1c1")));
        assert_eq!(value.keys(), Some(vec!["Head0".to_string(), "Head1".to_string()]));
    }

    #[test]
    fn unknown_input_type_falls_back_to_rows() {
        let value = generate("Matrix", "Strings", "Small2x2");
        assert_eq!(value.shape(), "rows");
        assert_eq!(value, generate("ListOfLists", "Strings", "Small2x2"));
    }

    #[test]
    fn unknown_size_is_medium_unless_it_says_small() {
        assert_eq!(dimensions("Huge"), Dimensions { rows: 5, cols: 4 });
        assert_eq!(dimensions("SmallWide"), Dimensions { rows: 2, cols: 2 });
    }

    #[test]
    fn missing_serializes_as_null() {
        let value = generate("ListOfLists", "MixedNone", "Small2x2");
        let json = serde_json::to_string(&value).expect("serialize");
        assert_eq!(json, r#"[["val_0_0","val_0_1"],["val_1_0",null]]"#);
    }
}
