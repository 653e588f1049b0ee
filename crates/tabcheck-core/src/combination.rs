use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::params::{
    DATA_MIX, DataMix, EXPECTED_EXCEPTION, FACTOR_NAMES, HEADERS_MODE, HeadersMode, INPUT_TYPE,
    InputType, MISSING_VALUES, MissingValues, ROW_INDICES, RowIndices, SIZE, Size, TABLE_FORMAT,
    TableFormat,
};

/// One assignment of values to the test parameters.
///
/// Fields keep the column order of the source file and the raw string value.
/// Absent columns read as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combination {
    fields: Vec<(String, String)>,
}

impl Combination {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut combination = Self { fields: Vec::new() };
        for (key, value) in pairs {
            combination.set(key.into(), value.into());
        }
        combination
    }

    /// Build a combination from the seven factor levels in canonical order.
    pub fn from_levels(levels: [&str; 7]) -> Self {
        Self::from_pairs(FACTOR_NAMES.iter().copied().zip(levels))
    }

    /// Return a copy with one field replaced or appended.
    pub fn with(&self, key: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.set(key.to_string(), value.to_string());
        next
    }

    fn set(&mut self, key: String, value: String) {
        match self.fields.iter_mut().find(|(name, _)| *name == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn raw(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Factor names from [`FACTOR_NAMES`] that have no column.
    pub fn missing_factors(&self) -> Vec<&'static str> {
        FACTOR_NAMES
            .iter()
            .copied()
            .filter(|name| self.get(name).is_none())
            .collect()
    }

    pub fn input_type_label(&self) -> &str {
        self.raw(INPUT_TYPE)
    }

    pub fn headers_mode_label(&self) -> &str {
        self.raw(HEADERS_MODE)
    }

    pub fn table_format_label(&self) -> &str {
        self.raw(TABLE_FORMAT)
    }

    pub fn row_indices_label(&self) -> &str {
        self.raw(ROW_INDICES)
    }

    pub fn missing_values_label(&self) -> &str {
        self.raw(MISSING_VALUES)
    }

    pub fn data_mix_label(&self) -> &str {
        self.raw(DATA_MIX)
    }

    pub fn size_label(&self) -> &str {
        self.raw(SIZE)
    }

    pub fn input_type(&self) -> Option<InputType> {
        InputType::from_label(self.input_type_label())
    }

    pub fn headers_mode(&self) -> Option<HeadersMode> {
        HeadersMode::from_label(self.headers_mode_label())
    }

    pub fn table_format(&self) -> Option<TableFormat> {
        TableFormat::from_label(self.table_format_label())
    }

    pub fn row_indices(&self) -> Option<RowIndices> {
        RowIndices::from_label(self.row_indices_label())
    }

    pub fn missing_values(&self) -> Option<MissingValues> {
        MissingValues::from_label(self.missing_values_label())
    }

    pub fn data_mix(&self) -> Option<DataMix> {
        DataMix::from_label(self.data_mix_label())
    }

    pub fn size(&self) -> Option<Size> {
        Size::from_label(self.size_label())
    }

    /// Error kind a negative case expects, if the column is present and set.
    pub fn expected_exception(&self) -> Option<&str> {
        self.get(EXPECTED_EXCEPTION).filter(|value| !value.is_empty())
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (key, value)) in self.fields.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for Combination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
