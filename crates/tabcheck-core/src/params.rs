//! The fixed six-factor parameter model.
//!
//! Case files carry raw strings. The enums below give those strings a typed
//! reading; a label that does not parse is kept as-is by [`Combination`]
//! and simply matches no rule that names a specific level.
//!
//! [`Combination`]: crate::Combination

use serde::{Deserialize, Serialize};

/// Column names in canonical suite order.
pub const INPUT_TYPE: &str = "InputType";
pub const HEADERS_MODE: &str = "HeadersMode";
pub const TABLE_FORMAT: &str = "TableFormat";
pub const ROW_INDICES: &str = "RowIndices";
pub const MISSING_VALUES: &str = "MissingValues";
pub const DATA_MIX: &str = "DataMix";
pub const SIZE: &str = "Size";
/// Extra column carried by negative-case files.
pub const EXPECTED_EXCEPTION: &str = "ExpectedException";
/// Error kind a renderer raises when it rejects an option combination.
pub const VALUE_ERROR: &str = "ValueError";

pub const FACTOR_NAMES: [&str; 7] = [
    INPUT_TYPE,
    HEADERS_MODE,
    TABLE_FORMAT,
    ROW_INDICES,
    MISSING_VALUES,
    DATA_MIX,
    SIZE,
];

/// Levels used when generating suites, keyed by factor name.
pub const DOMAINS: [(&str, &[&str]); 7] = [
    (INPUT_TYPE, &["ListOfLists", "ListOfDicts", "DictOfColumns"]),
    (HEADERS_MODE, &["Explicit", "FirstRow", "Keys"]),
    (TABLE_FORMAT, &["plain", "github", "grid", "psql"]),
    (ROW_INDICES, &["always", "never", "Custom"]),
    (MISSING_VALUES, &["Default", "NA"]),
    (DATA_MIX, &["Strings", "IntsFloats", "MixedNone"]),
    (SIZE, &["Small2x2", "Medium5x4", "WideText"]),
];

macro_rules! level_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The label used in case files.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Parse an exact case-file label.
            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

level_enum!(
    /// Shape of the tabular value handed to the renderer.
    InputType {
        ListOfLists => "ListOfLists",
        ListOfDicts => "ListOfDicts",
        DictOfColumns => "DictOfColumns",
    }
);

level_enum!(
    /// How column headers are supplied.
    HeadersMode {
        Explicit => "Explicit",
        FirstRow => "FirstRow",
        Keys => "Keys",
    }
);

level_enum!(
    /// Renderer table style identifier.
    TableFormat {
        Plain => "plain",
        Simple => "simple",
        Github => "github",
        Pipe => "pipe",
        Grid => "grid",
        Psql => "psql",
        Rst => "rst",
    }
);

level_enum!(
    /// Row index display mode.
    RowIndices {
        Always => "always",
        Never => "never",
        Custom => "Custom",
    }
);

level_enum!(
    MissingValues {
        Default => "Default",
        Na => "NA",
    }
);

level_enum!(
    /// Cell value family.
    DataMix {
        Strings => "Strings",
        IntsFloats => "IntsFloats",
        MixedNone => "MixedNone",
    }
);

level_enum!(
    /// Table size class.
    Size {
        Small2x2 => "Small2x2",
        Medium5x4 => "Medium5x4",
        WideText => "WideText",
    }
);

impl InputType {
    /// True for the record and column-mapping shapes.
    pub fn is_dict_shaped(&self) -> bool {
        matches!(self, InputType::ListOfDicts | InputType::DictOfColumns)
    }
}

impl TableFormat {
    /// Formats whose column separators keep wide cells readable.
    pub fn is_grid_like(&self) -> bool {
        matches!(self, TableFormat::Grid | TableFormat::Psql | TableFormat::Github)
    }
}

/// Levels for a factor name, if it is one of the seven suite columns.
pub fn domain(name: &str) -> Option<&'static [&'static str]> {
    DOMAINS
        .iter()
        .find(|(factor, _)| *factor == name)
        .map(|(_, levels)| *levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_label() {
        for input in InputType::ALL {
            assert_eq!(InputType::from_label(input.as_str()), Some(*input));
        }
        assert_eq!(MissingValues::from_label("NA"), Some(MissingValues::Na));
        assert_eq!(TableFormat::from_label("fancy"), None);
    }

    #[test]
    fn domains_follow_factor_order() {
        let names: Vec<&str> = DOMAINS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, FACTOR_NAMES.to_vec());
        assert_eq!(domain(SIZE).map(|levels| levels.len()), Some(3));
        assert!(domain(EXPECTED_EXCEPTION).is_none());
    }

    #[test]
    fn domain_levels_parse_into_enums() {
        for level in domain(TABLE_FORMAT).unwrap_or_default() {
            assert!(TableFormat::from_label(level).is_some(), "{level}");
        }
        for level in domain(DATA_MIX).unwrap_or_default() {
            assert!(DataMix::from_label(level).is_some(), "{level}");
        }
    }
}
