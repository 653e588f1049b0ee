use tabcheck_core::{Combination, MissingValues};
use tabcheck_generate::{TabularValue, generate, headers, show_index};

use crate::render::RenderOptions;

/// Token shown for missing cells when a case asks for `NA`.
pub const NA_TOKEN: &str = "NA";

/// Everything handed to the renderer for one case.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub data: TabularValue,
    pub options: RenderOptions,
}

/// Turn a combination into concrete renderer input.
///
/// A custom index loses its first label when the first data row is consumed
/// as headers, so index and body stay the same length.
pub fn build_request(combination: &Combination) -> RenderRequest {
    let input_type = combination.input_type_label();
    let size = combination.size_label();

    let data = generate(input_type, combination.data_mix_label(), size);
    let headers = headers(combination.headers_mode_label(), input_type, size);
    let show_index = show_index(combination.row_indices_label(), size).for_headers(&headers);
    let missing_value = match combination.missing_values() {
        Some(MissingValues::Na) => NA_TOKEN.to_string(),
        _ => String::new(),
    };

    RenderRequest {
        data,
        options: RenderOptions {
            table_format: combination.table_format_label().to_string(),
            headers,
            show_index,
            missing_value,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabcheck_generate::{HeaderSpec, IndexSpec};

    #[test]
    fn first_row_with_custom_index_trims_labels() {
        let case = Combination::from_levels([
            "ListOfLists", "FirstRow", "grid", "Custom", "NA", "MixedNone", "Medium5x4",
        ]);
        let request = build_request(&case);
        assert_eq!(request.options.headers, HeaderSpec::FirstRow);
        let IndexSpec::Labels(labels) = &request.options.show_index else {
            panic!("expected custom labels");
        };
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[0], "id_1");
        assert_eq!(request.options.missing_value, "NA");
        assert_eq!(request.options.table_format, "grid");
    }

    #[test]
    fn default_missing_values_keep_renderer_default() {
        let case = Combination::from_levels([
            "DictOfColumns", "Keys", "psql", "always", "Default", "Strings", "Small2x2",
        ]);
        let request = build_request(&case);
        assert!(request.options.missing_value.is_empty());
        assert_eq!(request.data.shape(), "columns");
        assert_eq!(request.options.show_index, IndexSpec::Always);
    }
}
