//! The renderer seam and the `tabled`-backed implementation under test.

use tabled::builder::Builder;
use tabled::settings::Style;
use thiserror::Error;
use tracing::warn;

use tabcheck_core::{TableFormat, VALUE_ERROR};
use tabcheck_generate::{Cell, HeaderSpec, IndexSpec, TabularValue};

/// Error kind reported for failures that are not a designated rejection.
pub const INTERNAL_ERROR: &str = "RenderError";

/// Options accompanying the data in a render call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub table_format: String,
    pub headers: HeaderSpec,
    pub show_index: IndexSpec,
    /// Text shown for missing cells.
    pub missing_value: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            table_format: TableFormat::Simple.as_str().to_string(),
            headers: HeaderSpec::None,
            show_index: IndexSpec::Default,
            missing_value: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The renderer refuses this option combination.
    #[error("{0}")]
    ValueRejected(String),
    #[error("{0}")]
    Internal(String),
}

impl RenderError {
    /// Error kind as recorded in case files and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::ValueRejected(_) => VALUE_ERROR,
            RenderError::Internal(_) => INTERNAL_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RenderError::ValueRejected(message) | RenderError::Internal(message) => message,
        }
    }
}

/// A table renderer: tabular data plus options in, text out.
pub trait Renderer {
    fn name(&self) -> &'static str;

    fn render(&self, data: &TabularValue, options: &RenderOptions) -> Result<String, RenderError>;
}

/// Renderer built on the `tabled` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabledRenderer;

impl Renderer for TabledRenderer {
    fn name(&self) -> &'static str {
        "tabled"
    }

    fn render(&self, data: &TabularValue, options: &RenderOptions) -> Result<String, RenderError> {
        let (header, mut body) = resolve_rows(data, &options.headers, &options.missing_value)?;
        let index = resolve_index(&options.show_index, body.len())?;

        let header = match (header, &index) {
            (Some(mut header), Some(_)) => {
                header.insert(0, String::new());
                Some(header)
            }
            (header, _) => header,
        };
        if let Some(labels) = index {
            for (row, label) in body.iter_mut().zip(labels) {
                row.insert(0, label);
            }
        }

        if header.is_none() && body.is_empty() {
            return Ok(String::new());
        }

        let mut builder = Builder::default();
        if let Some(header) = header {
            builder.push_record(header);
        }
        for row in body {
            builder.push_record(row);
        }
        let mut table = builder.build();

        match TableFormat::from_label(&options.table_format) {
            Some(TableFormat::Plain) => {
                table.with(Style::blank());
            }
            Some(TableFormat::Github | TableFormat::Pipe) => {
                table.with(Style::markdown());
            }
            Some(TableFormat::Grid) => {
                table.with(Style::ascii());
            }
            Some(TableFormat::Psql) => {
                table.with(Style::psql());
            }
            Some(TableFormat::Rst) => {
                table.with(Style::re_structured_text());
            }
            Some(TableFormat::Simple) => {
                table.with(Style::empty());
            }
            None => {
                warn!(
                    table_format = %options.table_format,
                    "unknown table format, falling back to simple"
                );
                table.with(Style::empty());
            }
        }

        Ok(table.to_string())
    }
}

type Row = Vec<String>;

/// Split data into an optional header row and display-ready body rows.
fn resolve_rows(
    data: &TabularValue,
    headers: &HeaderSpec,
    missing: &str,
) -> Result<(Option<Row>, Vec<Row>), RenderError> {
    let display = |row: &[Cell]| -> Row { row.iter().map(|cell| cell.display(missing)).collect() };
    let body: Vec<Row> = data.to_rows().iter().map(|row| display(row)).collect();

    match (data.keys(), headers) {
        (_, HeaderSpec::None) => Ok((None, body)),
        (_, HeaderSpec::Labels(labels)) => Ok((Some(labels.clone()), body)),
        (None, HeaderSpec::FirstRow) => {
            let mut rows = body.into_iter();
            Ok((Some(rows.next().unwrap_or_default()), rows.collect()))
        }
        (None, HeaderSpec::Keys) => Err(RenderError::ValueRejected(
            "headers='keys' is not supported for row-major data".to_string(),
        )),
        (None, HeaderSpec::Relabel(_)) => Err(RenderError::ValueRejected(
            "a header mapping is not supported for row-major data".to_string(),
        )),
        (Some(_), HeaderSpec::FirstRow) => Err(RenderError::ValueRejected(format!(
            "headers='firstrow' is not supported for {} data",
            data.shape()
        ))),
        (Some(keys), HeaderSpec::Keys) => Ok((Some(keys), body)),
        (Some(keys), HeaderSpec::Relabel(mapping)) => {
            let header = keys
                .iter()
                .map(|key| mapping.get(key).unwrap_or(key).clone())
                .collect();
            Ok((Some(header), body))
        }
    }
}

fn resolve_index(spec: &IndexSpec, rows: usize) -> Result<Option<Row>, RenderError> {
    match spec {
        IndexSpec::Default | IndexSpec::Never => Ok(None),
        IndexSpec::Always => Ok(Some((0..rows).map(|idx| idx.to_string()).collect())),
        IndexSpec::Labels(labels) if labels.len() == rows => Ok(Some(labels.clone())),
        IndexSpec::Labels(labels) => Err(RenderError::ValueRejected(format!(
            "an index of {} labels for {rows} rows is not supported",
            labels.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabcheck_generate::generate;

    fn options(headers: HeaderSpec) -> RenderOptions {
        RenderOptions {
            headers,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn explicit_labels_head_the_table() {
        let data = generate("ListOfLists", "Strings", "Small2x2");
        let labels = vec!["Col_Hex_0".to_string(), "Col_Hex_1".to_string()];
        let output = TabledRenderer
            .render(&data, &options(HeaderSpec::Labels(labels)))
            .expect("render");
        assert!(output.contains("Col_Hex_0"));
        assert!(output.contains("r1c1"));
    }

    #[test]
    fn first_row_consumes_one_data_row() {
        let data = generate("ListOfLists", "Strings", "Small2x2");
        let (header, body) = resolve_rows(&data, &HeaderSpec::FirstRow, "").expect("rows");
        assert_eq!(header, Some(vec!["r0c0".to_string(), "r0c1".to_string()]));
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn missing_cells_use_the_token() {
        let data = generate("ListOfLists", "MixedNone", "Small2x2");
        let request = RenderOptions {
            missing_value: "NA".to_string(),
            ..RenderOptions::default()
        };
        let output = TabledRenderer.render(&data, &request).expect("render");
        assert!(output.contains("NA"));
    }

    #[test]
    fn rejects_conflicting_shapes_and_headers() {
        let rows = generate("ListOfLists", "Strings", "Small2x2");
        let records = generate("ListOfDicts", "Strings", "Small2x2");
        let columns = generate("DictOfColumns", "Strings", "Small2x2");

        for (data, headers) in [
            (&records, HeaderSpec::FirstRow),
            (&columns, HeaderSpec::FirstRow),
            (&rows, HeaderSpec::Keys),
            (&rows, HeaderSpec::Relabel(Default::default())),
        ] {
            let err = TabledRenderer
                .render(data, &options(headers))
                .expect_err("rejection");
            assert_eq!(err.kind(), "ValueError");
            assert!(err.message().contains("not supported"), "{err}");
        }
    }

    #[test]
    fn keys_and_relabel_head_dict_shapes() {
        let records = generate("ListOfDicts", "Strings", "Small2x2");
        let output = TabledRenderer
            .render(&records, &options(HeaderSpec::Keys))
            .expect("render");
        assert!(output.contains("Head0"));

        let mapping = [("Head0".to_string(), "Col_Hex_0".to_string())]
            .into_iter()
            .collect();
        let (header, _) = resolve_rows(&records, &HeaderSpec::Relabel(mapping), "").expect("rows");
        assert_eq!(header, Some(vec!["Col_Hex_0".to_string(), "Head1".to_string()]));
    }

    #[test]
    fn index_labels_must_match_row_count() {
        assert_eq!(resolve_index(&IndexSpec::Always, 2).expect("index"), Some(vec![
            "0".to_string(),
            "1".to_string()
        ]));
        assert_eq!(resolve_index(&IndexSpec::Never, 2).expect("index"), None);
        let err = resolve_index(&IndexSpec::Labels(vec!["id_0".to_string()]), 2)
            .expect_err("length mismatch");
        assert_eq!(err.kind(), "ValueError");
    }

    #[test]
    fn unknown_format_falls_back() {
        let data = generate("ListOfLists", "IntsFloats", "Small2x2");
        let fancy = RenderOptions {
            table_format: "fancy_outline".to_string(),
            ..RenderOptions::default()
        };
        let simple = RenderOptions::default();
        assert_eq!(
            TabledRenderer.render(&data, &fancy).expect("render"),
            TabledRenderer.render(&data, &simple).expect("render")
        );
    }
}
