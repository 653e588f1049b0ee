use std::path::PathBuf;

use tabcheck_core::{
    Combination, Error, LoadMode, Rule, load_cases, validate, validate_report, violations,
};

fn temp_case_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tabcheck_core_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write cases");
    path
}

fn case(levels: [&str; 7]) -> Combination {
    Combination::from_levels(levels)
}

#[test]
fn baseline_explicit_grid_case_is_valid() {
    let verdict = validate(&case([
        "ListOfDicts", "Explicit", "grid", "never", "Default", "Strings", "Small2x2",
    ]));
    assert!(verdict.valid);
    assert_eq!(verdict.reason, "Valid");
    assert!(verdict.rule.is_none());
}

#[test]
fn dict_with_first_row_reports_rule_one() {
    let verdict = validate(&case([
        "ListOfDicts", "FirstRow", "grid", "never", "Default", "Strings", "Small2x2",
    ]));
    assert!(!verdict.valid);
    assert_eq!(verdict.rule, Some(Rule::DictRejectsFirstRow));
    assert!(verdict.reason.starts_with("Rule 1 violated"));
}

#[test]
fn keys_on_rows_breaks_rules_two_and_four() {
    let combination = case([
        "ListOfLists", "Keys", "grid", "never", "Default", "Strings", "Small2x2",
    ]);
    assert_eq!(validate(&combination).rule, Some(Rule::KeysRequiresDict));
    assert_eq!(
        violations(&combination),
        vec![Rule::KeysRequiresDict, Rule::ListRejectsKeys]
    );

    let report = validate_report(&combination);
    assert!(!report.is_ok());
    assert_eq!(report.errors.len(), 2);
}

#[test]
fn wide_text_needs_a_separated_format() {
    for (format, valid) in [("grid", true), ("psql", true), ("github", true), ("plain", false)] {
        let verdict = validate(&case([
            "ListOfLists", "Explicit", format, "never", "Default", "Strings", "WideText",
        ]));
        assert_eq!(verdict.valid, valid, "{format}");
    }
}

#[test]
fn unknown_levels_load_and_match_no_level_rule() {
    let path = temp_case_file(
        "cases.csv",
        "InputType,HeadersMode,TableFormat,RowIndices,MissingValues,DataMix,Size\n\
         Matrix,Explicit,fancy_grid,never,Default,Strings,Small2x2\n",
    );
    let cases = load_cases(&path, LoadMode::Strict).expect("load");
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].input_type_label(), "Matrix");
    assert!(validate(&cases[0]).valid);

    let report = validate_report(&cases[0]);
    assert!(report.is_ok());
    assert!(!report.warnings.is_empty());

    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[test]
fn tab_separated_files_load_with_extra_columns() {
    let path = temp_case_file(
        "negative.txt",
        "InputType\tHeadersMode\tTableFormat\tRowIndices\tMissingValues\tDataMix\tSize\tExpectedException\n\
         DictOfColumns\tFirstRow\tplain\tnever\tDefault\tStrings\tSmall2x2\tValueError\n",
    );
    let cases = load_cases(&path, LoadMode::Strict).expect("load");
    assert_eq!(cases[0].expected_exception(), Some("ValueError"));
    assert_eq!(cases[0].headers_mode_label(), "FirstRow");

    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[test]
fn missing_file_depends_on_load_mode() {
    let path = std::env::temp_dir()
        .join(format!("tabcheck_core_{}", uuid::Uuid::new_v4()))
        .join("absent.csv");
    assert!(load_cases(&path, LoadMode::Soft).expect("soft").is_empty());
    assert!(matches!(
        load_cases(&path, LoadMode::Strict),
        Err(Error::NotFound(_))
    ));
}
