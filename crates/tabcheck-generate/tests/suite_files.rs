use std::fs;
use std::path::PathBuf;

use tabcheck_core::{LoadMode, load_cases, validate};
use tabcheck_generate::{
    PairwiseOptions, RandomSuiteOptions, SuiteKind, generate_pairwise, generate_random,
    negative_cases, pair_coverage, write_suite,
};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("tabcheck_generate_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

#[test]
fn pairwise_suite_round_trips_through_tab_file() {
    let cases = generate_pairwise(&PairwiseOptions::default());
    let path = temp_out_dir("pairwise").join(SuiteKind::Pairwise.default_file_name());

    let report = write_suite(SuiteKind::Pairwise, &path, &cases, b'\t').expect("write suite");
    assert_eq!(report.cases, cases.len());
    assert_eq!(report.invalid_cases, 0);
    assert!(report.coverage.is_complete());
    assert_eq!(report.fingerprint.len(), 64);

    let first_line = fs::read_to_string(&path).expect("read suite");
    assert!(first_line.starts_with("InputType\tHeadersMode\tTableFormat"));

    let loaded = load_cases(&path, LoadMode::Strict).expect("load suite");
    assert_eq!(loaded, cases);
}

#[test]
fn same_cases_same_fingerprint() {
    let cases = generate_random(&RandomSuiteOptions::default());
    let dir = temp_out_dir("fingerprint");
    let a = write_suite(SuiteKind::Random, &dir.join("a.csv"), &cases, b',').expect("write a");
    let b = write_suite(SuiteKind::Random, &dir.join("b.csv"), &cases, b',').expect("write b");
    assert_eq!(a.fingerprint, b.fingerprint);
    assert_eq!(a.bytes_written, b.bytes_written);
}

#[test]
fn negative_suite_keeps_expected_exception_column() {
    let path = temp_out_dir("negative").join("negative_tests.csv");
    write_suite(SuiteKind::Negative, &path, &negative_cases(), b',').expect("write suite");

    let loaded = load_cases(&path, LoadMode::Strict).expect("load suite");
    assert_eq!(loaded.len(), 3);
    assert!(loaded.iter().all(|case| case.expected_exception() == Some("ValueError")));
}

#[test]
fn shipped_pairwise_fixture_is_valid_and_complete() {
    let cases = load_cases(&SuiteKind::Pairwise.default_path(&data_dir()), LoadMode::Strict)
        .expect("load shipped pairwise suite");
    assert!(!cases.is_empty());
    for case in &cases {
        assert!(validate(case).valid, "invalid pairwise row {case}");
    }
    assert!(pair_coverage(&cases).is_complete());
}

#[test]
fn shipped_negative_fixture_matches_generator() {
    let cases = load_cases(&SuiteKind::Negative.default_path(&data_dir()), LoadMode::Strict)
        .expect("load shipped negative suite");
    assert_eq!(cases, negative_cases());
}
