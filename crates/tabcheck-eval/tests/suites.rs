use std::path::{Path, PathBuf};

use tabcheck_core::{Combination, LoadMode, load_cases, validate};
use tabcheck_eval::{
    CaseOutcome, EvaluateOptions, OraclePolicy, Renderer, SuiteRunner, TabledRenderer,
    build_request,
};
use tabcheck_generate::{
    PairwiseOptions, RandomSuiteOptions, SuiteKind, generate_pairwise, generate_random,
    negative_cases,
};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn temp_out_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tabcheck_eval_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn runner(kind: SuiteKind) -> SuiteRunner<TabledRenderer> {
    SuiteRunner::new(TabledRenderer, EvaluateOptions::for_suite(kind))
}

#[test]
fn explicit_headers_render_for_dict_rows() {
    let case = Combination::from_levels([
        "ListOfDicts", "Explicit", "grid", "never", "Default", "Strings", "Small2x2",
    ]);
    assert!(validate(&case).valid);

    let request = build_request(&case);
    let output = TabledRenderer
        .render(&request.data, &request.options)
        .expect("valid case renders");
    assert!(!output.trim().is_empty());
    assert!(output.contains("Col_Hex_0"));
}

#[test]
fn every_valid_combination_renders_cleanly() {
    let suite = generate_random(&RandomSuiteOptions {
        count: 200,
        valid_only: true,
        max_attempts: 5000,
        ..RandomSuiteOptions::default()
    });
    let result = runner(SuiteKind::Pairwise).run("valid", &suite).expect("run");
    let failures: Vec<String> = result
        .failed_cases()
        .map(|case| format!("{} {:?}", case.combination, case.failures))
        .collect();
    assert!(failures.is_empty(), "{failures:#?}");
    assert_eq!(result.metrics.rendered, suite.len() as u64);
}

#[test]
fn generated_pairwise_suite_passes() {
    let suite = generate_pairwise(&PairwiseOptions::default());
    let result = runner(SuiteKind::Pairwise).run("pairwise", &suite).expect("run");
    assert!(result.is_success(), "{}", result.report);
}

#[test]
fn negative_cases_are_rejected() {
    let result = runner(SuiteKind::Negative)
        .run("negative", &negative_cases())
        .expect("run");
    assert!(result.is_success(), "{}", result.report);
    assert_eq!(result.metrics.rejected, 3);
    for case in &result.cases {
        let CaseOutcome::Rejected { kind, message } = &case.outcome else {
            panic!("case {} rendered", case.index);
        };
        assert_eq!(kind, "ValueError");
        assert!(message.contains("not supported"));
    }
}

#[test]
fn crash_is_failure_flags_negative_cases() {
    let options = EvaluateOptions {
        policy: OraclePolicy::CrashIsFailure,
        ..EvaluateOptions::default()
    };
    let result = SuiteRunner::new(TabledRenderer, options)
        .run("negative", &negative_cases())
        .expect("run");
    assert_eq!(result.metrics.failed, 3);
    assert_eq!(result.metrics.failure_codes.get("render_error"), Some(&3));
}

#[test]
fn require_valid_flags_invalid_rows() {
    let invalid = Combination::from_levels([
        "ListOfLists", "Explicit", "plain", "never", "NA", "Strings", "Small2x2",
    ]);
    let result = runner(SuiteKind::Pairwise).run("one", &[invalid]).expect("run");
    assert_eq!(result.metrics.failed, 1);
    assert_eq!(result.cases[0].failures[0].code, "invalid_combination");
    assert_eq!(result.cases[0].reason, "Rule 3 violated: MissingValues='NA' requires DataMix='MixedNone'");
}

#[test]
fn shipped_suites_pass_under_their_policies() {
    for kind in SuiteKind::ALL {
        let path = kind.default_path(&data_dir());
        let result = runner(kind)
            .run_file(&path, LoadMode::Strict)
            .expect("suite runs");
        assert!(result.metrics.cases_total > 0, "{kind} suite is empty");
        assert!(result.is_success(), "{kind}:\n{}", result.report);
    }
}

#[test]
fn random_fixture_mixes_valid_and_invalid_cases() {
    let path = SuiteKind::Random.default_path(&data_dir());
    let cases = load_cases(&path, LoadMode::Strict).expect("load");
    assert_eq!(cases.len(), 18);
    assert!(cases.iter().any(|case| validate(case).valid));
    assert!(cases.iter().any(|case| !validate(case).valid));
}

#[test]
fn missing_suite_is_empty_in_soft_mode() {
    let path = data_dir().join("does_not_exist.csv");
    let result = runner(SuiteKind::Random)
        .run_file(&path, LoadMode::Soft)
        .expect("soft load");
    assert_eq!(result.metrics.cases_total, 0);
    assert!(result.report.contains("no cases were loaded"));
    assert!(runner(SuiteKind::Negative).run_file(&path, LoadMode::Strict).is_err());
}

#[test]
fn artifacts_land_in_a_run_directory() {
    let out_dir = temp_out_dir();
    let options = EvaluateOptions {
        out_dir: Some(out_dir.clone()),
        ..EvaluateOptions::for_suite(SuiteKind::Negative)
    };
    let result = SuiteRunner::new(TabledRenderer, options)
        .run("negative", &negative_cases())
        .expect("run");

    let run_dir = result.run_dir.expect("run dir");
    assert!(run_dir.starts_with(&out_dir));
    assert!(
        run_dir
            .file_name()
            .map(|name| name.to_string_lossy().contains("__run_"))
            .unwrap_or(false)
    );

    let metrics: serde_json::Value = serde_json::from_slice(
        &std::fs::read(run_dir.join("metrics.json")).expect("metrics"),
    )
    .expect("json");
    assert_eq!(metrics["policy"], "crash_is_expected");
    assert_eq!(metrics["cases_total"], 3);
    assert!(run_dir.join("report.md").exists());

    let failures: serde_json::Value =
        serde_json::from_slice(&std::fs::read(run_dir.join("failures.json")).expect("failures"))
            .expect("json");
    assert_eq!(failures, serde_json::json!([]));

    let _ = std::fs::remove_dir_all(out_dir);
}
