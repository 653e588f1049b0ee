use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use tabcheck_core::{Combination, LoadMode, load_cases, validate};

use crate::errors::EvalError;
use crate::metrics::{METRICS_VERSION, PerformanceMetrics, SuiteMetrics, Tally};
use crate::model::{CaseOutcome, CaseResult, EvaluateOptions, Failure, SuiteResult};
use crate::oracle::check_case;
use crate::render::Renderer;
use crate::report::render_report;
use crate::request::build_request;

/// Run case suites through a renderer and judge each outcome.
#[derive(Debug, Clone)]
pub struct SuiteRunner<R> {
    renderer: R,
    options: EvaluateOptions,
}

impl<R: Renderer> SuiteRunner<R> {
    pub fn new(renderer: R, options: EvaluateOptions) -> Self {
        Self { renderer, options }
    }

    pub fn options(&self) -> &EvaluateOptions {
        &self.options
    }

    /// Load a case file and run it; the suite is named after the file stem.
    pub fn run_file(&self, path: &Path, mode: LoadMode) -> Result<SuiteResult, EvalError> {
        let cases = load_cases(path, mode)?;
        let suite = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "suite".to_string());
        self.run(&suite, &cases)
    }

    pub fn run(&self, suite: &str, cases: &[Combination]) -> Result<SuiteResult, EvalError> {
        let total_start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();

        info!(
            run_id = %run_id,
            suite,
            cases = cases.len(),
            policy = %self.options.policy,
            renderer = self.renderer.name(),
            "suite run started"
        );

        let render_start = Instant::now();
        let results: Vec<CaseResult> = cases
            .iter()
            .enumerate()
            .map(|(index, combination)| self.evaluate_case(index, combination))
            .collect();
        let render_ms = render_start.elapsed().as_millis();

        let mut tally = Tally::default();
        for result in &results {
            tally.record(result);
        }

        let metrics = SuiteMetrics {
            metrics_version: METRICS_VERSION.to_string(),
            run_id: run_id.clone(),
            suite: suite.to_string(),
            renderer: self.renderer.name().to_string(),
            policy: self.options.policy.to_string(),
            require_valid: self.options.require_valid,
            cases_total: tally.cases_total,
            passed: tally.passed,
            failed: tally.failed,
            valid: tally.valid,
            invalid: tally.invalid,
            rendered: tally.rendered,
            rejected: tally.rejected,
            rule_violations: tally.rule_violations,
            failure_codes: tally.failure_codes,
            performance: PerformanceMetrics {
                render_ms,
                total_ms: total_start.elapsed().as_millis(),
            },
        };
        let report = render_report(&metrics, &results, self.options.max_examples);

        let mut result = SuiteResult {
            run_dir: None,
            metrics_path: None,
            report_path: None,
            failures_path: None,
            metrics,
            report,
            cases: results,
        };
        if let Some(out_dir) = &self.options.out_dir {
            self.write_artifacts(out_dir, &run_id, &mut result)?;
        }

        if result.is_success() {
            info!(run_id = %run_id, suite, passed = result.metrics.passed, "suite run passed");
        } else {
            warn!(
                run_id = %run_id,
                suite,
                failed = result.metrics.failed,
                "suite run has failing cases"
            );
        }

        Ok(result)
    }

    /// Validate, render and judge a single case.
    pub fn evaluate_case(&self, index: usize, combination: &Combination) -> CaseResult {
        let start = Instant::now();
        let verdict = validate(combination);
        let request = build_request(combination);
        let rendered = self.renderer.render(&request.data, &request.options);

        let mut failures = Vec::new();
        if self.options.require_valid && !verdict.valid {
            failures.push(Failure::new("invalid_combination", verdict.reason.clone()));
        }
        failures.extend(check_case(
            self.options.policy,
            combination,
            &verdict,
            &rendered,
        ));

        let outcome = match &rendered {
            Ok(output) => CaseOutcome::Rendered {
                lines: output.lines().count(),
                chars: output.chars().count(),
            },
            Err(err) => CaseOutcome::Rejected {
                kind: err.kind().to_string(),
                message: err.message().to_string(),
            },
        };

        for failure in &failures {
            warn!(case = index, combination = %combination, code = %failure.code, "{}", failure.message);
        }
        debug!(case = index, valid = verdict.valid, passed = failures.is_empty(), "case evaluated");

        CaseResult {
            index,
            combination: combination.clone(),
            valid: verdict.valid,
            reason: verdict.reason,
            outcome,
            failures,
            elapsed_us: start.elapsed().as_micros(),
        }
    }

    fn write_artifacts(
        &self,
        out_dir: &Path,
        run_id: &str,
        result: &mut SuiteResult,
    ) -> Result<(), EvalError> {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%SZ").to_string();
        let run_dir: PathBuf = out_dir.join(format!("{timestamp}__run_{run_id}"));
        std::fs::create_dir_all(&run_dir)?;

        let metrics_path = run_dir.join("metrics.json");
        std::fs::write(&metrics_path, serde_json::to_vec_pretty(&result.metrics)?)?;

        let report_path = run_dir.join("report.md");
        std::fs::write(&report_path, result.report.as_bytes())?;

        if self.options.write_failures {
            let failing: Vec<&CaseResult> = result.failed_cases().collect();
            let path = run_dir.join("failures.json");
            std::fs::write(&path, serde_json::to_vec_pretty(&failing)?)?;
            result.failures_path = Some(path);
        }

        debug!(run_dir = %run_dir.display(), "suite artifacts written");
        result.run_dir = Some(run_dir);
        result.metrics_path = Some(metrics_path);
        result.report_path = Some(report_path);
        Ok(())
    }
}
