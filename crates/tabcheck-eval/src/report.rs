use crate::metrics::SuiteMetrics;
use crate::model::CaseResult;

/// Render a deterministic markdown report for a suite run.
pub fn render_report(metrics: &SuiteMetrics, cases: &[CaseResult], max_examples: usize) -> String {
    let mut lines = Vec::new();

    lines.push("# Tabcheck Suite Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- run_id: {}", metrics.run_id));
    lines.push(format!("- suite: {}", metrics.suite));
    lines.push(format!("- renderer: {}", metrics.renderer));
    lines.push(format!("- policy: {}", metrics.policy));
    if metrics.require_valid {
        lines.push("- require_valid: true".to_string());
    }
    lines.push(String::new());

    lines.push("## Outcomes".to_string());
    lines.push("| cases | passed | failed | valid | invalid | rendered | rejected |".to_string());
    lines.push("| --- | --- | --- | --- | --- | --- | --- |".to_string());
    lines.push(format!(
        "| {} | {} | {} | {} | {} | {} | {} |",
        metrics.cases_total,
        metrics.passed,
        metrics.failed,
        metrics.valid,
        metrics.invalid,
        metrics.rendered,
        metrics.rejected
    ));
    lines.push(String::new());

    if !metrics.rule_violations.is_empty() {
        lines.push("## Constraint violations".to_string());
        lines.push("| rule | cases |".to_string());
        lines.push("| --- | --- |".to_string());
        for (rule, count) in &metrics.rule_violations {
            lines.push(format!("| {rule} | {count} |"));
        }
        lines.push(String::new());
    }

    let failing: Vec<&CaseResult> = cases.iter().filter(|case| !case.passed()).collect();
    if !failing.is_empty() {
        lines.push("## Failing cases".to_string());
        for case in failing.iter().take(max_examples) {
            for failure in &case.failures {
                lines.push(format!(
                    "- case {} {}: {} ({})",
                    case.index, case.combination, failure.message, failure.code
                ));
            }
        }
        if failing.len() > max_examples {
            lines.push(format!("- ... {} more", failing.len() - max_examples));
        }
        lines.push(String::new());
    }

    lines.push("## Recommendations".to_string());
    lines.extend(recommendations(metrics));
    lines.join("\n")
}

fn recommendations(metrics: &SuiteMetrics) -> Vec<String> {
    let mut lines = Vec::new();
    if metrics.failure_codes.contains_key("invalid_combination") {
        lines.push("- regenerate the suite; it contains combinations the constraints reject.".to_string());
    }
    if metrics.failure_codes.contains_key("render_error")
        || metrics.failure_codes.contains_key("ungraceful_error")
    {
        lines.push("- inspect renderer errors for valid inputs before comparing output.".to_string());
    }
    if metrics.failure_codes.contains_key("expected_error_not_raised") {
        lines.push("- the renderer accepted a combination it should reject.".to_string());
    }
    if metrics.cases_total == 0 {
        lines.push("- no cases were loaded; check the suite path.".to_string());
    } else if metrics.failed == 0 {
        lines.push("- all cases passed; compare metrics across runs for drift.".to_string());
    }
    lines
}
