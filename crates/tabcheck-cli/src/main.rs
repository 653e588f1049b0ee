mod registry;
mod workspace;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tabcheck_core::{
    Error as CoreError, LoadMode, SUITE_VERSION, load_cases, validate, validate_report,
};
use tabcheck_eval::{
    EvalError, EvaluateOptions, OraclePolicy, Renderer, SuiteRunner, TabledRenderer,
};
use tabcheck_generate::{
    GenerationError, HeaderSpec, IndexSpec, PairwiseOptions, RandomSuiteOptions, SuiteKind,
    TabularValue, generate, generate_pairwise, generate_random, headers, negative_cases,
    show_index, write_suite,
};
use registry::{RunContext, RunSummary, SuiteSummary, init_logging, start_run, write_summary};
use thiserror::Error;
use uuid::Uuid;
use workspace::{DEFAULT_CONFIG_FILE, Settings, load_settings, save_settings};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("workspace error: {0}")]
    Workspace(#[from] workspace::WorkspaceError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "tabcheck", version, about = "Combinatorial test harness for table rendering")]
struct Cli {
    /// Settings file; a missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a pairwise, random or negative suite file.
    Generate(GenerateArgs),
    /// Print the constraint verdict of every case in a suite file.
    Validate(ValidateArgs),
    /// Print the synthesized renderer input for one combination as JSON.
    Synth(SynthArgs),
    /// Run suites through the renderer and judge them.
    Run(RunArgs),
    /// Print the effective settings as TOML.
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SuiteArg {
    Pairwise,
    Random,
    Negative,
}

impl From<SuiteArg> for SuiteKind {
    fn from(value: SuiteArg) -> Self {
        match value {
            SuiteArg::Pairwise => SuiteKind::Pairwise,
            SuiteArg::Random => SuiteKind::Random,
            SuiteArg::Negative => SuiteKind::Negative,
        }
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(value_enum)]
    suite: SuiteArg,
    /// Output path; defaults to the configured suite file.
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    /// Number of random cases.
    #[arg(long)]
    count: Option<usize>,
    /// Keep only random cases that satisfy every constraint.
    #[arg(long, default_value_t = false)]
    valid_only: bool,
    /// Write tab-separated regardless of the suite default.
    #[arg(long, default_value_t = false)]
    tab: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[arg(value_name = "CASES")]
    cases: PathBuf,
}

#[derive(Args, Debug)]
struct SynthArgs {
    #[arg(long, default_value = "ListOfLists")]
    input_type: String,
    #[arg(long, default_value = "Strings")]
    data_mix: String,
    #[arg(long, default_value = "Small2x2")]
    size: String,
    /// Also derive the header specification for this mode.
    #[arg(long)]
    headers_mode: Option<String>,
    /// Also derive the index specification for this mode.
    #[arg(long)]
    row_indices: Option<String>,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Run a single shipped suite instead of all three.
    #[arg(long, value_enum)]
    suite: Option<SuiteArg>,
    /// Run this case file instead of the configured one.
    #[arg(long, value_name = "PATH")]
    cases: Option<PathBuf>,
    /// Oracle policy override.
    #[arg(long, value_parser = parse_policy)]
    policy: Option<OraclePolicy>,
    /// Parent directory for run artifacts.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Persist the effective settings to the config path.
    #[arg(long, default_value_t = false)]
    write: bool,
}

fn parse_policy(value: &str) -> Result<OraclePolicy, String> {
    OraclePolicy::from_label(value).ok_or_else(|| {
        let known: Vec<&str> = OraclePolicy::ALL.iter().map(|policy| policy.as_str()).collect();
        format!("unknown policy '{value}', expected one of: {}", known.join(", "))
    })
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.config)?;

    match cli.command {
        Command::Generate(args) => run_generate(&settings, args),
        Command::Validate(args) => run_validate(args),
        Command::Synth(args) => run_synth(args),
        Command::Run(args) => run_suites(&settings, args),
        Command::Config(args) => run_config(&cli.config, &settings, args),
    }
}

fn run_generate(settings: &Settings, args: GenerateArgs) -> Result<(), CliError> {
    init_logging(None)?;

    let kind = SuiteKind::from(args.suite);
    let cases = match kind {
        SuiteKind::Pairwise => generate_pairwise(&PairwiseOptions {
            seed: args.seed.unwrap_or(settings.pairwise.seed),
        }),
        SuiteKind::Random => {
            let options = RandomSuiteOptions {
                count: args.count.unwrap_or(settings.random.count),
                seed: args.seed.unwrap_or(settings.random.seed),
                max_attempts: settings.random.max_attempts,
                valid_only: args.valid_only || settings.random.valid_only,
            };
            options.validate()?;
            generate_random(&options)
        }
        SuiteKind::Negative => negative_cases(),
    };

    let path = args.out.unwrap_or_else(|| settings.suite_path(kind));
    let delimiter = if args.tab {
        b'\t'
    } else {
        kind.default_delimiter()
    };
    let report = write_suite(kind, &path, &cases, delimiter)?;

    println!(
        "{}: {} cases ({} valid, {} invalid) -> {}",
        report.kind,
        report.cases,
        report.valid_cases,
        report.invalid_cases,
        report.path.display()
    );
    println!(
        "pair coverage: {}/{} ({:.1}%)",
        report.coverage.covered,
        report.coverage.required,
        report.coverage.fraction() * 100.0
    );
    println!("sha256: {}", report.fingerprint);
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    init_logging(None)?;

    let cases = load_cases(&args.cases, LoadMode::Strict)?;
    let mut valid = 0_usize;
    for (index, case) in cases.iter().enumerate() {
        let report = validate_report(case);
        let verdict = validate(case);
        if verdict.valid {
            valid += 1;
        }
        println!("{index}\t{}\t{case}", verdict.reason);
        for warning in &report.warnings {
            println!("\twarning {}: {}", warning.code, warning.message);
        }
    }
    println!("{} cases: {valid} valid, {} invalid", cases.len(), cases.len() - valid);
    Ok(())
}

#[derive(Debug, Serialize)]
struct SynthOutput {
    input_type: String,
    data_mix: String,
    size: String,
    shape: &'static str,
    rows: usize,
    data: TabularValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<HeaderSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    show_index: Option<IndexSpec>,
}

fn run_synth(args: SynthArgs) -> Result<(), CliError> {
    let data = generate(&args.input_type, &args.data_mix, &args.size);
    let headers = args
        .headers_mode
        .as_deref()
        .map(|mode| headers(mode, &args.input_type, &args.size));
    let show_index = args.row_indices.as_deref().map(|mode| {
        let index = show_index(mode, &args.size);
        match &headers {
            Some(headers) => index.for_headers(headers),
            None => index,
        }
    });

    let output = SynthOutput {
        shape: data.shape(),
        rows: data.row_count(),
        input_type: args.input_type,
        data_mix: args.data_mix,
        size: args.size,
        data,
        headers,
        show_index,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// One suite file to evaluate.
struct SuiteTarget {
    name: String,
    path: PathBuf,
    policy: OraclePolicy,
    require_valid: bool,
    mode: LoadMode,
}

fn run_suites(settings: &Settings, args: RunArgs) -> Result<(), CliError> {
    let targets = resolve_targets(settings, &args)?;
    let renderer = TabledRenderer;

    let run_id = Uuid::new_v4().to_string();
    let started_at = chrono::Utc::now();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at,
        suite_version: SUITE_VERSION.to_string(),
        renderer: renderer.name().to_string(),
        runs_dir: args.out_dir.unwrap_or_else(|| settings.runs_dir.clone()),
        suites: targets.iter().map(|target| target.name.clone()).collect(),
    };

    let run_paths = start_run(&run_ctx)?;
    init_logging(Some(&run_paths.logs_path))?;

    tracing::info!(event = "run_started", run_id = %run_id, suites = targets.len());
    let timer = Instant::now();

    let mut summaries = Vec::new();
    let mut failed_cases = 0_u64;
    for target in targets {
        let options = EvaluateOptions {
            policy: target.policy,
            require_valid: target.require_valid,
            max_examples: settings.max_examples,
            write_failures: true,
            out_dir: Some(run_paths.root.join(&target.name)),
        };
        let result = SuiteRunner::new(renderer, options).run_file(&target.path, target.mode)?;

        let metrics = &result.metrics;
        println!(
            "{}: {} passed, {} failed of {} ({})",
            target.name, metrics.passed, metrics.failed, metrics.cases_total, metrics.policy
        );
        for case in result.failed_cases() {
            for failure in &case.failures {
                println!("  case {} {}: {}", case.index, case.combination, failure.message);
            }
        }

        failed_cases += metrics.failed;
        summaries.push(SuiteSummary {
            path: target.path,
            policy: target.policy.to_string(),
            run_dir: result.run_dir.clone(),
            metrics: result.metrics,
        });
    }

    let duration_ms = timer.elapsed().as_millis();
    write_summary(
        &run_paths,
        &RunSummary {
            run_id: run_id.clone(),
            finished_at: chrono::Utc::now().to_rfc3339(),
            duration_ms,
            failed_cases,
            suites: summaries,
        },
    )?;
    println!("artifacts: {}", run_paths.root.display());

    if failed_cases > 0 {
        tracing::warn!(event = "run_finished", status = "failed", failed_cases, duration_ms);
        return Err(EvalError::Failures(failed_cases).into());
    }

    tracing::info!(event = "run_finished", status = "success", duration_ms);
    Ok(())
}

fn resolve_targets(settings: &Settings, args: &RunArgs) -> Result<Vec<SuiteTarget>, CliError> {
    let kind = args.suite.map(SuiteKind::from);

    if let Some(path) = &args.cases {
        let policy = args
            .policy
            .or_else(|| kind.map(|kind| settings.policy(kind)))
            .ok_or_else(|| {
                CliError::InvalidConfig("--cases needs --suite or --policy".to_string())
            })?;
        return Ok(vec![SuiteTarget {
            name: suite_name(path),
            path: path.clone(),
            policy,
            require_valid: kind == Some(SuiteKind::Pairwise),
            mode: LoadMode::Strict,
        }]);
    }

    let kinds = match kind {
        Some(kind) => vec![kind],
        None => SuiteKind::ALL.to_vec(),
    };
    Ok(kinds
        .into_iter()
        .map(|kind| {
            let defaults = EvaluateOptions::for_suite(kind);
            SuiteTarget {
                name: kind.as_str().to_string(),
                path: settings.suite_path(kind),
                policy: args.policy.unwrap_or_else(|| settings.policy(kind)),
                require_valid: defaults.require_valid,
                mode: match kind {
                    SuiteKind::Negative => LoadMode::Strict,
                    SuiteKind::Pairwise | SuiteKind::Random => LoadMode::Soft,
                },
            }
        })
        .collect())
}

fn suite_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cases".to_string())
}

fn run_config(path: &Path, settings: &Settings, args: ConfigArgs) -> Result<(), CliError> {
    if args.write {
        save_settings(path, settings)?;
        println!("wrote {}", path.display());
        return Ok(());
    }
    let encoded = toml::to_string_pretty(settings)
        .map_err(|err| CliError::Workspace(err.into()))?;
    print!("{encoded}");
    Ok(())
}
