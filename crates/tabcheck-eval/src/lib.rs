//! Oracle evaluation of a table renderer against case suites.

pub mod engine;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod oracle;
pub mod render;
pub mod report;
pub mod request;

pub use engine::SuiteRunner;
pub use errors::EvalError;
pub use metrics::{METRICS_VERSION, PerformanceMetrics, SuiteMetrics};
pub use model::{CaseOutcome, CaseResult, EvaluateOptions, Failure, SuiteResult};
pub use oracle::{OraclePolicy, check_case};
pub use render::{RenderError, RenderOptions, Renderer, TabledRenderer};
pub use report::render_report;
pub use request::{RenderRequest, build_request};
