//! Test-data synthesis and suite generation for tabcheck.
//!
//! Turns abstract combinations into the concrete tabular values, header
//! specifications and index specifications handed to the renderer, and
//! produces the pairwise, random and negative case suites.

pub mod errors;
pub mod model;
pub mod options;
pub mod output;
pub mod suites;
pub mod synth;

pub use errors::GenerationError;
pub use model::{PairCoverage, SuiteKind, SuiteReport};
pub use options::{HeaderSpec, IndexSpec, headers, show_index};
pub use output::csv::{write_suite, write_suite_csv};
pub use suites::negative::negative_cases;
pub use suites::pairwise::{PairwiseOptions, generate_pairwise, pair_coverage};
pub use suites::random::{RandomSuiteOptions, generate_random};
pub use synth::{Cell, Dimensions, TabularValue, dimensions, generate};
