use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use tabcheck_core::{Combination, DOMAINS, validate};

use crate::errors::GenerationError;

/// Options for random suite sampling.
#[derive(Debug, Clone, Copy)]
pub struct RandomSuiteOptions {
    /// Number of distinct cases wanted.
    pub count: usize,
    pub seed: u64,
    /// Upper bound on draws, duplicates and rejected draws included.
    pub max_attempts: u32,
    /// Drop draws that violate any constraint.
    pub valid_only: bool,
}

impl Default for RandomSuiteOptions {
    fn default() -> Self {
        Self {
            count: 18,
            seed: 0,
            max_attempts: 1000,
            valid_only: false,
        }
    }
}

impl RandomSuiteOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.count == 0 {
            return Err(GenerationError::InvalidOptions(
                "random suite count must be positive".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(GenerationError::InvalidOptions(
                "max_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sample distinct combinations uniformly from the factor domains.
///
/// Stops at `count` cases or after `max_attempts` draws, whichever comes
/// first, so the result may be shorter than requested.
pub fn generate_random(options: &RandomSuiteOptions) -> Vec<Combination> {
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut cases: Vec<Combination> = Vec::with_capacity(options.count);
    let mut attempts = 0_u32;

    while cases.len() < options.count && attempts < options.max_attempts {
        attempts += 1;

        let levels = DOMAINS.map(|(_, levels)| levels[rng.random_range(0..levels.len())]);
        let candidate = Combination::from_levels(levels);

        if options.valid_only && !validate(&candidate).valid {
            continue;
        }
        if !cases.contains(&candidate) {
            cases.push(candidate);
        }
    }

    if cases.len() < options.count {
        warn!(
            requested = options.count,
            generated = cases.len(),
            attempts,
            "random suite stopped before reaching the requested size"
        );
    }
    info!(seed = options.seed, cases = cases.len(), attempts, "random suite generated");

    cases
}
