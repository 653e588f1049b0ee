//! Constrained all-pairs suite generation.
//!
//! The level space is small enough (1944 raw combinations) to enumerate, so
//! the generator filters it down to valid combinations and greedily picks the
//! candidate covering the most uncovered level pairs until none remain. Only
//! pairs that occur in some valid combination are required.

use std::collections::HashSet;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use tabcheck_core::{Combination, DOMAINS, validate};

use crate::model::PairCoverage;

const FACTORS: usize = DOMAINS.len();

type Levels = [usize; FACTORS];

/// (factor a, level of a, factor b, level of b) with a < b.
type Pair = (usize, usize, usize, usize);

/// Options for pairwise generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseOptions {
    /// Orders candidates before the greedy pass; only affects tie-breaking.
    pub seed: u64,
}

/// Generate a suite in which every coverable level pair appears at least
/// once and every row satisfies the five constraints.
pub fn generate_pairwise(options: &PairwiseOptions) -> Vec<Combination> {
    let mut candidates = valid_levels();
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    candidates.shuffle(&mut rng);

    let mut uncovered: HashSet<Pair> = candidates.iter().flat_map(pairs_of).collect();
    let required = uncovered.len();
    let mut suite = Vec::new();

    while !uncovered.is_empty() {
        let mut best: Option<(&Levels, usize)> = None;
        for candidate in &candidates {
            let gain = pairs_of(candidate)
                .filter(|pair| uncovered.contains(pair))
                .count();
            if best.is_none_or(|(_, top)| gain > top) {
                best = Some((candidate, gain));
            }
        }

        let Some((chosen, gain)) = best else {
            break;
        };
        if gain == 0 {
            break;
        }

        for pair in pairs_of(chosen) {
            uncovered.remove(&pair);
        }
        suite.push(to_combination(chosen));
    }

    info!(
        seed = options.seed,
        cases = suite.len(),
        pairs_required = required,
        "pairwise suite generated"
    );

    suite
}

/// Pair coverage of `cases` against the pairs coverable by valid rows.
pub fn pair_coverage(cases: &[Combination]) -> PairCoverage {
    let required: HashSet<Pair> = valid_levels().iter().flat_map(pairs_of).collect();
    let present: HashSet<Pair> = cases
        .iter()
        .filter_map(to_levels)
        .flat_map(|levels| pairs_of(&levels).collect::<Vec<_>>())
        .collect();

    PairCoverage {
        required: required.len(),
        covered: present.intersection(&required).count(),
    }
}

fn valid_levels() -> Vec<Levels> {
    let mut all: Vec<Levels> = vec![[0; FACTORS]];
    for (factor, (_, levels)) in DOMAINS.iter().enumerate() {
        all = all
            .into_iter()
            .flat_map(|prefix| {
                (0..levels.len()).map(move |level| {
                    let mut next = prefix;
                    next[factor] = level;
                    next
                })
            })
            .collect();
    }
    all.into_iter()
        .filter(|levels| validate(&to_combination(levels)).valid)
        .collect()
}

fn pairs_of(levels: &Levels) -> impl Iterator<Item = Pair> + '_ {
    (0..FACTORS).flat_map(move |a| {
        ((a + 1)..FACTORS).map(move |b| (a, levels[a], b, levels[b]))
    })
}

fn to_combination(levels: &Levels) -> Combination {
    Combination::from_pairs(
        DOMAINS
            .iter()
            .zip(levels.iter())
            .map(|((name, values), level)| (*name, values[*level])),
    )
}

fn to_levels(combination: &Combination) -> Option<Levels> {
    let mut levels = [0; FACTORS];
    for (factor, (name, values)) in DOMAINS.iter().enumerate() {
        let value = combination.get(name)?;
        levels[factor] = values.iter().position(|candidate| *candidate == value)?;
    }
    Some(levels)
}
