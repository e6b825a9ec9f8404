//! Benchmark command
//!
//! Runs a batch over a seeded random sample of the vocabulary.

use super::batch::{BatchConfig, BatchReport, run_batch};
use crate::core::{Vocabulary, Word};
use crate::solver::{Solver, Strategy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// Seed used when none is given, so repeated runs compare like with like
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Draw `count` distinct targets from the vocabulary
///
/// Asking for more words than the vocabulary holds returns all of them, in a
/// shuffled order.
#[must_use]
pub fn sample_targets(vocab: &Vocabulary, count: usize, seed: u64) -> Vec<Word> {
    let mut rng = StdRng::seed_from_u64(seed);
    vocab
        .words()
        .choose_multiple(&mut rng, count)
        .copied()
        .collect()
}

/// Run the solver on a random sample of targets
pub fn run_benchmark<S: Strategy + Sync>(
    solver: &Solver<'_, S>,
    count: usize,
    seed: u64,
    config: &BatchConfig,
) -> BatchReport {
    let targets = sample_targets(solver.vocabulary(), count, seed);
    run_batch(solver, &targets, config)
}
