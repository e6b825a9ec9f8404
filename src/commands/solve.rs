//! Word solving command
//!
//! Plays one game, either against a given target or a randomly drawn one,
//! reporting each round to an observer.

use crate::core::Word;
use crate::error::Result;
use crate::solver::{GameResult, RoundObserver, Solver, Strategy};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Where the target of a single game comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetChoice {
    /// A known word
    Given(Word),
    /// Drawn from the vocabulary with a fixed seed
    Seeded(u64),
    /// Drawn from the vocabulary with the thread-local generator
    Random,
}

impl TargetChoice {
    /// Pick the variant from optional CLI inputs; a word wins over a seed
    #[must_use]
    pub const fn from_options(word: Option<Word>, seed: Option<u64>) -> Self {
        match (word, seed) {
            (Some(word), _) => Self::Given(word),
            (None, Some(seed)) => Self::Seeded(seed),
            (None, None) => Self::Random,
        }
    }
}

/// Play a single game and return the target alongside the result
///
/// # Errors
///
/// Returns `NoCandidatesRemaining` if the target is outside the vocabulary
/// and filtering eliminates every word.
pub fn solve_word<S: Strategy>(
    solver: &Solver<'_, S>,
    choice: TargetChoice,
    observer: &mut impl RoundObserver,
) -> Result<(Word, GameResult)> {
    match choice {
        TargetChoice::Given(target) => {
            let result = solver.play(&target, observer)?;
            Ok((target, result))
        }
        TargetChoice::Seeded(seed) => {
            solver.play_random(&mut StdRng::seed_from_u64(seed), observer)
        }
        TargetChoice::Random => solver.play_random(&mut rand::rng(), observer),
    }
}
