//! Main solver interface

use super::game::{Game, GameResult, RoundObserver};
use super::strategy::Strategy;
use crate::core::{Pattern, Vocabulary, Word};
use crate::error::{Result, SolverError};
use crate::index::PatternIndex;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Maximum guesses per game in the standard rules
pub const MAX_ROUNDS: usize = 6;

/// Per-solver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub max_rounds: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
        }
    }
}

/// Word game solver
///
/// Couples a strategy with the shared vocabulary and pattern index. A solver
/// is read-only and can run any number of games, including concurrently.
///
/// # Examples
/// ```
/// use wordle_bot::core::{Vocabulary, Word};
/// use wordle_bot::index::PatternIndex;
/// use wordle_bot::solver::{FrequencyStrategy, Quiet, Solver, SolverConfig};
///
/// let vocab = Vocabulary::parse("apple grape table cable maple").unwrap();
/// let index = PatternIndex::build(&vocab);
/// let solver = Solver::new(FrequencyStrategy, &vocab, &index, SolverConfig::default()).unwrap();
///
/// let result = solver.play(&Word::new("apple").unwrap(), &mut Quiet).unwrap();
/// assert!(result.solved);
/// assert_eq!(result.rounds_taken, 2);
/// ```
pub struct Solver<'a, S: Strategy> {
    strategy: S,
    vocab: &'a Vocabulary,
    index: &'a PatternIndex,
    config: SolverConfig,
}

impl<'a, S: Strategy> Solver<'a, S> {
    /// Create a new solver
    ///
    /// # Errors
    /// - `CacheMismatch` if `index` was not built from `vocab`
    /// - `InvalidState` if `config.max_rounds` is zero
    pub fn new(
        strategy: S,
        vocab: &'a Vocabulary,
        index: &'a PatternIndex,
        config: SolverConfig,
    ) -> Result<Self> {
        index.ensure_matches(vocab)?;
        if config.max_rounds == 0 {
            return Err(SolverError::InvalidState("max_rounds must be at least 1"));
        }

        Ok(Self {
            strategy,
            vocab,
            index,
            config,
        })
    }

    #[must_use]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    #[must_use]
    pub const fn vocabulary(&self) -> &'a Vocabulary {
        self.vocab
    }

    #[must_use]
    pub const fn index(&self) -> &'a PatternIndex {
        self.index
    }

    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Start a fresh game
    #[must_use]
    pub fn new_game(&self) -> Game<'_, S> {
        Game::new(self)
    }

    /// Play a full game against `target`
    ///
    /// The target does not have to be in the vocabulary, but if it is not the
    /// candidates can run dry before it is found.
    ///
    /// # Errors
    /// Returns `NoCandidatesRemaining` if filtering eliminates every word
    /// while rounds remain.
    pub fn play(&self, target: &Word, observer: &mut impl RoundObserver) -> Result<GameResult> {
        let mut game = self.new_game();

        while !game.step(target, observer)?.is_over() {}

        game.result()
            .ok_or(SolverError::InvalidState("game loop ended before the game did"))
    }

    /// Play a game against a target drawn uniformly from the vocabulary
    ///
    /// Returns the target alongside the result.
    ///
    /// # Errors
    /// As [`Solver::play`].
    pub fn play_random<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        observer: &mut impl RoundObserver,
    ) -> Result<(Word, GameResult)> {
        let target = *self
            .vocab
            .words()
            .choose(rng)
            .ok_or(SolverError::EmptyVocabulary)?;
        let result = self.play(&target, observer)?;
        Ok((target, result))
    }

    /// Replay a sequence of (guess, pattern) rounds into a fresh game
    ///
    /// # Errors
    /// - `UnknownWord` if a guess is outside the vocabulary
    /// - `InvalidState` if the sequence continues past the end of the game
    pub fn replay<'w>(
        &self,
        rounds: impl IntoIterator<Item = (&'w Word, Pattern)>,
    ) -> Result<Game<'_, S>> {
        let mut game = self.new_game();
        for (word, pattern) in rounds {
            let id = self
                .vocab
                .id_of(word)
                .ok_or_else(|| SolverError::UnknownWord(word.to_string()))?;
            game.apply(id, pattern)?;
        }
        Ok(game)
    }
}
