//! Single-game state machine
//!
//! `Init → Guessing → (Solved | Exhausted)`. A game owns its candidate set
//! and borrows everything else from its [`Solver`].

use super::candidates::CandidateSet;
use super::engine::Solver;
use super::strategy::Strategy;
use crate::core::{Pattern, Word, WordId};
use crate::error::{Result, SolverError};

/// Where a game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No guess made yet
    Init,
    /// At least one guess made, target not yet found, rounds remain
    Guessing,
    /// The last guess was the target
    Solved,
    /// Round budget used up without finding the target
    Exhausted,
}

impl GameState {
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Solved | Self::Exhausted)
    }
}

/// One completed round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub guess: Word,
    pub pattern: Pattern,
    /// Candidates left after filtering by this round's feedback
    pub remaining: usize,
}

/// Final outcome of a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub solved: bool,
    pub rounds_taken: usize,
    pub guesses: Vec<Word>,
}

/// Receives each round as it is played
///
/// Observers only watch; they never influence the game.
pub trait RoundObserver {
    fn on_round(&mut self, round: usize, guess: &Word, pattern: Pattern, remaining: usize);
}

/// Observer that ignores every round
#[derive(Debug, Clone, Copy, Default)]
pub struct Quiet;

impl RoundObserver for Quiet {
    fn on_round(&mut self, _: usize, _: &Word, _: Pattern, _: usize) {}
}

impl<F> RoundObserver for F
where
    F: FnMut(usize, &Word, Pattern, usize),
{
    fn on_round(&mut self, round: usize, guess: &Word, pattern: Pattern, remaining: usize) {
        self(round, guess, pattern, remaining);
    }
}

/// A game in progress
pub struct Game<'a, S: Strategy> {
    solver: &'a Solver<'a, S>,
    candidates: CandidateSet,
    history: Vec<Round>,
    state: GameState,
}

impl<'a, S: Strategy> Game<'a, S> {
    pub(crate) fn new(solver: &'a Solver<'a, S>) -> Self {
        Self {
            solver,
            candidates: CandidateSet::full(solver.vocabulary()),
            history: Vec::new(),
            state: GameState::Init,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Number of guesses made so far
    #[must_use]
    pub fn round(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    #[must_use]
    pub fn history(&self) -> &[Round] {
        &self.history
    }

    /// The guess the strategy would make next
    ///
    /// # Errors
    /// - `InvalidState` if the game is already over
    /// - `NoCandidatesRemaining` if feedback has eliminated every word
    pub fn suggest(&self) -> Result<WordId> {
        if self.state.is_over() {
            return Err(SolverError::InvalidState("game is already over"));
        }

        self.solver
            .strategy()
            .select_guess(&self.candidates, self.solver.vocabulary())
            .map_err(|e| match e {
                SolverError::InvalidState(_) => SolverError::NoCandidatesRemaining {
                    round: self.round(),
                },
                other => other,
            })
    }

    /// Record a guess and the feedback it received
    ///
    /// The guess is removed from the candidates, which are then narrowed to
    /// the index bucket for `(guess, pattern)`.
    ///
    /// # Errors
    /// Returns `InvalidState` if the game is already over.
    pub fn apply(&mut self, guess: WordId, pattern: Pattern) -> Result<GameState> {
        if self.state.is_over() {
            return Err(SolverError::InvalidState("game is already over"));
        }

        self.candidates.remove(guess);
        self.candidates
            .retain_in(self.solver.index().lookup(guess, pattern));

        self.history.push(Round {
            guess: self.solver.vocabulary().word(guess),
            pattern,
            remaining: self.candidates.len(),
        });

        self.state = if pattern.is_perfect() {
            GameState::Solved
        } else if self.round() >= self.solver.config().max_rounds {
            GameState::Exhausted
        } else {
            GameState::Guessing
        };

        Ok(self.state)
    }

    /// Play one round against a known target
    ///
    /// # Errors
    /// As [`Game::suggest`].
    pub fn step(&mut self, target: &Word, observer: &mut impl RoundObserver) -> Result<GameState> {
        let guess = self.suggest()?;
        let guess_word = self.solver.vocabulary().word(guess);
        let pattern = Pattern::calculate(&guess_word, target);

        let state = self.apply(guess, pattern)?;
        observer.on_round(self.round(), &guess_word, pattern, self.candidates.len());
        Ok(state)
    }

    /// Outcome, once the game is over
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.state.is_over().then(|| GameResult {
            solved: self.state == GameState::Solved,
            rounds_taken: self.round(),
            guesses: self.history.iter().map(|r| r.guess).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vocabulary;
    use crate::index::PatternIndex;
    use crate::solver::{FrequencyStrategy, SolverConfig};

    fn fixture() -> (Vocabulary, PatternIndex) {
        let vocab = Vocabulary::parse("apple grape table cable maple").unwrap();
        let index = PatternIndex::build(&vocab);
        (vocab, index)
    }

    #[test]
    fn new_game_starts_with_full_candidates() {
        let (vocab, index) = fixture();
        let solver =
            Solver::new(FrequencyStrategy, &vocab, &index, SolverConfig::default()).unwrap();
        let game = solver.new_game();

        assert_eq!(game.state(), GameState::Init);
        assert_eq!(game.round(), 0);
        assert_eq!(game.candidates().len(), 5);
        assert!(game.result().is_none());
    }

    #[test]
    fn apply_narrows_and_drops_guess() {
        let (vocab, index) = fixture();
        let solver =
            Solver::new(FrequencyStrategy, &vocab, &index, SolverConfig::default()).unwrap();
        let mut game = solver.new_game();

        let maple = game.suggest().unwrap();
        let target = Word::new("apple").unwrap();
        let pattern = Pattern::calculate(&vocab.word(maple), &target);

        assert_eq!(game.apply(maple, pattern).unwrap(), GameState::Guessing);
        assert!(!game.candidates().contains(maple));
        assert_eq!(game.candidates().len(), 1);
        assert_eq!(game.history()[0].remaining, 1);
    }

    #[test]
    fn step_reports_to_observer() {
        let (vocab, index) = fixture();
        let solver =
            Solver::new(FrequencyStrategy, &vocab, &index, SolverConfig::default()).unwrap();
        let mut game = solver.new_game();
        let target = Word::new("apple").unwrap();

        let mut seen = Vec::new();
        let mut record = |round: usize, guess: &Word, pattern: Pattern, _: usize| {
            seen.push((round, *guess, pattern));
        };
        while !game.step(&target, &mut record).unwrap().is_over() {}

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, 1);
        assert_eq!(seen[0].1.as_str(), "MAPLE");
        assert_eq!(seen[1].1, target);
        assert!(seen[1].2.is_perfect());
    }

    #[test]
    fn contradictory_feedback_leaves_no_candidates() {
        let (vocab, index) = fixture();
        let solver =
            Solver::new(FrequencyStrategy, &vocab, &index, SolverConfig::default()).unwrap();
        let mut game = solver.new_game();

        let guess = game.suggest().unwrap();
        // No word in the vocabulary is all-absent against MAPLE
        game.apply(guess, Pattern::new(0)).unwrap();

        assert!(game.candidates().is_empty());
        assert!(matches!(
            game.suggest(),
            Err(SolverError::NoCandidatesRemaining { round: 1 })
        ));
    }

    #[test]
    fn round_budget_exhausts() {
        let (vocab, index) = fixture();
        let config = SolverConfig { max_rounds: 1 };
        let solver = Solver::new(FrequencyStrategy, &vocab, &index, config).unwrap();
        let mut game = solver.new_game();

        let state = game.step(&Word::new("grape").unwrap(), &mut Quiet).unwrap();
        assert_eq!(state, GameState::Exhausted);
        assert!(matches!(game.suggest(), Err(SolverError::InvalidState(_))));

        let result = game.result().unwrap();
        assert!(!result.solved);
        assert_eq!(result.rounds_taken, 1);
    }

    #[test]
    fn apply_after_solved_is_rejected() {
        let (vocab, index) = fixture();
        let solver =
            Solver::new(FrequencyStrategy, &vocab, &index, SolverConfig::default()).unwrap();
        let mut game = solver.new_game();

        let guess = game.suggest().unwrap();
        assert_eq!(
            game.apply(guess, Pattern::PERFECT).unwrap(),
            GameState::Solved
        );
        assert!(game.apply(guess, Pattern::PERFECT).is_err());
    }
}
