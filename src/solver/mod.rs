//! Wordle solving algorithms
//!
//! Candidate tracking, guess selection strategies, and the per-game state
//! machine that ties them to the pattern index.

mod candidates;
mod engine;
mod frequency;
mod game;
pub mod strategy;

pub use candidates::CandidateSet;
pub use engine::{MAX_ROUNDS, Solver, SolverConfig};
pub use frequency::LetterFrequencyTable;
pub use game::{Game, GameResult, GameState, Quiet, Round, RoundObserver};
pub use strategy::{
    DampedFrequencyStrategy, FrequencyStrategy, PartitionStrategy, Strategy, StrategyKind,
};
