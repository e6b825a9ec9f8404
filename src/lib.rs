//! Wordle Bot
//!
//! A five-letter word game solver built around a precomputed feedback index:
//! every (guess, pattern) pair maps to the vocabulary words that would produce
//! it, so each round of a game is a table lookup and a sorted merge.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_bot::core::{Pattern, Vocabulary, Word};
//! use wordle_bot::index::PatternIndex;
//! use wordle_bot::solver::{FrequencyStrategy, Quiet, Solver, SolverConfig};
//!
//! // Feedback between two words
//! let guess = Word::new("speed").unwrap();
//! let answer = Word::new("abide").unwrap();
//! let pattern = Pattern::calculate(&guess, &answer);
//! assert_eq!(pattern.value(), 90);
//!
//! // A full game
//! let vocab = Vocabulary::parse("apple grape table cable maple").unwrap();
//! let index = PatternIndex::build(&vocab);
//! let solver = Solver::new(FrequencyStrategy, &vocab, &index, SolverConfig::default()).unwrap();
//! let result = solver.play(&Word::new("apple").unwrap(), &mut Quiet).unwrap();
//! assert!(result.solved);
//! ```

// Core domain types
pub mod core;

// Library error type
pub mod error;

// Feedback pattern index and its cache
pub mod index;

// Solving algorithms
pub mod solver;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
