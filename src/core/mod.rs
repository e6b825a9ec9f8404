//! Core domain types for the word game
//!
//! This module contains the fundamental domain types: words, feedback
//! patterns, and the vocabulary that assigns words their ids. Everything here
//! is pure and deterministic.

mod pattern;
mod vocabulary;
mod word;

pub use pattern::{Mark, Pattern};
pub use vocabulary::{Fingerprint, Vocabulary, WordId, short_hex};
pub use word::{ALPHABET_SIZE, WORD_LENGTH, Word, WordError};
