//! Feedback pattern index
//!
//! The index maps every (guess, pattern) pair to the vocabulary words that
//! would produce that pattern. It is built once per vocabulary and optionally
//! persisted through [`cache`].

pub mod cache;
mod table;

pub use cache::CacheOutcome;
pub use table::PatternIndex;
