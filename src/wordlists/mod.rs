//! Word lists for the solver
//!
//! Provides the embedded vocabulary compiled into the binary and loaders for
//! custom lists.

mod embedded;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};
