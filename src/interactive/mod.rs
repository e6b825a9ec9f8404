//! Interactive assistant
//!
//! Suggests guesses for a game played elsewhere: the user reports the
//! feedback for each suggestion and the candidates narrow accordingly.

pub mod app;
mod rendering;

pub use app::{App, run_tui};
