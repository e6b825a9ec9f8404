//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing. Everything takes a
//! [`RenderConfig`] rather than reading process-wide color settings.

pub mod display;
pub mod formatters;

pub use display::{
    RenderConfig, RenderStyle, TerminalDisplay, print_batch_report, print_game_summary,
    print_index_stats, render_round,
};
