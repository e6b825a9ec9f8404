//! Display functions for games and reports

use super::formatters::{create_progress_bar, heading, paint_guess, tint};
use crate::commands::batch::BatchReport;
use crate::commands::index::IndexStats;
use crate::core::{Pattern, Word, short_hex};
use crate::solver::{GameResult, RoundObserver};
use colored::Color;

/// How guesses are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Letters tinted green, yellow or grey
    #[default]
    Letters,
    /// The word followed by colored squares
    Emoji,
}

/// Rendering options, passed explicitly to everything that prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub color: bool,
    pub style: RenderStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: true,
            style: RenderStyle::Letters,
        }
    }
}

/// One round as a display line, e.g. `2) APPLE`
#[must_use]
pub fn render_round(round: usize, guess: &Word, pattern: Pattern, config: &RenderConfig) -> String {
    format!("{round}) {}", paint_guess(guess, pattern, config))
}

/// Prints every round to stdout as it is played
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalDisplay {
    pub config: RenderConfig,
    /// Also print how many candidates remain after each round
    pub show_remaining: bool,
}

impl TerminalDisplay {
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self {
            config,
            show_remaining: false,
        }
    }

    /// The line printed for one round
    #[must_use]
    pub fn line(&self, round: usize, guess: &Word, pattern: Pattern, remaining: usize) -> String {
        let line = render_round(round, guess, pattern, &self.config);
        if self.show_remaining && !pattern.is_perfect() {
            let note = format!("({remaining} left)");
            format!("{line}  {}", tint(&note, Color::BrightBlack, &self.config))
        } else {
            line
        }
    }
}

impl RoundObserver for TerminalDisplay {
    fn on_round(&mut self, round: usize, guess: &Word, pattern: Pattern, remaining: usize) {
        println!("{}", self.line(round, guess, pattern, remaining));
    }
}

/// One-line summary of a finished game
#[must_use]
pub fn game_summary(target: &Word, result: &GameResult) -> String {
    if result.solved {
        let noun = if result.rounds_taken == 1 {
            "round"
        } else {
            "rounds"
        };
        format!("Solved in {} {noun}.", result.rounds_taken)
    } else {
        format!("Failed to solve, the word was {target}")
    }
}

/// Print the outcome of a single game
pub fn print_game_summary(target: &Word, result: &GameResult, config: &RenderConfig) {
    let color = if result.solved {
        Color::Green
    } else {
        Color::Red
    };
    println!("\n{}", tint(&game_summary(target, result), color, config));
}

/// Print aggregate results of a batch run
pub fn print_batch_report(report: &BatchReport, config: &RenderConfig) {
    let rule = tint(&"═".repeat(60), Color::Cyan, config);
    println!("\n{rule}");
    println!(" {} ", heading("BATCH RESULTS", config));
    println!("{rule}");

    println!("\n{}", heading("Performance:", config));
    println!("   Strategy:         {}", report.strategy);
    println!("   Games played:     {}", report.total);
    println!(
        "   Solved:           {} {}",
        report.solved,
        tint(
            &format!("({:.1}%)", report.solve_rate() * 100.0),
            Color::Green,
            config
        )
    );
    if report.errors > 0 {
        println!(
            "   Ran dry:          {}",
            tint(&report.errors.to_string(), Color::Red, config)
        );
    }
    println!(
        "   Average rounds:   {}",
        tint(
            &format!("{:.3}", report.average_rounds()),
            Color::BrightYellow,
            config
        )
    );
    println!("   Time taken:       {:.2}s", report.duration.as_secs_f64());

    println!("\n{}", heading("Distribution:", config));
    let max_count = report.histogram.iter().copied().max().unwrap_or(0);
    let unsolved_bucket = report.histogram.len().saturating_sub(1);
    for (bucket, &count) in report.histogram.iter().enumerate() {
        let label = if bucket == unsolved_bucket {
            " X".to_string()
        } else {
            format!("{:>2}", bucket + 1)
        };
        let pct = if report.total > 0 {
            count as f64 / report.total as f64 * 100.0
        } else {
            0.0
        };
        let bar = create_progress_bar(count as f64, max_count as f64, 40);
        let color = if bucket == unsolved_bucket {
            Color::Red
        } else {
            Color::Green
        };
        println!(
            "  {label}: {} {count:5} ({pct:5.1}%)",
            tint(&bar, color, config)
        );
    }

    if !report.unsolved.is_empty() {
        println!("\n{}", heading("Unsolved:", config));
        let shown: Vec<String> = report
            .unsolved
            .iter()
            .take(20)
            .map(Word::to_string)
            .collect();
        let more = report.unsolved.len().saturating_sub(shown.len());
        let suffix = if more > 0 {
            format!(" ... and {more} more")
        } else {
            String::new()
        };
        println!(
            "   {}{suffix}",
            tint(&shown.join(" "), Color::Yellow, config)
        );
    }
}

/// Print pattern index statistics
pub fn print_index_stats(stats: &IndexStats, config: &RenderConfig) {
    println!("\n{}", heading("Pattern index", config));
    println!("   Words:            {}", stats.word_count);
    println!("   Fingerprint:      {}", short_hex(&stats.fingerprint));
    println!("   Bucket entries:   {}", stats.word_count * stats.word_count);
    println!("   Non-empty:        {}", stats.nonempty_buckets);
    println!("   Mean bucket:      {:.2}", stats.mean_bucket());
    if let Some((guess, pattern, size)) = &stats.largest_bucket {
        println!(
            "   Largest bucket:   {size} ({})",
            paint_guess(guess, *pattern, config)
        );
    }
    println!("   Time:             {:.2}s", stats.elapsed.as_secs_f64());
}
