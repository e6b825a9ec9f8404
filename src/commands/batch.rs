//! Batch evaluation
//!
//! Runs one game per target word and aggregates the outcomes into a round
//! histogram. Games are independent, so they run in parallel when asked.

use crate::core::Word;
use crate::error::Result;
use crate::output::formatters::progress_style;
use crate::solver::{GameResult, Quiet, Solver, Strategy};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// How a batch is run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Only play the first `limit` targets
    pub limit: Option<usize>,
    /// Spread games across the rayon pool
    pub parallel: bool,
    /// Show an indicatif progress bar
    pub progress: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            limit: None,
            parallel: true,
            progress: true,
        }
    }
}

/// Aggregate results of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub strategy: &'static str,
    pub total: usize,
    pub solved: usize,
    /// `histogram[r - 1]` counts games solved in `r` rounds; the last bucket
    /// counts unsolved games
    pub histogram: Vec<usize>,
    /// Unsolved targets, in input order
    pub unsolved: Vec<Word>,
    /// Games that ran out of candidates (also counted as unsolved)
    pub errors: usize,
    pub duration: Duration,
}

impl BatchReport {
    /// Mean rounds over solved games only
    #[must_use]
    pub fn average_rounds(&self) -> f64 {
        if self.solved == 0 {
            return 0.0;
        }
        let rounds: usize = self
            .histogram
            .iter()
            .take(self.histogram.len().saturating_sub(1))
            .enumerate()
            .map(|(bucket, &count)| (bucket + 1) * count)
            .sum();
        rounds as f64 / self.solved as f64
    }

    /// Fraction of games solved, in `[0, 1]`
    #[must_use]
    pub fn solve_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.solved as f64 / self.total as f64
        }
    }

    /// Size of the unsolved bucket
    #[must_use]
    pub fn unsolved_count(&self) -> usize {
        self.histogram.last().copied().unwrap_or(0)
    }
}

/// Play one game per target and aggregate the results
///
/// Failed games never abort the batch: a game that runs out of candidates is
/// recorded as unsolved and counted in `errors`.
pub fn run_batch<S: Strategy + Sync>(
    solver: &Solver<'_, S>,
    targets: &[Word],
    config: &BatchConfig,
) -> BatchReport {
    let targets = &targets[..config.limit.unwrap_or(targets.len()).min(targets.len())];
    let max_rounds = solver.config().max_rounds;

    let pb = if config.progress {
        ProgressBar::new(targets.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(progress_style(
        "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}",
    ));
    pb.set_message(solver.strategy().name());

    let start = Instant::now();
    let play = |target: &Word| -> Result<GameResult> {
        let outcome = solver.play(target, &mut Quiet);
        pb.inc(1);
        outcome
    };
    let outcomes: Vec<Result<GameResult>> = if config.parallel {
        targets.par_iter().map(play).collect()
    } else {
        targets.iter().map(play).collect()
    };
    let duration = start.elapsed();
    pb.finish_with_message("Complete!");

    let mut histogram = vec![0; max_rounds + 1];
    let mut unsolved = Vec::new();
    let mut solved = 0;
    let mut errors = 0;

    for (target, outcome) in targets.iter().zip(outcomes) {
        match outcome {
            Ok(result) if result.solved => {
                solved += 1;
                histogram[result.rounds_taken - 1] += 1;
            }
            Ok(_) => {
                histogram[max_rounds] += 1;
                unsolved.push(*target);
            }
            Err(_) => {
                errors += 1;
                histogram[max_rounds] += 1;
                unsolved.push(*target);
            }
        }
    }

    BatchReport {
        strategy: solver.strategy().name(),
        total: targets.len(),
        solved,
        histogram,
        unsolved,
        errors,
        duration,
    }
}

/// Write the unsolved targets to `path`, one per line
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_unsolved(path: &Path, report: &BatchReport) -> Result<()> {
    let mut content = String::with_capacity(report.unsolved.len() * 6);
    for word in &report.unsolved {
        content.push_str(word.as_str());
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}
