//! Pattern index preparation
//!
//! Builds the index with a progress bar, or loads it through the on-disk
//! cache, and summarizes its shape for the `build-index` command.

use crate::core::{Fingerprint, Pattern, Vocabulary, Word};
use crate::error::Result;
use crate::index::{CacheOutcome, PatternIndex, cache};
use crate::output::RenderConfig;
use crate::output::formatters::{progress_style, tint};
use colored::Color;
use indicatif::ProgressBar;
use std::path::Path;
use std::time::{Duration, Instant};

/// Build the index, showing a bar over guess rows when `progress` is set
#[must_use]
pub fn build_index(vocab: &Vocabulary, progress: bool) -> PatternIndex {
    if !progress {
        return PatternIndex::build(vocab);
    }

    let pb = ProgressBar::new(vocab.len() as u64);
    pb.set_style(progress_style(
        "{spinner:.green} Indexing [{bar:40.cyan/blue}] {pos}/{len} rows ({eta})",
    ));
    let index = PatternIndex::build_with_progress(vocab, &|| pb.inc(1));
    pb.finish_and_clear();
    index
}

/// Index for `vocab`, through the cache at `cache_path` if one is given
///
/// Returns the cache outcome when a cache was used.
///
/// # Errors
///
/// Returns an I/O error if the cache file exists but cannot be read, or if
/// the rebuilt index cannot be saved.
pub fn prepare_index(
    vocab: &Vocabulary,
    cache_path: Option<&Path>,
    progress: bool,
) -> Result<(PatternIndex, Option<CacheOutcome>)> {
    match cache_path {
        Some(path) => {
            let (index, outcome) =
                cache::load_or_build_with(path, vocab, |v| build_index(v, progress))?;
            Ok((index, Some(outcome)))
        }
        None => Ok((build_index(vocab, progress), None)),
    }
}

/// Tell the user what happened to the cache file
pub fn report_cache_outcome(path: &Path, outcome: &CacheOutcome, config: &RenderConfig) {
    match outcome {
        CacheOutcome::Loaded => {
            println!("Loaded pattern index from {}", path.display());
        }
        CacheOutcome::Built => {
            println!("Saved pattern index to {}", path.display());
        }
        CacheOutcome::Rebuilt { reason } => {
            eprintln!(
                "{} {reason}; rebuilt {}",
                tint("warning:", Color::Yellow, config),
                path.display()
            );
        }
    }
}

/// Shape of a built index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStats {
    pub word_count: usize,
    pub fingerprint: Fingerprint,
    /// (guess, pattern) pairs with at least one target
    pub nonempty_buckets: usize,
    /// First largest bucket in guess order
    pub largest_bucket: Option<(Word, Pattern, usize)>,
    pub elapsed: Duration,
}

impl IndexStats {
    /// Walk every row of the index
    #[must_use]
    pub fn collect(vocab: &Vocabulary, index: &PatternIndex, elapsed: Duration) -> Self {
        let mut nonempty_buckets = 0;
        let mut largest_bucket: Option<(Word, Pattern, usize)> = None;

        for guess in vocab.ids() {
            for (pattern, targets) in index.buckets(guess) {
                nonempty_buckets += 1;
                if largest_bucket
                    .as_ref()
                    .is_none_or(|(_, _, size)| targets.len() > *size)
                {
                    largest_bucket = Some((vocab.word(guess), pattern, targets.len()));
                }
            }
        }

        Self {
            word_count: index.word_count(),
            fingerprint: *index.fingerprint(),
            nonempty_buckets,
            largest_bucket,
            elapsed,
        }
    }

    /// Average targets per non-empty bucket
    #[must_use]
    pub fn mean_bucket(&self) -> f64 {
        if self.nonempty_buckets == 0 {
            0.0
        } else {
            (self.word_count * self.word_count) as f64 / self.nonempty_buckets as f64
        }
    }
}

/// Prepare the index and time it
///
/// # Errors
///
/// As [`prepare_index`].
pub fn run_build_index(
    vocab: &Vocabulary,
    cache_path: Option<&Path>,
    progress: bool,
) -> Result<(IndexStats, Option<CacheOutcome>)> {
    let start = Instant::now();
    let (index, outcome) = prepare_index(vocab, cache_path, progress)?;
    let stats = IndexStats::collect(vocab, &index, start.elapsed());
    Ok((stats, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn vocab() -> Vocabulary {
        Vocabulary::parse("apple grape table cable maple").unwrap()
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("wordle_bot_index_cmd_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn build_with_and_without_progress_agree() {
        let vocab = vocab();
        assert_eq!(build_index(&vocab, false), build_index(&vocab, true));
    }

    #[test]
    fn prepare_without_cache_builds() {
        let vocab = vocab();
        let (index, outcome) = prepare_index(&vocab, None, false).unwrap();
        assert!(outcome.is_none());
        assert_eq!(index, PatternIndex::build(&vocab));
    }

    #[test]
    fn prepare_with_cache_builds_then_loads() {
        let vocab = vocab();
        let path = scratch_path("prepare.cbor");
        let _ = std::fs::remove_file(&path);

        let (first, outcome) = prepare_index(&vocab, Some(&path), false).unwrap();
        assert_eq!(outcome, Some(CacheOutcome::Built));

        let (second, outcome) = prepare_index(&vocab, Some(&path), false).unwrap();
        assert_eq!(outcome, Some(CacheOutcome::Loaded));
        assert_eq!(first, second);
    }

    #[test]
    fn stats_cover_every_pair() {
        let vocab = vocab();
        let index = PatternIndex::build(&vocab);
        let stats = IndexStats::collect(&vocab, &index, Duration::ZERO);

        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.fingerprint, vocab.fingerprint());

        // Every row has the self bucket plus at least one other
        assert!(stats.nonempty_buckets >= 10);
        assert!(stats.nonempty_buckets <= 25);

        let (_, _, size) = stats.largest_bucket.unwrap();
        assert!(size >= 1);
        assert!(stats.mean_bucket() >= 1.0);
    }

    #[test]
    fn run_build_index_reports_stats() {
        let vocab = vocab();
        let (stats, outcome) = run_build_index(&vocab, None, false).unwrap();
        assert!(outcome.is_none());
        assert_eq!(stats.word_count, vocab.len());
    }
}
