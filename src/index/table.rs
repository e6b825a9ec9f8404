//! Precomputed (guess, pattern) → targets table
//!
//! Each guess owns one row holding every vocabulary word exactly once, grouped
//! by the pattern that word produces against the guess. Rows are laid out
//! back to back; a per-row offset table of 244 entries marks the bucket
//! boundaries, so a lookup is two array reads.

use crate::core::{Fingerprint, Pattern, Vocabulary, WordId};
use crate::error::{Result, SolverError};
use rayon::prelude::*;

/// Offsets per row: one start per pattern plus the row end
const ROW_STRIDE: usize = Pattern::COUNT + 1;

/// Feedback index over a whole vocabulary
///
/// Immutable once built; share it by reference across games and threads.
///
/// # Examples
/// ```
/// use wordle_bot::core::{Pattern, Vocabulary, Word};
/// use wordle_bot::index::PatternIndex;
///
/// let vocab = Vocabulary::parse("apple grape table cable maple").unwrap();
/// let index = PatternIndex::build(&vocab);
///
/// let table = vocab.id_of(&Word::new("table").unwrap()).unwrap();
/// let cable = vocab.id_of(&Word::new("cable").unwrap()).unwrap();
/// let pattern = Pattern::calculate(&vocab.word(table), &vocab.word(cable));
///
/// assert_eq!(index.lookup(table, pattern), &[cable]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternIndex {
    word_count: usize,
    fingerprint: Fingerprint,
    /// Row-relative bucket starts, `word_count * ROW_STRIDE` entries
    offsets: Vec<u16>,
    /// `word_count * word_count` target ids
    targets: Vec<WordId>,
}

impl PatternIndex {
    /// Build the index for every (guess, target) pair, one rayon task per guess
    #[must_use]
    pub fn build(vocab: &Vocabulary) -> Self {
        Self::build_with_progress(vocab, &|| {})
    }

    /// Parallel build that calls `on_row` after each finished guess row
    ///
    /// Rows are collected in guess order, so the result does not depend on
    /// scheduling.
    #[must_use]
    pub fn build_with_progress(vocab: &Vocabulary, on_row: &(dyn Fn() + Sync)) -> Self {
        let rows: Vec<Row> = vocab
            .ids()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|guess| {
                let row = Row::build(vocab, guess);
                on_row();
                row
            })
            .collect();

        Self::from_rows(vocab, rows)
    }

    /// Single-threaded build
    #[must_use]
    pub fn build_sequential(vocab: &Vocabulary) -> Self {
        let rows = vocab.ids().map(|guess| Row::build(vocab, guess)).collect();
        Self::from_rows(vocab, rows)
    }

    fn from_rows(vocab: &Vocabulary, rows: Vec<Row>) -> Self {
        let word_count = vocab.len();
        let mut offsets = Vec::with_capacity(word_count * ROW_STRIDE);
        let mut targets = Vec::with_capacity(word_count * word_count);

        for row in rows {
            offsets.extend_from_slice(&row.offsets);
            targets.extend(row.targets);
        }

        Self {
            word_count,
            fingerprint: vocab.fingerprint(),
            offsets,
            targets,
        }
    }

    /// Reassemble an index from persisted parts, checking its structure
    ///
    /// # Errors
    /// Returns `CacheCorrupt` if the parts cannot describe a valid index.
    pub(crate) fn from_parts(
        word_count: usize,
        fingerprint: Fingerprint,
        offsets: Vec<u16>,
        targets: Vec<u16>,
    ) -> Result<Self> {
        let corrupt = SolverError::CacheCorrupt;

        if offsets.len() != word_count * ROW_STRIDE {
            return Err(corrupt(format!(
                "expected {} offsets, found {}",
                word_count * ROW_STRIDE,
                offsets.len()
            )));
        }
        if targets.len() != word_count * word_count {
            return Err(corrupt(format!(
                "expected {} targets, found {}",
                word_count * word_count,
                targets.len()
            )));
        }

        for (row, bounds) in offsets.chunks_exact(ROW_STRIDE).enumerate() {
            let well_formed = bounds[0] == 0
                && usize::from(bounds[Pattern::COUNT]) == word_count
                && bounds.windows(2).all(|w| w[0] <= w[1]);
            if !well_formed {
                return Err(corrupt(format!("row {row} has invalid bucket offsets")));
            }
        }

        if let Some(bad) = targets.iter().find(|&&t| usize::from(t) >= word_count) {
            return Err(corrupt(format!("target id {bad} out of range")));
        }

        // Each row must hold every id once, ascending within each bucket,
        // with the guess alone in its own PERFECT bucket
        let mut seen = vec![usize::MAX; word_count];
        for (row, (bounds, ids)) in offsets
            .chunks_exact(ROW_STRIDE)
            .zip(targets.chunks_exact(word_count.max(1)))
            .enumerate()
        {
            for pattern in 0..Pattern::COUNT {
                let bucket = &ids[usize::from(bounds[pattern])..usize::from(bounds[pattern + 1])];
                if !bucket.windows(2).all(|w| w[0] < w[1]) {
                    return Err(corrupt(format!("row {row} has an unsorted bucket")));
                }
                for &id in bucket {
                    let slot = &mut seen[usize::from(id)];
                    if *slot == row {
                        return Err(corrupt(format!("row {row} repeats target id {id}")));
                    }
                    *slot = row;
                }
            }

            let perfect = Pattern::PERFECT.index();
            let own = &ids[usize::from(bounds[perfect])..usize::from(bounds[perfect + 1])];
            if own != [row as u16].as_slice() {
                return Err(corrupt(format!("row {row} has a wrong PERFECT bucket")));
            }
        }

        Ok(Self {
            word_count,
            fingerprint,
            offsets,
            targets: targets.into_iter().map(WordId::new).collect(),
        })
    }

    /// Targets that produce `pattern` when `guess` is played
    ///
    /// Unseen patterns yield an empty slice. Buckets are sorted by id.
    ///
    /// # Panics
    /// Panics if `guess` is not an id of the indexed vocabulary
    #[inline]
    #[must_use]
    pub fn lookup(&self, guess: WordId, pattern: Pattern) -> &[WordId] {
        let row = guess.index();
        let bounds = &self.offsets[row * ROW_STRIDE..(row + 1) * ROW_STRIDE];
        let base = row * self.word_count;
        let start = usize::from(bounds[pattern.index()]);
        let end = usize::from(bounds[pattern.index() + 1]);
        &self.targets[base + start..base + end]
    }

    /// Non-empty buckets for a guess, in pattern order
    pub fn buckets(&self, guess: WordId) -> impl Iterator<Item = (Pattern, &[WordId])> {
        Pattern::all()
            .map(move |pattern| (pattern, self.lookup(guess, pattern)))
            .filter(|(_, bucket)| !bucket.is_empty())
    }

    /// Size of the vocabulary this index covers
    #[inline]
    #[must_use]
    pub const fn word_count(&self) -> usize {
        self.word_count
    }

    /// Fingerprint of the vocabulary this index was built from
    #[inline]
    #[must_use]
    pub const fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Check that this index was built from `vocab`
    ///
    /// # Errors
    /// Returns `CacheMismatch` when the fingerprints differ.
    pub fn ensure_matches(&self, vocab: &Vocabulary) -> Result<()> {
        if self.word_count == vocab.len() && self.fingerprint == vocab.fingerprint() {
            Ok(())
        } else {
            Err(SolverError::CacheMismatch(
                "index was built from a different vocabulary".to_string(),
            ))
        }
    }

    pub(crate) fn raw_offsets(&self) -> &[u16] {
        &self.offsets
    }

    pub(crate) fn raw_targets(&self) -> impl Iterator<Item = u16> + '_ {
        self.targets.iter().map(|id| id.raw())
    }
}

/// One guess's buckets, counting-sorted by pattern
struct Row {
    offsets: [u16; ROW_STRIDE],
    targets: Vec<WordId>,
}

impl Row {
    fn build(vocab: &Vocabulary, guess: WordId) -> Self {
        let guess_word = vocab.word(guess);
        let patterns: Vec<Pattern> = vocab
            .words()
            .iter()
            .map(|target| Pattern::calculate(&guess_word, target))
            .collect();

        let mut offsets = [0u16; ROW_STRIDE];
        for pattern in &patterns {
            offsets[pattern.index() + 1] += 1;
        }
        for i in 1..ROW_STRIDE {
            offsets[i] += offsets[i - 1];
        }

        // Stable placement keeps each bucket in ascending id order
        let mut cursor = offsets;
        let mut targets = vec![WordId::new(0); patterns.len()];
        for (target, pattern) in vocab.ids().zip(&patterns) {
            let slot = &mut cursor[pattern.index()];
            targets[usize::from(*slot)] = target;
            *slot += 1;
        }

        Self { offsets, targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;

    fn small_vocab() -> Vocabulary {
        Vocabulary::parse("apple grape table cable maple speed abide erase robot floor").unwrap()
    }

    #[test]
    fn every_row_partitions_the_vocabulary() {
        let vocab = small_vocab();
        let index = PatternIndex::build(&vocab);

        for guess in vocab.ids() {
            let mut seen: Vec<WordId> = index
                .buckets(guess)
                .filter(|(pattern, _)| !pattern.is_perfect())
                .flat_map(|(_, bucket)| bucket.iter().copied())
                .collect();
            let before_dedup = seen.len();
            seen.sort();
            seen.dedup();

            let expected: Vec<WordId> = vocab.ids().filter(|&id| id != guess).collect();
            assert_eq!(seen.len(), before_dedup, "buckets overlap");
            assert_eq!(seen, expected);

            assert_eq!(index.lookup(guess, Pattern::PERFECT), &[guess]);
        }
    }

    #[test]
    fn buckets_agree_with_feedback() {
        let vocab = small_vocab();
        let index = PatternIndex::build(&vocab);

        for guess in vocab.ids() {
            for (pattern, bucket) in index.buckets(guess) {
                assert!(bucket.windows(2).all(|w| w[0] < w[1]));
                for &target in bucket {
                    assert_eq!(
                        Pattern::calculate(&vocab.word(guess), &vocab.word(target)),
                        pattern
                    );
                }
            }
        }
    }

    #[test]
    fn unseen_pattern_is_empty() {
        let vocab = small_vocab();
        let index = PatternIndex::build(&vocab);
        let guess = vocab.id_of(&Word::new("apple").unwrap()).unwrap();

        // Four exact and one present is impossible
        let impossible = Pattern::parse("GGGGY").unwrap();
        assert!(index.lookup(guess, impossible).is_empty());
    }

    #[test]
    fn builds_are_reproducible() {
        let vocab = small_vocab();
        let parallel = PatternIndex::build(&vocab);
        let again = PatternIndex::build(&vocab);
        let sequential = PatternIndex::build_sequential(&vocab);

        assert_eq!(parallel, again);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn progress_called_once_per_row() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let vocab = small_vocab();
        let rows = AtomicUsize::new(0);
        let _ = PatternIndex::build_with_progress(&vocab, &|| {
            rows.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(rows.load(Ordering::Relaxed), vocab.len());
    }

    #[test]
    fn ensure_matches_detects_other_vocabulary() {
        let vocab = small_vocab();
        let index = PatternIndex::build(&vocab);
        assert!(index.ensure_matches(&vocab).is_ok());

        let other = Vocabulary::parse("apple grape").unwrap();
        assert!(matches!(
            index.ensure_matches(&other),
            Err(SolverError::CacheMismatch(_))
        ));
    }

    #[test]
    fn from_parts_rejects_bad_shapes() {
        let vocab = Vocabulary::parse("apple grape").unwrap();
        let index = PatternIndex::build(&vocab);
        let offsets = index.raw_offsets().to_vec();
        let targets: Vec<u16> = index.raw_targets().collect();

        let rebuilt =
            PatternIndex::from_parts(2, vocab.fingerprint(), offsets.clone(), targets.clone())
                .unwrap();
        assert_eq!(rebuilt, index);

        assert!(matches!(
            PatternIndex::from_parts(2, vocab.fingerprint(), offsets[1..].to_vec(), targets.clone()),
            Err(SolverError::CacheCorrupt(_))
        ));

        let mut out_of_range = targets.clone();
        out_of_range[0] = 7;
        assert!(matches!(
            PatternIndex::from_parts(2, vocab.fingerprint(), offsets.clone(), out_of_range),
            Err(SolverError::CacheCorrupt(_))
        ));

        let mut unordered = offsets;
        unordered[1] = 2;
        unordered[2] = 0;
        assert!(matches!(
            PatternIndex::from_parts(2, vocab.fingerprint(), unordered, targets),
            Err(SolverError::CacheCorrupt(_))
        ));
    }

    #[test]
    fn from_parts_rejects_shuffled_rows() {
        let vocab = small_vocab();
        let v = vocab.len();
        let index = PatternIndex::build(&vocab);
        let offsets = index.raw_offsets().to_vec();
        let targets: Vec<u16> = index.raw_targets().collect();

        // The last slot of a row is the guess itself in the PERFECT bucket
        let mut swapped = targets.clone();
        swapped.swap(4 * v, 5 * v - 1);
        assert!(matches!(
            PatternIndex::from_parts(v, vocab.fingerprint(), offsets.clone(), swapped),
            Err(SolverError::CacheCorrupt(_))
        ));

        let mut repeated = targets;
        repeated[1] = repeated[0];
        assert!(matches!(
            PatternIndex::from_parts(v, vocab.fingerprint(), offsets, repeated),
            Err(SolverError::CacheCorrupt(_))
        ));
    }
}
