//! Guess selection strategies
//!
//! Defines the Strategy trait and concrete implementations. Every strategy
//! picks from the current candidates and breaks ties by taking the first best
//! word in vocabulary order.

use super::candidates::CandidateSet;
use super::frequency::LetterFrequencyTable;
use crate::core::{Pattern, Vocabulary, WordId};
use crate::error::{Result, SolverError};
use rayon::prelude::*;

const EMPTY_CANDIDATES: &str = "guess requested from an empty candidate set";

/// A strategy for selecting the next guess from the candidate set
pub trait Strategy {
    /// Select the next guess
    ///
    /// # Errors
    /// Returns `InvalidState` if `candidates` is empty.
    fn select_guess(&self, candidates: &CandidateSet, vocab: &Vocabulary) -> Result<WordId>;

    /// Short identifier for status output
    fn name(&self) -> &'static str;
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Distinct-letter frequency heuristic (default)
    Frequency(FrequencyStrategy),
    /// Smallest expected remaining candidate count
    Partition(PartitionStrategy),
    /// Log-damped letter occurrence heuristic
    Damped(DampedFrequencyStrategy),
}

impl Default for StrategyKind {
    fn default() -> Self {
        Self::Frequency(FrequencyStrategy)
    }
}

impl StrategyKind {
    /// Names accepted by [`StrategyKind::from_name`]
    pub const NAMES: [&'static str; 3] = ["frequency", "partition", "damped"];

    /// Create strategy from name string
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "frequency" | "freq" => Some(Self::Frequency(FrequencyStrategy)),
            "partition" | "expected" => Some(Self::Partition(PartitionStrategy)),
            "damped" | "log" => Some(Self::Damped(DampedFrequencyStrategy)),
            _ => None,
        }
    }
}

impl Strategy for StrategyKind {
    fn select_guess(&self, candidates: &CandidateSet, vocab: &Vocabulary) -> Result<WordId> {
        match self {
            Self::Frequency(s) => s.select_guess(candidates, vocab),
            Self::Partition(s) => s.select_guess(candidates, vocab),
            Self::Damped(s) => s.select_guess(candidates, vocab),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Frequency(s) => s.name(),
            Self::Partition(s) => s.name(),
            Self::Damped(s) => s.name(),
        }
    }
}

/// Letter-frequency heuristic
///
/// Scores each candidate by summing, over its distinct letters, how many
/// candidates contain that letter, and picks the highest score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrequencyStrategy;

impl FrequencyStrategy {
    /// Best candidate and its score
    ///
    /// # Errors
    /// Returns `InvalidState` if `candidates` is empty.
    pub fn best(candidates: &CandidateSet, vocab: &Vocabulary) -> Result<(WordId, u32)> {
        let table = LetterFrequencyTable::from_words(candidates.iter().map(|id| vocab.word(id)));

        let mut best: Option<(WordId, u32)> = None;
        for id in candidates.iter() {
            let score = table.score(&vocab.word(id));
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((id, score));
            }
        }

        best.ok_or(SolverError::InvalidState(EMPTY_CANDIDATES))
    }
}

impl Strategy for FrequencyStrategy {
    fn select_guess(&self, candidates: &CandidateSet, vocab: &Vocabulary) -> Result<WordId> {
        Self::best(candidates, vocab).map(|(id, _)| id)
    }

    fn name(&self) -> &'static str {
        "frequency"
    }
}

/// Log-damped letter frequency
///
/// Counts every letter occurrence among the candidates and scores a word by
/// `ln(count + 1)` summed over its distinct letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DampedFrequencyStrategy;

impl Strategy for DampedFrequencyStrategy {
    fn select_guess(&self, candidates: &CandidateSet, vocab: &Vocabulary) -> Result<WordId> {
        let table =
            LetterFrequencyTable::from_occurrences(candidates.iter().map(|id| vocab.word(id)));

        let mut best: Option<(WordId, f64)> = None;
        for id in candidates.iter() {
            let score = table.damped_score(&vocab.word(id));
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((id, score));
            }
        }

        best.map(|(id, _)| id)
            .ok_or(SolverError::InvalidState(EMPTY_CANDIDATES))
    }

    fn name(&self) -> &'static str {
        "damped"
    }
}

/// Partition-size strategy
///
/// For each candidate guess, splits the candidates by the pattern they would
/// produce and minimizes the sum of squared bucket sizes, i.e. the expected
/// number of candidates left after the guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartitionStrategy;

impl PartitionStrategy {
    /// Sum of squared bucket sizes when `guess` is played against `candidates`
    #[must_use]
    pub fn cost(guess: WordId, candidates: &CandidateSet, vocab: &Vocabulary) -> u64 {
        let guess = vocab.word(guess);
        let mut buckets = [0u32; Pattern::COUNT];
        for target in candidates.iter() {
            buckets[Pattern::calculate(&guess, &vocab.word(target)).index()] += 1;
        }
        buckets.iter().map(|&n| u64::from(n) * u64::from(n)).sum()
    }
}

impl Strategy for PartitionStrategy {
    fn select_guess(&self, candidates: &CandidateSet, vocab: &Vocabulary) -> Result<WordId> {
        candidates
            .as_slice()
            .par_iter()
            .enumerate()
            .map(|(pos, &guess)| (Self::cost(guess, candidates, vocab), pos, guess))
            .min()
            .map(|(_, _, guess)| guess)
            .ok_or(SolverError::InvalidState(EMPTY_CANDIDATES))
    }

    fn name(&self) -> &'static str {
        "partition"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;

    fn setup() -> (Vocabulary, CandidateSet) {
        let vocab = Vocabulary::parse("apple grape table cable maple").unwrap();
        let candidates = CandidateSet::full(&vocab);
        (vocab, candidates)
    }

    fn text(vocab: &Vocabulary, id: WordId) -> &str {
        vocab.words()[id.index()].as_str()
    }

    #[test]
    fn frequency_picks_highest_score() {
        let (vocab, candidates) = setup();
        let (best, score) = FrequencyStrategy::best(&candidates, &vocab).unwrap();
        assert_eq!(text(&vocab, best), "MAPLE");
        assert_eq!(score, 18);
    }

    #[test]
    fn frequency_ties_go_to_first_in_order() {
        let (vocab, _) = setup();
        let apple = vocab.id_of(&Word::new("apple").unwrap()).unwrap();
        let table = vocab.id_of(&Word::new("table").unwrap()).unwrap();
        let cable = vocab.id_of(&Word::new("cable").unwrap()).unwrap();

        // TABLE and CABLE both score 12 here, APPLE only 10
        let candidates = CandidateSet::from_ids([cable, table, apple]);
        let pick = FrequencyStrategy.select_guess(&candidates, &vocab).unwrap();
        assert_eq!(pick, table);

        let candidates = CandidateSet::from_ids([cable, table]);
        let (pick, score) = FrequencyStrategy::best(&candidates, &vocab).unwrap();
        assert_eq!((pick, score), (table, 9));
    }

    #[test]
    fn empty_candidates_is_invalid_state() {
        let (vocab, _) = setup();
        let empty = CandidateSet::from_ids([]);

        assert!(matches!(
            FrequencyStrategy.select_guess(&empty, &vocab),
            Err(SolverError::InvalidState(_))
        ));
        assert!(matches!(
            PartitionStrategy.select_guess(&empty, &vocab),
            Err(SolverError::InvalidState(_))
        ));
        assert!(matches!(
            DampedFrequencyStrategy.select_guess(&empty, &vocab),
            Err(SolverError::InvalidState(_))
        ));
    }

    #[test]
    fn damped_picks_common_letters() {
        let (vocab, candidates) = setup();
        let pick = DampedFrequencyStrategy
            .select_guess(&candidates, &vocab)
            .unwrap();
        assert_eq!(text(&vocab, pick), "MAPLE");

        let single = CandidateSet::from_ids([vocab.id_of(&Word::new("cable").unwrap()).unwrap()]);
        let pick = DampedFrequencyStrategy.select_guess(&single, &vocab).unwrap();
        assert_eq!(text(&vocab, pick), "CABLE");
    }

    #[test]
    fn partition_cost_of_perfect_split() {
        let (vocab, candidates) = setup();
        // Every guess separates itself; cost is at least the candidate count
        for guess in candidates.iter() {
            let cost = PartitionStrategy::cost(guess, &candidates, &vocab);
            assert!(cost >= candidates.len() as u64);
            assert!(cost <= (candidates.len() * candidates.len()) as u64);
        }
    }

    #[test]
    fn partition_prefers_splitting_guess() {
        let vocab = Vocabulary::parse("aaaaa bbbbb ccccc abcde").unwrap();
        let candidates = CandidateSet::full(&vocab);

        // ABCDE tells all four apart; each repeated-letter word leaves a pair
        let pick = PartitionStrategy.select_guess(&candidates, &vocab).unwrap();
        assert_eq!(text(&vocab, pick), "ABCDE");
    }

    #[test]
    fn partition_is_deterministic() {
        let (vocab, candidates) = setup();
        let first = PartitionStrategy.select_guess(&candidates, &vocab).unwrap();
        for _ in 0..5 {
            assert_eq!(
                PartitionStrategy.select_guess(&candidates, &vocab).unwrap(),
                first
            );
        }
    }

    #[test]
    fn strategy_kind_from_name() {
        assert_eq!(
            StrategyKind::from_name("frequency"),
            Some(StrategyKind::Frequency(FrequencyStrategy))
        );
        assert_eq!(
            StrategyKind::from_name("Partition"),
            Some(StrategyKind::Partition(PartitionStrategy))
        );
        assert_eq!(
            StrategyKind::from_name("damped").map(|s| s.name()),
            Some("damped")
        );
        assert_eq!(StrategyKind::from_name("entropy"), None);
        assert_eq!(StrategyKind::default().name(), "frequency");
    }
}
