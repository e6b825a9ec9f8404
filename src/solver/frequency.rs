//! Letter frequency table
//!
//! Counts, for each letter, how many words in a set contain it. A word with a
//! repeated letter contributes once for that letter, unless the table is built
//! with [`LetterFrequencyTable::from_occurrences`].

use crate::core::{ALPHABET_SIZE, Word};

/// Words-containing-letter counts for A-Z
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LetterFrequencyTable {
    counts: [u32; ALPHABET_SIZE],
}

impl LetterFrequencyTable {
    /// Tally letters over a set of words
    ///
    /// # Examples
    /// ```
    /// use wordle_bot::core::Word;
    /// use wordle_bot::solver::LetterFrequencyTable;
    ///
    /// let words = ["speed", "erase"].map(|w| Word::new(w).unwrap());
    /// let table = LetterFrequencyTable::from_words(words);
    ///
    /// assert_eq!(table.get(b'E'), 2); // once per word, not per occurrence
    /// assert_eq!(table.get(b'P'), 1);
    /// ```
    #[must_use]
    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Self {
        let mut counts = [0u32; ALPHABET_SIZE];
        for word in words {
            let mask = word.letter_mask();
            for (letter, count) in counts.iter_mut().enumerate() {
                *count += (mask >> letter) & 1;
            }
        }
        Self { counts }
    }

    /// Tally every letter occurrence, so repeated letters count repeatedly
    #[must_use]
    pub fn from_occurrences(words: impl IntoIterator<Item = Word>) -> Self {
        let mut counts = [0u32; ALPHABET_SIZE];
        for word in words {
            for (count, n) in counts.iter_mut().zip(word.letter_counts()) {
                *count += u32::from(n);
            }
        }
        Self { counts }
    }

    /// Count for an uppercase ASCII letter
    #[must_use]
    pub fn get(&self, letter: u8) -> u32 {
        letter
            .checked_sub(b'A')
            .and_then(|i| self.counts.get(usize::from(i)))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of the counts of the distinct letters in `word`
    #[must_use]
    pub fn score(&self, word: &Word) -> u32 {
        let mask = word.letter_mask();
        self.counts
            .iter()
            .enumerate()
            .filter(|(letter, _)| mask & (1 << letter) != 0)
            .map(|(_, &count)| count)
            .sum()
    }

    /// Sum of `ln(count + 1)` over the distinct letters in `word`
    ///
    /// Flattens the lead of very common letters.
    #[must_use]
    pub fn damped_score(&self, word: &Word) -> f64 {
        let mask = word.letter_mask();
        self.counts
            .iter()
            .enumerate()
            .filter(|(letter, _)| mask & (1 << letter) != 0)
            .map(|(_, &count)| f64::from(count).ln_1p())
            .sum()
    }
}
