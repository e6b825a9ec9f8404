//! Ordered, deduplicated word list with stable integer ids
//!
//! Ids are assigned in insertion order and are what the pattern index and
//! candidate sets store. Iteration order is the tie-break order used by guess
//! selection.

use super::word::Word;
use crate::error::{Result, SolverError};
use rustc_hash::FxHashMap;
use sha2::{Digest, Sha256};
use std::fmt;

/// Index of a word within its [`Vocabulary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId(u16);

impl WordId {
    #[inline]
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// SHA-256 digest identifying a vocabulary's exact content and order
pub type Fingerprint = [u8; 32];

/// The fixed set of words a game draws targets and guesses from
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: Vec<Word>,
    ids: FxHashMap<Word, WordId>,
}

impl Vocabulary {
    /// Parse a whitespace-separated, case-insensitive word list
    ///
    /// Duplicate words keep their first position.
    ///
    /// # Errors
    /// - `MalformedVocabulary` for any token that is not exactly 5 letters
    /// - `EmptyVocabulary` if the text holds no words
    /// - `VocabularyTooLarge` past 65,535 distinct words
    ///
    /// # Examples
    /// ```
    /// use wordle_bot::core::Vocabulary;
    ///
    /// let vocab = Vocabulary::parse("apple grape\nTABLE apple").unwrap();
    /// assert_eq!(vocab.len(), 3);
    /// assert_eq!(vocab.words()[1].as_str(), "GRAPE");
    ///
    /// assert!(Vocabulary::parse("apple pear").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let words = text
            .split_whitespace()
            .map(|token| {
                Word::new(token).map_err(|e| SolverError::MalformedVocabulary {
                    token: token.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_words(words)
    }

    /// Build a vocabulary from already-validated words
    ///
    /// # Errors
    /// Returns `EmptyVocabulary` or `VocabularyTooLarge`.
    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Result<Self> {
        let mut unique = Vec::new();
        let mut ids = FxHashMap::default();

        for word in words {
            if ids.contains_key(&word) {
                continue;
            }
            // Keep len() itself representable as a u16
            let raw = u16::try_from(unique.len())
                .ok()
                .filter(|&raw| raw < u16::MAX)
                .ok_or(SolverError::VocabularyTooLarge(unique.len() + 1))?;
            ids.insert(word, WordId(raw));
            unique.push(word);
        }

        if unique.is_empty() {
            return Err(SolverError::EmptyVocabulary);
        }

        Ok(Self {
            words: unique,
            ids,
        })
    }

    /// Number of words
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false for a constructed vocabulary
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in id order
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Word for an id
    ///
    /// # Panics
    /// Panics if the id does not belong to this vocabulary
    #[inline]
    #[must_use]
    pub fn word(&self, id: WordId) -> Word {
        self.words[id.index()]
    }

    /// Id of a word, if present
    #[inline]
    #[must_use]
    pub fn id_of(&self, word: &Word) -> Option<WordId> {
        self.ids.get(word).copied()
    }

    /// Whether the word belongs to this vocabulary
    #[inline]
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.ids.contains_key(word)
    }

    /// Iterate `(id, word)` pairs in id order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (WordId, Word)> + '_ {
        self.words
            .iter()
            .enumerate()
            .map(|(i, &w)| (WordId(i as u16), w))
    }

    /// Iterate all ids in order
    pub fn ids(&self) -> impl ExactSizeIterator<Item = WordId> + use<> {
        (0..self.words.len() as u16).map(WordId)
    }

    /// Content fingerprint used to key persisted pattern indexes
    ///
    /// Domain-separated SHA-256 over the word count and the words in order,
    /// so reordering the list changes the fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = Sha256::new();
        hasher.update(b"WORDLE_BOT:VOCABULARY:v1");
        hasher.update((self.words.len() as u64).to_le_bytes());
        for word in &self.words {
            hasher.update(word.chars());
        }
        hasher.finalize().into()
    }
}

/// Short hex rendering of a fingerprint for status output
#[must_use]
pub fn short_hex(fingerprint: &Fingerprint) -> String {
    use std::fmt::Write;

    fingerprint[..6].iter().fold(String::new(), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
