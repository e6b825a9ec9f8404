//! Five-letter word representation
//!
//! A Word stores its letters as uppercase ASCII bytes. It is `Copy` so that
//! games and index rows can pass words around without allocation.

use std::fmt;

/// Number of letters in every word
pub const WORD_LENGTH: usize = 5;

/// Size of the alphabet (A-Z)
pub const ALPHABET_SIZE: usize = 26;

/// A 5-letter uppercase word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word {
    chars: [u8; WORD_LENGTH],
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    InvalidLength(usize),
    InvalidCharacters,
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "expected {WORD_LENGTH} letters, got {len}")
            }
            Self::InvalidCharacters => write!(f, "word must contain only letters A-Z"),
        }
    }
}

impl std::error::Error for WordError {}

impl Word {
    /// Create a new Word from a string
    ///
    /// Surrounding whitespace is trimmed and letters are normalized to uppercase.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is not exactly 5
    /// - Contains anything other than ASCII letters
    ///
    /// # Examples
    /// ```
    /// use wordle_bot::core::Word;
    ///
    /// let word = Word::new("crane").unwrap();
    /// assert_eq!(word.as_str(), "CRANE");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: &str) -> Result<Self, WordError> {
        let text = text.trim();

        if !text.is_ascii() {
            return Err(WordError::InvalidCharacters);
        }

        let Ok(chars) = <[u8; WORD_LENGTH]>::try_from(text.as_bytes()) else {
            return Err(WordError::InvalidLength(text.chars().count()));
        };

        if !chars.iter().all(u8::is_ascii_alphabetic) {
            return Err(WordError::InvalidCharacters);
        }

        Ok(Self {
            chars: chars.map(|b| b.to_ascii_uppercase()),
        })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII letters
        std::str::from_utf8(&self.chars).unwrap_or_default()
    }

    /// Get the word as a byte array
    #[inline]
    #[must_use]
    pub const fn chars(&self) -> &[u8; WORD_LENGTH] {
        &self.chars
    }

    /// Get the character at a specific position (0-4)
    ///
    /// # Panics
    /// Panics if position >= 5
    #[inline]
    #[must_use]
    pub const fn char_at(&self, position: usize) -> u8 {
        self.chars[position]
    }

    /// Check if the word contains a specific (uppercase) letter
    #[inline]
    #[must_use]
    pub fn has_letter(&self, letter: u8) -> bool {
        self.chars.contains(&letter)
    }

    /// Bit set of the distinct letters in this word (bit 0 = 'A')
    #[inline]
    #[must_use]
    pub fn letter_mask(&self) -> u32 {
        self.chars
            .iter()
            .fold(0, |mask, &ch| mask | 1 << letter_index(ch))
    }

    /// Count of each letter in the word, indexed by `letter - b'A'`
    ///
    /// Used for pattern calculation with duplicate letters.
    #[inline]
    #[must_use]
    pub fn letter_counts(&self) -> [u8; ALPHABET_SIZE] {
        let mut counts = [0u8; ALPHABET_SIZE];
        for &ch in &self.chars {
            counts[letter_index(ch)] += 1;
        }
        counts
    }
}

/// Alphabet index of an uppercase ASCII letter
#[inline]
pub(crate) const fn letter_index(letter: u8) -> usize {
    (letter - b'A') as usize
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
