//! Word list loading utilities
//!
//! Builds a [`Vocabulary`] from a file or from the embedded list. Loading is
//! strict: one bad token rejects the whole source.

use crate::core::Vocabulary;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Load a vocabulary from a whitespace-separated word file
///
/// # Errors
///
/// - `Io` if the file cannot be read
/// - `MalformedVocabulary` for the first token that is not 5 letters A-Z
/// - `EmptyVocabulary` if the file holds no words
///
/// # Examples
/// ```no_run
/// use wordle_bot::wordlists::loader::load_from_file;
///
/// let vocab = load_from_file("data/words.txt").unwrap();
/// println!("Loaded {} words", vocab.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vocabulary> {
    let content = fs::read_to_string(path)?;
    Vocabulary::parse(&content)
}

/// Vocabulary built from a string slice such as [`crate::wordlists::WORDS`]
///
/// # Errors
///
/// As [`Vocabulary::parse`].
pub fn vocabulary_from_slice(slice: &[&str]) -> Result<Vocabulary> {
    Vocabulary::parse(&slice.join(" "))
}

/// The vocabulary compiled into the binary
///
/// # Errors
///
/// Never in practice: the build script validates every embedded word.
///
/// # Examples
/// ```
/// use wordle_bot::wordlists::{WORDS_COUNT, loader::embedded_vocabulary};
///
/// let vocab = embedded_vocabulary().unwrap();
/// assert_eq!(vocab.len(), WORDS_COUNT);
/// ```
pub fn embedded_vocabulary() -> Result<Vocabulary> {
    vocabulary_from_slice(super::WORDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;
    use std::path::PathBuf;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wordle_bot_loader_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn vocabulary_from_slice_keeps_order() {
        let vocab = vocabulary_from_slice(&["crane", "slate", "irate"]).unwrap();

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.words()[0].as_str(), "CRANE");
        assert_eq!(vocab.words()[2].as_str(), "IRATE");
    }

    #[test]
    fn vocabulary_from_slice_rejects_invalid() {
        let result = vocabulary_from_slice(&["crane", "toolong", "slate"]);
        assert!(matches!(
            result,
            Err(SolverError::MalformedVocabulary { token, .. }) if token == "toolong"
        ));
    }

    #[test]
    fn vocabulary_from_slice_empty() {
        assert!(matches!(
            vocabulary_from_slice(&[]),
            Err(SolverError::EmptyVocabulary)
        ));
    }

    #[test]
    fn load_from_file_accepts_any_whitespace() {
        let path = scratch_file("mixed.txt", "crane slate\n\n  IRATE\tcrate\n");
        let vocab = load_from_file(&path).unwrap();

        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.words()[3].as_str(), "CRATE");
    }

    #[test]
    fn load_from_file_rejects_bad_token() {
        let path = scratch_file("bad.txt", "crane\nsl4te\n");
        assert!(matches!(
            load_from_file(&path),
            Err(SolverError::MalformedVocabulary { .. })
        ));
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("wordle_bot_definitely_missing.txt");
        assert!(matches!(load_from_file(&path), Err(SolverError::Io(_))));
    }

    #[test]
    fn embedded_vocabulary_loads() {
        let vocab = embedded_vocabulary().unwrap();
        assert_eq!(vocab.len(), crate::wordlists::WORDS_COUNT);
    }
}
