//! Error taxonomy for the solver library
//!
//! Every fallible library operation returns [`SolverError`]. The binary wraps
//! these in `anyhow` at the edges.

use thiserror::Error;

/// Errors produced while loading vocabularies, handling the index cache, or
/// running a game.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A vocabulary token violates the 5-letter A-Z contract
    #[error("malformed vocabulary word '{token}': {reason}")]
    MalformedVocabulary { token: String, reason: String },

    /// The vocabulary source contained no words
    #[error("vocabulary is empty")]
    EmptyVocabulary,

    /// Word ids are 16-bit, so a vocabulary is capped at `u16::MAX` words
    #[error("vocabulary has {0} words, more than the supported {max}", max = u16::MAX)]
    VocabularyTooLarge(usize),

    /// A word that was expected to be part of the vocabulary is not
    #[error("word '{0}' is not in the vocabulary")]
    UnknownWord(String),

    /// The persisted index was built for a different vocabulary or format
    #[error("pattern index cache mismatch: {0}")]
    CacheMismatch(String),

    /// The persisted index could not be decoded or is internally inconsistent
    #[error("pattern index cache is corrupt: {0}")]
    CacheCorrupt(String),

    /// The guess selector was asked to choose from an empty candidate set
    #[error("invalid solver state: {0}")]
    InvalidState(&'static str),

    /// Filtering left nothing to guess before the target was found
    #[error("no candidates remaining after round {round}")]
    NoCandidatesRemaining { round: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = SolverError::MalformedVocabulary {
            token: "CAT".to_string(),
            reason: "expected 5 letters, got 3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed vocabulary word 'CAT': expected 5 letters, got 3"
        );

        let err = SolverError::NoCandidatesRemaining { round: 3 };
        assert_eq!(err.to_string(), "no candidates remaining after round 3");
    }

    #[test]
    fn too_large_reports_limit() {
        let err = SolverError::VocabularyTooLarge(70_000);
        assert!(err.to_string().contains("65535"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SolverError = io.into();
        assert!(matches!(err, SolverError::Io(_)));
    }
}
