//! Persistence error types.

use thiserror::Error;

/// A single way a restored snapshot disagrees with the day's chain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotViolation {
    #[error("guess {guess} has {found} words, chain has {expected}")]
    GuessLength {
        guess: usize,
        expected: usize,
        found: usize,
    },

    #[error("{found} guesses recorded, budget is {max}")]
    TooManyGuesses { max: usize, found: usize },

    #[error("hint at position {position} targets word {index}, which is not a hidden word")]
    HintNotHidden { position: usize, index: usize },

    #[error("{hints} hints recorded after only {guesses} guesses")]
    TooManyHints { guesses: usize, hints: usize },
}

/// Errors that can occur while saving or loading a session snapshot
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying storage could not be read or written
    #[error("Storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Storage exists but cannot be used right now
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot decoded but does not fit the chain it is restored against
    #[error("Snapshot validation failed with {} violation(s)", .0.len())]
    ValidationFailed(Vec<SnapshotViolation>),
}
