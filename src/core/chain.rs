//! The day's correct chain of words.

use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Shortest chain that still has a hidden word between its endpoints.
pub const MIN_CHAIN_LEN: usize = 3;

/// A single reason a word list cannot be used as a chain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainViolation {
    #[error("chain has {len} words, at least {MIN_CHAIN_LEN} are required")]
    TooShort { len: usize },

    #[error("word {index} is empty")]
    EmptyWord { index: usize },

    #[error("word {index} ({word:?}) contains non-alphabetic characters")]
    NonAlphabetic { index: usize, word: String },
}

/// Every violation found in a rejected word list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("chain rejected with {} violation(s)", .violations.len())]
pub struct ChainError {
    pub violations: Vec<ChainViolation>,
}

/// Ordered, immutable sequence of the correct words for one day.
///
/// Index 0 and the last index are endpoints and always shown in full.
/// Words are stored lowercase.
///
/// # Example
///
/// ```rust
/// use chainle::core::Chain;
///
/// let chain = Chain::new(["Board", "boat", "goat", "coats"]).unwrap();
/// assert_eq!(chain.word(0), Some("board"));
/// assert!(chain.is_endpoint(3));
/// assert_eq!(chain.hidden_indices().collect::<Vec<_>>(), vec![1, 2]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Chain {
    words: Vec<String>,
}

impl Chain {
    /// Validate and normalize a word list.
    ///
    /// All violations are collected before failing, so a caller sees every
    /// problem with a published chain at once.
    pub fn new<I, W>(words: I) -> Result<Self, ChainError>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .collect();

        let mut checks: Vec<Validation<(), NonEmptyVec<ChainViolation>>> = Vec::new();

        checks.push(if words.len() < MIN_CHAIN_LEN {
            Validation::fail(ChainViolation::TooShort { len: words.len() })
        } else {
            Validation::success(())
        });

        for (index, word) in words.iter().enumerate() {
            let check = if word.is_empty() {
                Validation::fail(ChainViolation::EmptyWord { index })
            } else if !word.chars().all(char::is_alphabetic) {
                Validation::fail(ChainViolation::NonAlphabetic {
                    index,
                    word: word.clone(),
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        match Validation::all_vec(checks).map(|_| ()) {
            Validation::Success(()) => Ok(Self { words }),
            Validation::Failure(errors) => Err(ChainError {
                violations: errors.iter().cloned().collect(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false for a constructed chain; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Number of letters in the word at `index` (0 when out of range).
    pub fn word_len(&self, index: usize) -> usize {
        self.word(index).map_or(0, |w| w.chars().count())
    }

    pub fn is_endpoint(&self, index: usize) -> bool {
        index == 0 || index + 1 == self.words.len()
    }

    /// Indices of the words the player has to find.
    pub fn hidden_indices(&self) -> impl Iterator<Item = usize> {
        1..self.words.len().saturating_sub(1)
    }
}

impl TryFrom<Vec<String>> for Chain {
    type Error = ChainError;

    fn try_from(words: Vec<String>) -> Result<Self, Self::Error> {
        Chain::new(words)
    }
}

impl From<Chain> for Vec<String> {
    fn from(chain: Chain) -> Self {
        chain.words
    }
}
