//! Build errors for the game builder.

use crate::core::ChainError;
use thiserror::Error;

/// Errors that can occur when building a game.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Chain not specified. Call .chain(chain) or .words(words) before .build()")]
    MissingChain,

    #[error("Chain words are invalid: {0}")]
    InvalidChain(#[from] ChainError),

    #[error("Guess budget must be at least one")]
    ZeroGuessBudget,
}
