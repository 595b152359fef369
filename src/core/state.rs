//! Status of a puzzle session.
//!
//! The `State` trait describes any closed set of machine states; `Status`
//! is the one used by the word-chain puzzle.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. States are small immutable values describing where
/// a session currently is.
///
/// # Required Traits
///
/// - `Clone` + `PartialEq`: states are compared by guards
/// - `Debug`: states show up in logs and rejections
/// - `Serialize` + `Deserialize`: states can be stored alongside a session
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name of the state for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is a losing/error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Where the player is in the guess/hint cycle.
///
/// `Winner` and `Loser` are never chosen by an intent; they are derived from
/// the solved flags and the remaining guess budget after every mutation.
///
/// # Example
///
/// ```rust
/// use chainle::core::{State, Status};
///
/// assert!(!Status::Guessing.is_final());
/// assert!(Status::Winner.is_final());
/// assert!(Status::Loser.is_error());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Player is typing letters for the unsolved words.
    Guessing,
    /// Player must pick which unsolved word gets the next letter.
    Selecting,
    /// Every hidden word is solved.
    Winner,
    /// Guess budget exhausted without solving the chain.
    Loser,
}

impl State for Status {
    fn name(&self) -> &str {
        match self {
            Self::Guessing => "guessing",
            Self::Selecting => "selecting",
            Self::Winner => "winner",
            Self::Loser => "loser",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Winner | Self::Loser)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Loser)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
