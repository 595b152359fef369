//! Pure core of the puzzle.
//!
//! This module contains everything that decides what a session looks like:
//! - The correct chain and its validation
//! - The `Status` enum and intent guards
//! - Derived values (revealed prefixes, solved flags, remaining guesses)
//! - The `Game` state machine and its `Command` intents
//!
//! Nothing here performs I/O.

mod chain;
pub mod derive;
mod game;
mod guard;
mod state;

pub use chain::{Chain, ChainError, ChainViolation, MIN_CHAIN_LEN};
pub use derive::Derived;
pub use game::{Applied, Command, Game, Guess, Outcome, Rejection, MAX_GUESSES};
pub use guard::Guard;
pub use state::{State, Status};
