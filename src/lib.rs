//! Chainle: a daily word-chain puzzle engine
//!
//! A chain is a fixed sequence of words where each neighbour is related to
//! the next. The first and last words are given; every word in between
//! starts with one letter shown. The player alternates between confirming a
//! guess of the whole chain and spending a hint to reveal one more letter of
//! a chosen word, within a fixed budget of guesses.
//!
//! The crate follows a "pure core, imperative shell" layout:
//!
//! - [`core`]: the state machine. Authoritative state, intents, and every
//!   derived value, with no I/O.
//! - [`persistence`]: the durable snapshot (guesses and hints) stored per
//!   calendar day.
//! - [`effects`]: the shell. Chain lookup, snapshot saving, subscriber
//!   notification and day rollover, expressed as Stillwater effects.
//! - [`reveal`], [`share`], [`time`]: presentation helpers around a session.
//!
//! # Example
//!
//! ```rust
//! use chainle::core::{Chain, Command, Game, Status};
//!
//! let chain = Chain::new(["board", "boat", "goat", "coats"]).unwrap();
//! let mut game = Game::new(chain);
//!
//! // One letter of each hidden word is visible to start with.
//! assert_eq!(game.derived().current_chain, ["board", "b", "g", "coats"]);
//!
//! game.apply(Command::SetLetters { index: 1, text: "bolt".into() });
//! game.apply(Command::ConfirmGuess);
//! assert_eq!(game.status(), Status::Selecting);
//!
//! game.apply(Command::SelectHint { index: 2 });
//! assert_eq!(game.derived().current_chain[2], "go");
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod effects;
pub mod persistence;
pub mod reveal;
pub mod share;
pub mod time;

// Re-export commonly used types
pub use builder::GameBuilder;
pub use config::GameConfig;
pub use core::{Chain, Command, Derived, Game, Outcome, Status, MAX_GUESSES};
pub use effects::{GameEnv, Session, SessionLoad};
pub use persistence::{SessionPersistence, Snapshot};
