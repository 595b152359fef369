//! The puzzle state machine.
//!
//! `Game` owns the authoritative fields of a session (confirmed guesses,
//! spent hints, in-progress suffixes and status). Every intent goes through
//! [`Game::apply`], which checks the intent's preconditions against the
//! current state and either applies it completely or leaves the state
//! untouched.

use super::chain::Chain;
use super::derive::{self, Derived};
use super::guard::Guard;
use super::state::Status;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default attempt budget for one day's chain.
pub const MAX_GUESSES: usize = 5;

/// One confirmed attempt at the whole chain, one word per position.
pub type Guess = Vec<String>;

/// The four player intents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Replace the typed text for one word.
    SetLetters { index: usize, text: String },
    /// Spend a hint on an unsolved word.
    SelectHint { index: usize },
    /// Submit the composed chain as a guess.
    ConfirmGuess,
    /// Forget all progress.
    ResetGame,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetLetters { .. } => "set_letters",
            Self::SelectHint { .. } => "select_hint",
            Self::ConfirmGuess => "confirm_guess",
            Self::ResetGame => "reset_game",
        }
    }

    /// Status precondition of the intent.
    pub fn guard(&self) -> Guard<Status> {
        match self {
            Self::SetLetters { .. } | Self::ConfirmGuess => Guard::when(Status::Guessing),
            Self::SelectHint { .. } => Guard::when(Status::Selecting),
            Self::ResetGame => Guard::always(),
        }
    }
}

/// Why an intent was ignored. Rejections are normal UI races, not failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("{command} is not allowed while {status}")]
    WrongStatus {
        command: &'static str,
        status: Status,
    },

    #[error("index {index} is outside a chain of {len} words")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("word {index} is already solved")]
    AlreadySolved { index: usize },

    #[error("word {index}: {typed} letters typed but {revealed} already revealed")]
    ShorterThanRevealed {
        index: usize,
        typed: usize,
        revealed: usize,
    },
}

/// Record of an accepted intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub command: &'static str,
    pub from: Status,
    pub to: Status,
    /// Hidden positions that became solved by this intent, ascending.
    pub newly_solved: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied(Applied),
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Authoritative state of one player's session against one chain.
///
/// # Example
///
/// ```rust
/// use chainle::core::{Chain, Command, Game, Status};
///
/// let chain = Chain::new(["board", "boat", "goat", "coats"]).unwrap();
/// let mut game = Game::new(chain);
///
/// game.apply(Command::SetLetters { index: 1, text: "boat".into() });
/// game.apply(Command::SetLetters { index: 2, text: "goat".into() });
/// game.apply(Command::ConfirmGuess);
///
/// assert_eq!(game.status(), Status::Winner);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    chain: Chain,
    user_guesses: Vec<Guess>,
    hints: Vec<usize>,
    current_suffixes: Vec<String>,
    status: Status,
    max_guesses: usize,
}

impl Game {
    /// Fresh session with the default budget.
    pub fn new(chain: Chain) -> Self {
        Self::from_progress(chain, Vec::new(), Vec::new(), MAX_GUESSES)
    }

    /// Rebuild a session from durable progress.
    ///
    /// `max_guesses` must be at least one; `GameBuilder` and `GameEnv::new`
    /// enforce this for callers outside the crate.
    pub(crate) fn from_progress(
        chain: Chain,
        user_guesses: Vec<Guess>,
        hints: Vec<usize>,
        max_guesses: usize,
    ) -> Self {
        let intended = derive::initial_status(user_guesses.len(), hints.len());
        let mut game = Self {
            current_suffixes: vec![String::new(); chain.len()],
            chain,
            user_guesses,
            hints,
            status: intended,
            max_guesses,
        };
        game.status = game.resolve(intended);
        game
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn user_guesses(&self) -> &[Guess] {
        &self.user_guesses
    }

    pub fn hints(&self) -> &[usize] {
        &self.hints
    }

    pub fn current_suffixes(&self) -> &[String] {
        &self.current_suffixes
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    pub fn derived(&self) -> Derived {
        Derived::compute(
            &self.chain,
            &self.user_guesses,
            &self.hints,
            &self.current_suffixes,
            self.status,
            self.max_guesses,
        )
    }

    /// Validate and apply one intent.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let from = self.status;
        if !command.guard().check(&from) {
            return Outcome::Rejected(Rejection::WrongStatus {
                command: command.name(),
                status: from,
            });
        }

        let name = command.name();
        let result = match command {
            Command::SetLetters { index, text } => self.set_letters(index, &text),
            Command::SelectHint { index } => self.select_hint(index),
            Command::ConfirmGuess => self.confirm_guess(),
            Command::ResetGame => {
                self.reset();
                Ok(Vec::new())
            }
        };

        match result {
            Ok(newly_solved) => Outcome::Applied(Applied {
                command: name,
                from,
                to: self.status,
                newly_solved,
            }),
            Err(rejection) => Outcome::Rejected(rejection),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), Rejection> {
        if index < self.chain.len() {
            Ok(())
        } else {
            Err(Rejection::IndexOutOfRange {
                index,
                len: self.chain.len(),
            })
        }
    }

    fn set_letters(&mut self, index: usize, text: &str) -> Result<Vec<usize>, Rejection> {
        self.check_index(index)?;
        let derived = self.derived();
        if derived.solved_by_index[index] {
            return Err(Rejection::AlreadySolved { index });
        }

        let letters: Vec<char> = text
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_alphabetic())
            .collect();
        let revealed = derived.current_chain[index].chars().count();
        if letters.len() < revealed {
            return Err(Rejection::ShorterThanRevealed {
                index,
                typed: letters.len(),
                revealed,
            });
        }

        self.current_suffixes[index] = letters[revealed..].iter().collect();
        Ok(Vec::new())
    }

    fn select_hint(&mut self, index: usize) -> Result<Vec<usize>, Rejection> {
        self.check_index(index)?;
        if derive::solved_by_index(&self.chain, &self.user_guesses)[index] {
            return Err(Rejection::AlreadySolved { index });
        }

        self.hints.push(index);
        self.status = self.resolve(Status::Guessing);
        Ok(Vec::new())
    }

    fn confirm_guess(&mut self) -> Result<Vec<usize>, Rejection> {
        let before = self.derived();
        let guess: Guess = before
            .current_guess
            .iter()
            .map(|word| word.trim().to_lowercase())
            .collect();

        self.user_guesses.push(guess);
        self.current_suffixes = vec![String::new(); self.chain.len()];
        self.status = self.resolve(Status::Selecting);

        let after = derive::solved_by_index(&self.chain, &self.user_guesses);
        Ok(after
            .iter()
            .zip(&before.solved_by_index)
            .enumerate()
            .filter(|(_, (now, was))| **now && !**was)
            .map(|(i, _)| i)
            .collect())
    }

    fn reset(&mut self) {
        self.user_guesses.clear();
        self.hints.clear();
        self.current_suffixes = vec![String::new(); self.chain.len()];
        self.status = self.resolve(Status::Guessing);
    }

    fn resolve(&self, intended: Status) -> Status {
        let solved = derive::solved_by_index(&self.chain, &self.user_guesses);
        let remaining = derive::guesses_remaining(self.max_guesses, &self.user_guesses);
        derive::resolve_status(intended, &solved, remaining)
    }
}
