//! Builder API for constructing a game from a chain and saved progress.

pub mod error;

pub use error::BuildError;

use crate::core::{Chain, Game, MAX_GUESSES};
use crate::persistence::Snapshot;

/// Fluent builder for [`Game`].
///
/// # Example
///
/// ```
/// use chainle::builder::GameBuilder;
/// use chainle::core::Status;
/// use chainle::persistence::Snapshot;
///
/// let snapshot = Snapshot {
///     user_guesses: vec![vec!["board".into(), "b".into(), "g".into(), "coats".into()]],
///     hints: vec![],
/// };
///
/// let game = GameBuilder::new()
///     .words(["board", "boat", "goat", "coats"])
///     .snapshot(snapshot)
///     .max_guesses(5)
///     .build()
///     .unwrap();
///
/// assert_eq!(game.status(), Status::Selecting);
/// ```
pub struct GameBuilder {
    chain: Option<Chain>,
    words: Option<Vec<String>>,
    snapshot: Option<Snapshot>,
    max_guesses: usize,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            chain: None,
            words: None,
            snapshot: None,
            max_guesses: MAX_GUESSES,
        }
    }

    /// Use an already validated chain.
    pub fn chain(mut self, chain: Chain) -> Self {
        self.chain = Some(chain);
        self.words = None;
        self
    }

    /// Use raw words; they are validated by `build`.
    pub fn words<I, W>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        self.words = Some(words.into_iter().map(|w| w.as_ref().to_string()).collect());
        self.chain = None;
        self
    }

    /// Restore progress saved earlier the same day.
    pub fn snapshot(mut self, snapshot: Snapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Optional variant of [`snapshot`](Self::snapshot) for load results.
    pub fn maybe_snapshot(mut self, snapshot: Option<Snapshot>) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn max_guesses(mut self, max_guesses: usize) -> Self {
        self.max_guesses = max_guesses;
        self
    }

    pub fn build(self) -> Result<Game, BuildError> {
        if self.max_guesses == 0 {
            return Err(BuildError::ZeroGuessBudget);
        }

        let chain = match (self.chain, self.words) {
            (Some(chain), _) => chain,
            (None, Some(words)) => Chain::new(words)?,
            (None, None) => return Err(BuildError::MissingChain),
        };

        let Snapshot {
            user_guesses,
            hints,
        } = self.snapshot.unwrap_or_default();

        Ok(Game::from_progress(chain, user_guesses, hints, self.max_guesses))
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChainViolation, Status};

    #[test]
    fn builder_requires_a_chain() {
        let result = GameBuilder::new().build();
        assert!(matches!(result, Err(BuildError::MissingChain)));
    }

    #[test]
    fn builder_rejects_zero_budget() {
        let result = GameBuilder::new()
            .words(["a", "b", "c"])
            .max_guesses(0)
            .build();
        assert!(matches!(result, Err(BuildError::ZeroGuessBudget)));
    }

    #[test]
    fn builder_surfaces_chain_violations() {
        match GameBuilder::new().words(["a", "b"]).build() {
            Err(BuildError::InvalidChain(err)) => {
                assert_eq!(err.violations, vec![ChainViolation::TooShort { len: 2 }]);
            }
            other => panic!("expected invalid chain, got {other:?}"),
        }
    }

    #[test]
    fn builder_without_snapshot_starts_fresh() {
        let game = GameBuilder::new()
            .words(["board", "boat", "goat", "coats"])
            .build()
            .unwrap();

        assert_eq!(game.status(), Status::Guessing);
        assert!(game.user_guesses().is_empty());
        assert_eq!(game.max_guesses(), MAX_GUESSES);
    }

    #[test]
    fn builder_restores_terminal_snapshot() {
        let snapshot = Snapshot {
            user_guesses: vec![vec![
                "board".into(),
                "boat".into(),
                "goat".into(),
                "coats".into(),
            ]],
            hints: vec![],
        };

        let game = GameBuilder::new()
            .chain(Chain::new(["board", "boat", "goat", "coats"]).unwrap())
            .snapshot(snapshot)
            .build()
            .unwrap();

        assert_eq!(game.status(), Status::Winner);
    }

    #[test]
    fn custom_budget_is_honoured() {
        let mut game = GameBuilder::new()
            .words(["board", "boat", "goat", "coats"])
            .max_guesses(1)
            .build()
            .unwrap();

        game.apply(crate::core::Command::ConfirmGuess);
        assert_eq!(game.status(), Status::Loser);
    }
}
