//! Spoiler-free result text for a finished session.

use crate::core::{Chain, Guess};
use crate::time;
use chrono::NaiveDate;

/// Title line prefix of the share text.
pub const SHARE_TITLE: &str = "Chainle";

/// How one word of one guess is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    /// Endpoint word, given to every player.
    Given,
    Correct,
    Incorrect,
}

impl Mark {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Given => "🟨",
            Self::Correct => "🟩",
            Self::Incorrect => "⬜",
        }
    }
}

pub fn marks(chain: &Chain, guess: &Guess) -> Vec<Mark> {
    guess
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if chain.is_endpoint(i) {
                Mark::Given
            } else if chain.word(i) == Some(word.as_str()) {
                Mark::Correct
            } else {
                Mark::Incorrect
            }
        })
        .collect()
}

/// One row of symbols per guess, oldest first.
pub fn grid(chain: &Chain, guesses: &[Guess]) -> String {
    guesses
        .iter()
        .map(|guess| marks(chain, guess).into_iter().map(Mark::symbol).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full share text: title with date, attempt count, blank line, grid.
///
/// ```rust
/// use chainle::core::Chain;
/// use chainle::share::share_text;
/// use chrono::NaiveDate;
///
/// let chain = Chain::new(["board", "boat", "goat", "coats"]).unwrap();
/// let guesses = vec![
///     vec!["board".to_string(), "bolt".into(), "goat".into(), "coats".into()],
///     vec!["board".to_string(), "boat".into(), "goat".into(), "coats".into()],
/// ];
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
///
/// assert_eq!(
///     share_text(&chain, &guesses, date, 5),
///     "Chainle 6/1/25\n2/5 attempts\n\n🟨⬜🟩🟨\n🟨🟩🟩🟨"
/// );
/// ```
pub fn share_text(chain: &Chain, guesses: &[Guess], date: NaiveDate, max_guesses: usize) -> String {
    format!(
        "{SHARE_TITLE} {}\n{}/{} attempts\n\n{}",
        time::share_date(date),
        guesses.len(),
        max_guesses,
        grid(chain, guesses)
    )
}
