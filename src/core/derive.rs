//! Derived values of a puzzle session.
//!
//! Nothing here is stored. Every value is a pure function of the correct
//! chain and the authoritative fields of a [`Game`](super::Game), and is
//! recomputed on every read.

use super::chain::Chain;
use super::game::Guess;
use super::state::Status;
use serde::Serialize;

/// First `n` letters of `word`.
pub fn prefix(word: &str, n: usize) -> String {
    word.chars().take(n).collect()
}

/// Endpoints are always solved; a hidden word is solved once any confirmed
/// guess had it exactly right.
pub fn solved_by_index(chain: &Chain, guesses: &[Guess]) -> Vec<bool> {
    (0..chain.len())
        .map(|i| {
            chain.is_endpoint(i)
                || guesses
                    .iter()
                    .any(|g| g.get(i).map(String::as_str) == chain.word(i))
        })
        .collect()
}

/// How many hints were spent on each position.
pub fn hints_by_index(len: usize, hints: &[usize]) -> Vec<usize> {
    let mut counts = vec![0; len];
    for &index in hints {
        if let Some(count) = counts.get_mut(index) {
            *count += 1;
        }
    }
    counts
}

/// Revealed portion of every word: the whole word once solved, otherwise one
/// baseline letter plus one per hint, clamped to the word length.
pub fn current_chain(chain: &Chain, solved: &[bool], hint_counts: &[usize]) -> Vec<String> {
    chain
        .words()
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if solved[i] {
                word.clone()
            } else {
                prefix(word, hint_counts[i] + 1)
            }
        })
        .collect()
}

/// Revealed prefix followed by whatever the player has typed beyond it.
pub fn current_guess(current_chain: &[String], suffixes: &[String]) -> Vec<String> {
    current_chain
        .iter()
        .zip(suffixes)
        .map(|(revealed, suffix)| format!("{revealed}{suffix}"))
        .collect()
}

pub fn guesses_remaining(max_guesses: usize, guesses: &[Guess]) -> usize {
    max_guesses.saturating_sub(guesses.len())
}

/// Override an intent-driven status with the terminal one when it applies.
///
/// Winning is checked first, so solving on the last guess is a win.
pub fn resolve_status(intended: Status, solved: &[bool], remaining: usize) -> Status {
    if solved.iter().all(|&s| s) {
        Status::Winner
    } else if remaining == 0 {
        Status::Loser
    } else {
        intended
    }
}

/// Status bucket of a restored session before terminal resolution.
///
/// More confirmed guesses than hints means the player confirmed and has not
/// picked a hint yet.
pub fn initial_status(guess_count: usize, hint_count: usize) -> Status {
    if guess_count > hint_count {
        Status::Selecting
    } else {
        Status::Guessing
    }
}

/// Everything a view needs to render a session, computed in one pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Derived {
    pub correct_chain: Chain,
    pub current_chain: Vec<String>,
    pub current_guess: Vec<String>,
    pub solved_by_index: Vec<bool>,
    pub hints_by_index: Vec<usize>,
    pub guesses_remaining: usize,
    pub guess_count: usize,
    pub status: Status,
}

impl Derived {
    pub fn compute(
        chain: &Chain,
        guesses: &[Guess],
        hints: &[usize],
        suffixes: &[String],
        status: Status,
        max_guesses: usize,
    ) -> Self {
        let solved_by_index = solved_by_index(chain, guesses);
        let hints_by_index = hints_by_index(chain.len(), hints);
        let current_chain = current_chain(chain, &solved_by_index, &hints_by_index);
        let current_guess = current_guess(&current_chain, suffixes);

        Self {
            correct_chain: chain.clone(),
            current_chain,
            current_guess,
            solved_by_index,
            hints_by_index,
            guesses_remaining: guesses_remaining(max_guesses, guesses),
            guess_count: guesses.len(),
            status,
        }
    }

    pub fn is_winner(&self) -> bool {
        self.status == Status::Winner
    }

    pub fn is_loser(&self) -> bool {
        self.status == Status::Loser
    }

    pub fn is_solved(&self, index: usize) -> bool {
        self.solved_by_index.get(index).copied().unwrap_or(false)
    }

    /// Word to show at `index`: the answer once the game is lost, otherwise
    /// the in-progress guess.
    pub fn displayed_word(&self, index: usize) -> Option<&str> {
        if self.is_loser() {
            self.correct_chain.word(index)
        } else {
            self.current_guess.get(index).map(String::as_str)
        }
    }

    /// Position can receive the next hint.
    pub fn is_selectable(&self, index: usize) -> bool {
        self.status == Status::Selecting
            && index < self.solved_by_index.len()
            && !self.is_solved(index)
    }

    /// Position accepts typed letters.
    pub fn is_editable(&self, index: usize) -> bool {
        self.status == Status::Guessing
            && index < self.solved_by_index.len()
            && !self.is_solved(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Chain {
        Chain::new(["board", "boat", "goat", "coats"]).unwrap()
    }

    fn guess(words: &[&str]) -> Guess {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn endpoints_are_solved_without_guesses() {
        assert_eq!(solved_by_index(&chain(), &[]), vec![true, false, false, true]);
    }

    #[test]
    fn exact_match_in_any_guess_solves() {
        let guesses = vec![
            guess(&["board", "boat", "gx", "coats"]),
            guess(&["board", "bx", "gx", "coats"]),
        ];
        assert_eq!(
            solved_by_index(&chain(), &guesses),
            vec![true, true, false, true]
        );
    }

    #[test]
    fn short_guess_rows_do_not_panic() {
        let guesses = vec![guess(&["board"])];
        assert_eq!(
            solved_by_index(&chain(), &guesses),
            vec![true, false, false, true]
        );
    }

    #[test]
    fn hints_are_counted_per_index() {
        assert_eq!(hints_by_index(4, &[2, 1, 2, 7]), vec![0, 1, 2, 0]);
    }

    #[test]
    fn current_chain_reveals_one_letter_plus_hints() {
        let solved = vec![true, false, false, true];
        let counts = vec![0, 1, 2, 0];
        assert_eq!(
            current_chain(&chain(), &solved, &counts),
            vec!["board", "bo", "goa", "coats"]
        );
    }

    #[test]
    fn current_chain_is_clamped_to_word_length() {
        let solved = vec![true, false, false, true];
        let counts = vec![0, 9, 0, 0];
        assert_eq!(current_chain(&chain(), &solved, &counts)[1], "boat");
    }

    #[test]
    fn winner_takes_precedence_over_loser() {
        assert_eq!(resolve_status(Status::Selecting, &[true, true], 0), Status::Winner);
        assert_eq!(resolve_status(Status::Selecting, &[true, false], 0), Status::Loser);
        assert_eq!(resolve_status(Status::Selecting, &[true, false], 2), Status::Selecting);
    }

    #[test]
    fn initial_status_depends_on_pending_hint() {
        assert_eq!(initial_status(0, 0), Status::Guessing);
        assert_eq!(initial_status(1, 0), Status::Selecting);
        assert_eq!(initial_status(2, 2), Status::Guessing);
    }

    #[test]
    fn loser_view_displays_answers() {
        let view = Derived::compute(
            &chain(),
            &[],
            &[],
            &vec![String::new(); 4],
            Status::Loser,
            5,
        );
        assert_eq!(view.displayed_word(1), Some("boat"));

        let view = Derived {
            status: Status::Guessing,
            ..view
        };
        assert_eq!(view.displayed_word(1), Some("b"));
    }

    #[test]
    fn selectable_and_editable_follow_status() {
        let view = Derived::compute(
            &chain(),
            &[],
            &[],
            &vec![String::new(); 4],
            Status::Selecting,
            5,
        );
        assert!(view.is_selectable(1));
        assert!(!view.is_selectable(0));
        assert!(!view.is_editable(1));
    }
}
