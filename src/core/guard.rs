//! Guard predicates for intent preconditions.
//!
//! Every intent is only effective in certain statuses. Guards express that
//! precondition as a pure predicate so the transition function can check it
//! before touching any state.

use super::state::State;
use std::marker::PhantomData;

/// Pure predicate deciding whether an intent may run in a given state.
///
/// # Example
///
/// ```rust
/// use chainle::core::{Guard, Status};
///
/// let while_guessing = Guard::when(Status::Guessing);
///
/// assert!(while_guessing.check(&Status::Guessing));
/// assert!(!while_guessing.check(&Status::Selecting));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
    _phantom: PhantomData<S>,
}

impl<S: State + 'static> Guard<S> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Guard that only passes in exactly `required`.
    pub fn when(required: S) -> Self {
        Self::new(move |state| *state == required)
    }

    /// Guard that passes in every state.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Check if the guard allows the intent from this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Status;

    const ALL: [Status; 4] = [
        Status::Guessing,
        Status::Selecting,
        Status::Winner,
        Status::Loser,
    ];

    #[test]
    fn when_matches_a_single_status() {
        let guard = Guard::when(Status::Selecting);

        assert!(guard.check(&Status::Selecting));
        assert!(!guard.check(&Status::Guessing));
        assert!(!guard.check(&Status::Winner));
    }

    #[test]
    fn always_passes_every_status() {
        let guard = Guard::<Status>::always();
        assert!(ALL.iter().all(|s| guard.check(s)));
    }

    #[test]
    fn custom_predicate_excludes_terminal_states() {
        let guard = Guard::new(|s: &Status| !s.is_final());

        assert!(guard.check(&Status::Guessing));
        assert!(guard.check(&Status::Selecting));
        assert!(!guard.check(&Status::Winner));
        assert!(!guard.check(&Status::Loser));
    }
}
