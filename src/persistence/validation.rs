//! Checks a decoded snapshot against the chain it is restored onto.
//!
//! Uses `Validation` so every mismatch is reported at once.

use super::error::{PersistenceError, SnapshotViolation};
use super::Snapshot;
use crate::core::Chain;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<SnapshotViolation>>;

fn check(ok: bool, violation: impl FnOnce() -> SnapshotViolation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Accumulate every violation of `snapshot` against `chain`.
pub fn validate(snapshot: &Snapshot, chain: &Chain, max_guesses: usize) -> Check {
    let guesses = snapshot.user_guesses.len();
    let hints = snapshot.hints.len();
    let mut checks: Vec<Check> = Vec::new();

    checks.push(check(guesses <= max_guesses, || {
        SnapshotViolation::TooManyGuesses {
            max: max_guesses,
            found: guesses,
        }
    }));

    for (i, guess) in snapshot.user_guesses.iter().enumerate() {
        checks.push(check(guess.len() == chain.len(), || {
            SnapshotViolation::GuessLength {
                guess: i,
                expected: chain.len(),
                found: guess.len(),
            }
        }));
    }

    // A hint is only ever picked after a confirmed guess.
    checks.push(check(hints <= guesses, || SnapshotViolation::TooManyHints {
        guesses,
        hints,
    }));

    for (position, &index) in snapshot.hints.iter().enumerate() {
        let hidden = index < chain.len() && !chain.is_endpoint(index);
        checks.push(check(hidden, || SnapshotViolation::HintNotHidden {
            position,
            index,
        }));
    }

    Validation::all_vec(checks).map(|_| ())
}

/// [`validate`] collapsed into a `Result`.
pub fn ensure_fits(
    snapshot: &Snapshot,
    chain: &Chain,
    max_guesses: usize,
) -> Result<(), PersistenceError> {
    match validate(snapshot, chain, max_guesses) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(PersistenceError::ValidationFailed(
            errors.iter().cloned().collect(),
        )),
    }
}
