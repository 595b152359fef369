//! One player's session for one calendar day.

use super::{open_game, persist_snapshot, GameEnv};
use crate::core::{Command, Derived, Game, Outcome, State};
use crate::persistence::Snapshot;
use crate::reveal::{RevealAnimator, RevealEvent};
use crate::share;
use crate::time;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::time::Duration;
use stillwater::prelude::*;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Callback receiving the derived view after every accepted change.
pub type Subscriber = Box<dyn Fn(&Derived) + Send + Sync>;

/// Handle returned by [`Session::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

/// Result of opening a session.
pub enum SessionLoad {
    Ready(Session),
    /// No chain is published for the date yet.
    Unavailable { date: NaiveDate },
}

/// Result of moving a session to another date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rollover {
    /// Already on that date; nothing changed.
    SameDay,
    /// New chain loaded and the session now belongs to the new date.
    Started,
    /// Nothing published for the new date; the session is unchanged.
    Unavailable,
}

/// Owns the authoritative game and everything that reacts to it.
///
/// Intents are applied synchronously; subscribers are then notified, the
/// reveal animation is started or abandoned, and the snapshot is saved.
/// Saving is best effort: failures are logged and never reach the player.
pub struct Session {
    date: NaiveDate,
    game: Game,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    animator: RevealAnimator,
}

impl Session {
    pub fn new(date: NaiveDate, game: Game, reveal_delay: Duration) -> Self {
        Self {
            date,
            game,
            subscribers: Vec::new(),
            animator: RevealAnimator::new(reveal_delay),
        }
    }

    /// Load the chain and any saved progress for `date`.
    ///
    /// A chain source that fails is treated like one with nothing published.
    pub async fn open(env: &GameEnv, date: NaiveDate) -> SessionLoad {
        match fetch_game(env, date).await {
            Some(game) => {
                tracing::info!(
                    date = %time::date_key(date),
                    status = game.status().name(),
                    guesses = game.user_guesses().len(),
                    "session opened"
                );
                SessionLoad::Ready(Self::new(date, game, env.config.reveal_delay))
            }
            None => {
                tracing::info!(date = %time::date_key(date), "no chain published");
                SessionLoad::Unavailable { date }
            }
        }
    }

    /// [`open`](Self::open) for the local calendar date.
    pub async fn open_today(env: &GameEnv) -> SessionLoad {
        Self::open(env, time::today()).await
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn view(&self) -> Derived {
        self.game.derived()
    }

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&Derived) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn reveal_events(&mut self) -> mpsc::UnboundedReceiver<RevealEvent> {
        self.animator.events()
    }

    /// Positions the reveal animation has already shown.
    pub fn revealed(&self) -> BTreeSet<usize> {
        self.animator.revealed()
    }

    /// Apply an intent and run its side effects.
    pub async fn dispatch(&mut self, env: &GameEnv, command: Command) -> Outcome {
        let resets = matches!(command, Command::ResetGame);
        let outcome = self.game.apply(command);

        if let Outcome::Rejected(rejection) = &outcome {
            tracing::debug!(%rejection, "intent ignored");
        }
        let Outcome::Applied(applied) = &outcome else {
            return outcome;
        };

        tracing::debug!(
            command = applied.command,
            from = applied.from.name(),
            to = applied.to.name(),
            "intent applied"
        );
        if applied.to.is_final() && applied.from != applied.to {
            tracing::info!(
                date = %time::date_key(self.date),
                status = applied.to.name(),
                guesses = self.game.user_guesses().len(),
                "game finished"
            );
        }

        if resets {
            self.animator.cancel();
        }
        if !applied.newly_solved.is_empty() {
            self.animator.start(applied.newly_solved.iter().copied());
        }

        self.notify();
        self.persist(env).await;
        outcome
    }

    /// Move the session to `date` if a chain is published for it.
    pub async fn rollover(&mut self, env: &GameEnv, date: NaiveDate) -> Rollover {
        if date == self.date {
            return Rollover::SameDay;
        }
        let Some(game) = fetch_game(env, date).await else {
            return Rollover::Unavailable;
        };

        tracing::info!(
            from = %time::date_key(self.date),
            to = %time::date_key(date),
            "day rolled over"
        );
        self.animator.cancel();
        self.date = date;
        self.game = game;
        self.notify();
        Rollover::Started
    }

    /// Share text, once the game is over.
    pub fn share_text(&self) -> Option<String> {
        self.game.status().is_final().then(|| {
            share::share_text(
                self.game.chain(),
                self.game.user_guesses(),
                self.date,
                self.game.max_guesses(),
            )
        })
    }

    fn notify(&self) {
        let view = self.game.derived();
        for (_, subscriber) in &self.subscribers {
            subscriber(&view);
        }
    }

    async fn persist(&self, env: &GameEnv) {
        let snapshot = Snapshot::of(&self.game);
        if let Err(e) = persist_snapshot(self.date, snapshot).run(env).await {
            tracing::warn!(date = %time::date_key(self.date), error = %e, "failed to save snapshot");
        }
    }
}

/// [`open_game`] with source failures logged and reported as absent.
async fn fetch_game(env: &GameEnv, date: NaiveDate) -> Option<Game> {
    match open_game(date).run(env).await {
        Ok(game) => game,
        Err(e) => {
            tracing::warn!(date = %time::date_key(date), error = %e, "chain source failed");
            None
        }
    }
}
