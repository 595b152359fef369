//! Effectful shell around the pure puzzle core.
//!
//! The core never performs I/O. This module supplies the environment it
//! runs in (chain source, snapshot persistence, configuration) and expresses
//! each I/O step as a Stillwater effect run against that environment:
//!
//! - [`open_game`] fetches a day's chain and restores that day's snapshot
//! - [`persist_snapshot`] overwrites the day's snapshot
//!
//! Both collaborators are synchronous; their calls run on Tokio's blocking
//! pool so a slow disk never stalls the runtime thread.
//!
//! [`Session`] ties these together with subscriber notification and the
//! reveal animation.

mod session;
mod source;

pub use session::{Rollover, Session, SessionLoad, Subscriber, SubscriptionId};
pub use source::{ChainSource, JsonFileChainSource, SourceError, StaticChainSource};

use crate::config::{ConfigError, GameConfig};
use crate::core::Game;
use crate::persistence::{PersistenceError, SessionPersistence, Snapshot, SnapshotStore};
use chrono::NaiveDate;
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::prelude::*;

/// Collaborators a session runs against.
#[derive(Clone)]
pub struct GameEnv {
    pub source: Arc<dyn ChainSource>,
    pub persistence: SessionPersistence,
    pub config: GameConfig,
}

impl GameEnv {
    /// Fails if `config` would give an unplayable session or unusable keys.
    pub fn new(
        source: Arc<dyn ChainSource>,
        store: Arc<dyn SnapshotStore>,
        config: GameConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            persistence: SessionPersistence::from_config(store, &config),
            source,
            config,
        })
    }
}

/// Fetch the chain for `date` and rebuild the game from that day's
/// snapshot. Yields `None` when no chain is published for the date.
///
/// A missing or unusable snapshot starts a fresh game.
pub fn open_game(
    date: NaiveDate,
) -> impl Effect<Output = Option<Game>, Error = SourceError, Env = GameEnv> {
    from_async(move |env: &GameEnv| {
        let env = env.clone();
        async move {
            match tokio::task::spawn_blocking(move || restore_game(&env, date)).await {
                Ok(result) => result,
                Err(e) => Err(SourceError::Interrupted(e.to_string())),
            }
        }
    })
}

fn restore_game(env: &GameEnv, date: NaiveDate) -> Result<Option<Game>, SourceError> {
    let Some(chain) = env.source.chain_for(date)? else {
        return Ok(None);
    };
    let max_guesses = env.config.max_guesses;
    let snapshot = env
        .persistence
        .load_for(date, &chain, max_guesses)
        .unwrap_or_default();

    Ok(Some(Game::from_progress(
        chain,
        snapshot.user_guesses,
        snapshot.hints,
        max_guesses,
    )))
}

/// Overwrite the stored snapshot for `date`.
pub fn persist_snapshot(
    date: NaiveDate,
    snapshot: Snapshot,
) -> impl Effect<Output = (), Error = PersistenceError, Env = GameEnv> {
    from_async(move |env: &GameEnv| {
        let persistence = env.persistence.clone();
        async move {
            match tokio::task::spawn_blocking(move || persistence.save(date, &snapshot)).await {
                Ok(result) => result,
                Err(e) => Err(PersistenceError::Unavailable(e.to_string())),
            }
        }
    })
}
