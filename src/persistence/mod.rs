//! Session persistence keyed by calendar date.
//!
//! Only the minimal durable snapshot (confirmed guesses and spent hints) is
//! stored; everything else is derived again on load. Loading is forgiving:
//! a missing, unreadable, corrupt or inconsistent record is reported as "no
//! snapshot" so the player simply starts a fresh session.

use crate::config::GameConfig;
use crate::core::{Chain, Game, Guess};
use crate::time;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod error;
pub mod store;
pub mod validation;

pub use error::{PersistenceError, SnapshotViolation};
pub use store::{FileStore, MemoryStore, SnapshotStore};

/// Minimal durable record of a session.
///
/// Serializes to JSON as `{"userGuesses": [[...]], "hints": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub user_guesses: Vec<Guess>,
    #[serde(default)]
    pub hints: Vec<usize>,
}

/// Shapes accepted when reading JSON written by earlier versions.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSnapshot {
    /// Bare list of guesses, saved before hints existed.
    Guesses(Vec<Guess>),
    Record {
        #[serde(default, rename = "userGuesses")]
        user_guesses: Vec<Guess>,
        #[serde(default)]
        hints: Option<Vec<usize>>,
        /// Per-index hint counts instead of the hint sequence.
        #[serde(default, rename = "hintsByIndex")]
        hints_by_index: Option<Vec<usize>>,
    },
}

impl From<StoredSnapshot> for Snapshot {
    fn from(stored: StoredSnapshot) -> Self {
        match stored {
            StoredSnapshot::Guesses(user_guesses) => Snapshot {
                user_guesses,
                hints: Vec::new(),
            },
            StoredSnapshot::Record {
                user_guesses,
                hints,
                hints_by_index,
            } => {
                let hints = hints.unwrap_or_else(|| {
                    hints_by_index
                        .unwrap_or_default()
                        .iter()
                        .enumerate()
                        .flat_map(|(index, &count)| std::iter::repeat(index).take(count))
                        .collect()
                });
                Snapshot {
                    user_guesses,
                    hints,
                }
            }
        }
    }
}

impl Snapshot {
    /// Durable part of a game.
    pub fn of(game: &Game) -> Self {
        Self {
            user_guesses: game.user_guesses().to_vec(),
            hints: game.hints().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, PersistenceError> {
        serde_json::to_vec(self).map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
    }

    /// Parse JSON, accepting the legacy shapes as well as the current one.
    pub fn from_json(bytes: &[u8]) -> Result<Self, PersistenceError> {
        serde_json::from_slice::<StoredSnapshot>(bytes)
            .map(Snapshot::from)
            .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, PersistenceError> {
        bincode::serialize(self).map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, PersistenceError> {
        bincode::deserialize(bytes)
            .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))
    }
}

/// Encoding used for stored snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotFormat {
    /// Human-readable, compatible with the `{userGuesses, hints}` record.
    #[default]
    Json,
    /// Compact bincode encoding.
    Binary,
}

impl SnapshotFormat {
    pub fn encode(self, snapshot: &Snapshot) -> Result<Vec<u8>, PersistenceError> {
        match self {
            Self::Json => snapshot.to_json(),
            Self::Binary => snapshot.to_binary(),
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<Snapshot, PersistenceError> {
        match self {
            Self::Json => Snapshot::from_json(bytes),
            Self::Binary => Snapshot::from_binary(bytes),
        }
    }
}

/// Saves and restores the snapshot of a given day.
#[derive(Clone)]
pub struct SessionPersistence {
    store: Arc<dyn SnapshotStore>,
    format: SnapshotFormat,
    key_prefix: String,
}

impl SessionPersistence {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            format: SnapshotFormat::Json,
            key_prefix: crate::config::DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    pub fn from_config(store: Arc<dyn SnapshotStore>, config: &GameConfig) -> Self {
        Self {
            store,
            format: config.format,
            key_prefix: config.key_prefix.clone(),
        }
    }

    pub fn with_format(mut self, format: SnapshotFormat) -> Self {
        self.format = format;
        self
    }

    pub fn key_for(&self, date: NaiveDate) -> String {
        time::storage_key(&self.key_prefix, date)
    }

    /// Overwrite the day's record.
    pub fn save(&self, date: NaiveDate, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let bytes = self.format.encode(snapshot)?;
        self.store.write(&self.key_for(date), &bytes)
    }

    /// Read the day's record, surfacing every failure.
    pub fn try_load(&self, date: NaiveDate) -> Result<Option<Snapshot>, PersistenceError> {
        self.store
            .read(&self.key_for(date))?
            .map(|bytes| self.format.decode(&bytes))
            .transpose()
    }

    /// Read the day's record; failures count as "no snapshot".
    pub fn load(&self, date: NaiveDate) -> Option<Snapshot> {
        match self.try_load(date) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(key = %self.key_for(date), error = %e, "discarding unreadable snapshot");
                None
            }
        }
    }

    /// Read the day's record and check it fits `chain`; a record that does
    /// not fit counts as "no snapshot".
    pub fn load_for(&self, date: NaiveDate, chain: &Chain, max_guesses: usize) -> Option<Snapshot> {
        let snapshot = self.load(date)?;
        match validation::ensure_fits(&snapshot, chain, max_guesses) {
            Ok(()) => Some(snapshot),
            Err(e) => {
                tracing::warn!(key = %self.key_for(date), error = %e, "discarding snapshot that does not fit the chain");
                None
            }
        }
    }

    pub fn clear(&self, date: NaiveDate) -> Result<(), PersistenceError> {
        self.store.remove(&self.key_for(date))
    }
}

impl std::fmt::Debug for SessionPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionPersistence")
            .field("format", &self.format)
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}
