//! Game configuration.

use crate::core::MAX_GUESSES;
use crate::persistence::SnapshotFormat;
use std::time::Duration;
use thiserror::Error;

/// Delay between two consecutive word reveals.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(500);

/// Prefix of snapshot storage keys.
pub const DEFAULT_KEY_PREFIX: &str = "chain";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_guesses must be at least one")]
    ZeroGuessBudget,

    #[error("key prefix {0:?} must be non-empty and contain only letters, digits, '-' or '_'")]
    InvalidKeyPrefix(String),
}

/// Game configuration.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Attempts allowed per day.
    pub max_guesses: usize,
    /// Stagger between reveal animation events.
    pub reveal_delay: Duration,
    /// Prefix for per-day storage keys.
    pub key_prefix: String,
    /// Encoding of stored snapshots.
    pub format: SnapshotFormat,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_guesses: MAX_GUESSES,
            reveal_delay: DEFAULT_REVEAL_DELAY,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            format: SnapshotFormat::Json,
        }
    }
}

impl GameConfig {
    pub fn with_max_guesses(mut self, max_guesses: usize) -> Self {
        self.max_guesses = max_guesses;
        self
    }

    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_format(mut self, format: SnapshotFormat) -> Self {
        self.format = format;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_guesses == 0 {
            return Err(ConfigError::ZeroGuessBudget);
        }
        let prefix_ok = !self.key_prefix.is_empty()
            && self
                .key_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !prefix_ok {
            return Err(ConfigError::InvalidKeyPrefix(self.key_prefix.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GameConfig::default();
        assert_eq!(config.max_guesses, 5);
        assert_eq!(config.reveal_delay, Duration::from_millis(500));
        assert_eq!(config.key_prefix, "chain");
        assert_eq!(config.format, SnapshotFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn setters_chain() {
        let config = GameConfig::default()
            .with_max_guesses(3)
            .with_reveal_delay(Duration::ZERO)
            .with_key_prefix("chainle_test")
            .with_format(SnapshotFormat::Binary);

        assert_eq!(config.max_guesses, 3);
        assert_eq!(config.reveal_delay, Duration::ZERO);
        assert_eq!(config.format, SnapshotFormat::Binary);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            GameConfig::default().with_max_guesses(0).validate(),
            Err(ConfigError::ZeroGuessBudget)
        );
        assert!(matches!(
            GameConfig::default().with_key_prefix("../up").validate(),
            Err(ConfigError::InvalidKeyPrefix(_))
        ));
        assert!(GameConfig::default().with_key_prefix("").validate().is_err());
    }
}
