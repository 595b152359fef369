//! Where the day's correct chain comes from.

use crate::core::{Chain, ChainError};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read chain table {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Chain table is malformed: {0}")]
    Parse(String),

    #[error("Chain published for {date} is invalid: {source}")]
    InvalidChain {
        date: NaiveDate,
        #[source]
        source: ChainError,
    },

    #[error("Chain lookup did not complete: {0}")]
    Interrupted(String),
}

/// Lookup of the chain published for a calendar date.
pub trait ChainSource: Send + Sync {
    /// `Ok(None)` means no puzzle is published for `date` yet.
    fn chain_for(&self, date: NaiveDate) -> Result<Option<Chain>, SourceError>;
}

/// Chains held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticChainSource {
    chains: HashMap<NaiveDate, Chain>,
}

impl StaticChainSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chain(mut self, date: NaiveDate, chain: Chain) -> Self {
        self.chains.insert(date, chain);
        self
    }

    pub fn insert(&mut self, date: NaiveDate, chain: Chain) {
        self.chains.insert(date, chain);
    }
}

impl ChainSource for StaticChainSource {
    fn chain_for(&self, date: NaiveDate) -> Result<Option<Chain>, SourceError> {
        Ok(self.chains.get(&date).cloned())
    }
}

/// One published puzzle.
#[derive(Debug, Deserialize)]
struct ChainRow {
    date: NaiveDate,
    chain: Vec<String>,
}

/// JSON file holding `[{"date": "YYYY-MM-DD", "chain": [...]}, ...]`.
///
/// The file is read on every lookup so newly published rows are picked up
/// without a restart. Only the requested row is validated.
#[derive(Debug, Clone)]
pub struct JsonFileChainSource {
    path: PathBuf,
}

impl JsonFileChainSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ChainSource for JsonFileChainSource {
    fn chain_for(&self, date: NaiveDate) -> Result<Option<Chain>, SourceError> {
        let bytes = fs::read(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let rows: Vec<ChainRow> =
            serde_json::from_slice(&bytes).map_err(|e| SourceError::Parse(e.to_string()))?;

        rows.into_iter()
            .find(|row| row.date == date)
            .map(|row| Chain::new(row.chain).map_err(|source| SourceError::InvalidChain { date, source }))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn table(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("chainle-chains-{}.json", Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn static_source_returns_published_chain() {
        let chain = Chain::new(["ant", "bee", "cat"]).unwrap();
        let source = StaticChainSource::new().with_chain(date(1), chain.clone());

        assert_eq!(source.chain_for(date(1)).unwrap(), Some(chain));
        assert_eq!(source.chain_for(date(2)).unwrap(), None);
    }

    #[test]
    fn file_source_looks_up_row_by_date() {
        let path = table(
            r#"[
                {"date": "2025-06-01", "chain": ["Board", "boat", "goat", "coats"]},
                {"date": "2025-06-02", "chain": ["x"]}
            ]"#,
        );
        let source = JsonFileChainSource::new(&path);

        let chain = source.chain_for(date(1)).unwrap().unwrap();
        assert_eq!(chain.word(0), Some("board"));
        assert!(source.chain_for(date(3)).unwrap().is_none());
        assert!(matches!(
            source.chain_for(date(2)),
            Err(SourceError::InvalidChain { .. })
        ));

        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = JsonFileChainSource::new("/definitely/not/here.json");
        assert!(matches!(source.chain_for(date(1)), Err(SourceError::Io { .. })));
    }

    #[test]
    fn malformed_table_is_a_parse_error() {
        let path = table("{\"date\": 1}");
        let source = JsonFileChainSource::new(&path);
        assert!(matches!(source.chain_for(date(1)), Err(SourceError::Parse(_))));
        fs::remove_file(path).ok();
    }
}
