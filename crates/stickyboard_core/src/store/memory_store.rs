//! In-memory `KeyValueStore` for tests and ephemeral hosts.

use super::{KeyValueStore, StoreError, StoreResult};
use std::collections::BTreeMap;

/// `BTreeMap`-backed store with an optional byte quota.
///
/// The quota counts key and value bytes of every stored entry, mirroring how
/// browser local storage rejects writes once its budget is used up.
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
    writes: u64,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes growing past `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Changes the quota; `None` removes the limit.
    pub fn set_quota(&mut self, quota_bytes: Option<usize>) {
        self.quota_bytes = quota_bytes;
    }

    /// Number of successful write calls (`set` and `set_many` count once each).
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn used_bytes_with(&self, replacements: &[(&str, &str)]) -> usize {
        let mut total: usize = self
            .entries
            .iter()
            .filter(|(key, _)| !replacements.iter().any(|(next, _)| *next == key.as_str()))
            .map(|(key, value)| key.len() + value.len())
            .sum();
        for (key, value) in replacements {
            total += key.len() + value.len();
        }
        total
    }

    fn check_quota(&self, replacements: &[(&str, &str)]) -> StoreResult<()> {
        let Some(limit_bytes) = self.quota_bytes else {
            return Ok(());
        };
        if self.used_bytes_with(replacements) > limit_bytes {
            let key = replacements
                .first()
                .map(|(key, _)| (*key).to_string())
                .unwrap_or_default();
            return Err(StoreError::QuotaExceeded { key, limit_bytes });
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.check_quota(&[(key, value)])?;
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> StoreResult<()> {
        let replacements: Vec<(&str, &str)> = entries
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .collect();
        self.check_quota(&replacements)?;
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), value.clone());
        }
        self.writes += 1;
        Ok(())
    }
}
