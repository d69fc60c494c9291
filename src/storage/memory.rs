//! In-memory store.

use std::sync::RwLock;

use rustc_hash::FxHashMap;

use crate::storage::{PersistentStore, StorageError};

/// Process-local store, useful for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<FxHashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &[u8]) -> Self {
        let mut entries = FxHashMap::default();

        entries.insert(key.to_string(), value.to_vec());

        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl PersistentStore for InMemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let entries = self.entries.read().map_err(|_poisoned| StorageError::Poisoned)?;

        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_poisoned| StorageError::Poisoned)?;

        entries.insert(key.to_string(), value.to_vec());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn read_missing_key_returns_none() -> TestResult {
        let store = InMemoryStore::new();

        assert_eq!(store.read("missing")?, None);

        Ok(())
    }

    #[test]
    fn write_replaces_previous_value() -> TestResult {
        let store = InMemoryStore::with_entry("key", b"old");

        store.write("key", b"new")?;

        assert_eq!(store.read("key")?, Some(b"new".to_vec()));

        Ok(())
    }
}
