//! In-memory [`StorageEngine`] implementation backed by [`DashMap`].
//!
//! Provides concurrent read/write access without external locking.
//! Suitable for tests and workloads where all data fits in memory.

use dashmap::DashMap;
use lingua_core::Record;

use crate::storage::engine::StorageEngine;

/// In-memory storage backed by [`DashMap`] for concurrent access.
///
/// Reads are lock-free and writes use fine-grained sharding internally,
/// which suits the read-heavy access pattern of record fetches.
pub struct MemoryStorage {
    entries: DashMap<String, Record>,
}

impl MemoryStorage {
    /// Creates a new, empty `MemoryStorage`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageEngine for MemoryStorage {
    fn put(&self, key: &str, record: Record) -> Option<Record> {
        self.entries.insert(key.to_string(), record)
    }

    fn get(&self, key: &str) -> Option<Record> {
        self.entries.get(key).map(|r| r.clone())
    }

    fn remove(&self, key: &str) -> Option<Record> {
        self.entries.remove(key).map(|(_, r)| r)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn clear(&self) {
        self.entries.clear();
    }

    fn snapshot_iter(&self) -> Vec<(String, Record)> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use lingua_core::Value;

    use super::*;

    fn make_record(title: &str) -> Record {
        Record::from([("title".to_string(), Value::from(title))])
    }

    #[test]
    fn put_get_remove_round_trip() {
        let storage = MemoryStorage::new();

        assert!(storage.put("key1", make_record("one")).is_none());

        let fetched = storage.get("key1").expect("present");
        assert_eq!(fetched["title"], Value::from("one"));

        let removed = storage.remove("key1").expect("removed");
        assert_eq!(removed["title"], Value::from("one"));

        assert!(storage.get("key1").is_none());
    }

    #[test]
    fn contains_key_reflects_state() {
        let storage = MemoryStorage::new();

        assert!(!storage.contains_key("key1"));

        storage.put("key1", make_record("x"));
        assert!(storage.contains_key("key1"));

        storage.remove("key1");
        assert!(!storage.contains_key("key1"));
    }

    #[test]
    fn len_and_is_empty() {
        let storage = MemoryStorage::new();

        assert!(storage.is_empty());
        assert_eq!(storage.len(), 0);

        storage.put("a", make_record("a"));
        assert!(!storage.is_empty());
        assert_eq!(storage.len(), 1);

        storage.put("b", make_record("b"));
        assert_eq!(storage.len(), 2);

        storage.remove("a");
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn clear_empties_storage() {
        let storage = MemoryStorage::new();

        storage.put("a", make_record("a"));
        storage.put("b", make_record("b"));
        storage.clear();

        assert!(storage.is_empty());
    }

    #[test]
    fn snapshot_iter_returns_all_entries() {
        let storage = MemoryStorage::new();
        storage.put("a", make_record("a"));
        storage.put("b", make_record("b"));
        storage.put("c", make_record("c"));

        let mut keys: Vec<String> = storage
            .snapshot_iter()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        keys.sort();
        assert_eq!(keys, ["a", "b", "c"]);
    }
}
