//! Low-level storage engine trait.
//!
//! Defines [`StorageEngine`], the innermost storage layer: in-memory
//! key-value storage over whole records. All operations are synchronous;
//! the async persistence boundary lives in
//! [`RecordBackend`](super::RecordBackend).

use lingua_core::Record;

/// Low-level keyed record storage.
///
/// Implementations are in-memory (`DashMap`, `BTreeMap`, etc.).
/// Wrapped in `Box<dyn StorageEngine>` by the
/// [`TranslatedStore`](crate::store::TranslatedStore).
pub trait StorageEngine: Send + Sync + 'static {
    /// Insert or replace a record by key. Returns the previous record if any.
    fn put(&self, key: &str, record: Record) -> Option<Record>;

    /// Retrieve a record by key, or `None` if not present.
    fn get(&self, key: &str) -> Option<Record>;

    /// Remove a record by key, returning the removed record.
    fn remove(&self, key: &str) -> Option<Record>;

    /// Check if a key exists without returning the record.
    fn contains_key(&self, key: &str) -> bool;

    /// Return the number of entries.
    fn len(&self) -> usize;

    /// Check if the storage is empty.
    fn is_empty(&self) -> bool;

    /// Clear all entries. Takes `&self` for trait-object compatibility.
    fn clear(&self);

    /// Point-in-time copy of every entry, for scans and filtering.
    fn snapshot_iter(&self) -> Vec<(String, Record)>;
}
