//! External persistence backend trait for the storage layer.
//!
//! Defines [`RecordBackend`], the abstraction behind the in-memory engine.
//! The [`TranslatedStore`](crate::store::TranslatedStore) writes through on
//! every save and falls back to `load()` on a memory miss; the
//! implementation decides when and how data is actually persisted.

use async_trait::async_trait;
use lingua_core::Record;

/// External persistence backend for a record store.
///
/// Used as `Arc<dyn RecordBackend>`.
#[async_trait]
pub trait RecordBackend: Send + Sync {
    /// Persist a record (or queue it for async persistence).
    async fn save(&self, store: &str, key: &str, record: &Record) -> anyhow::Result<()>;

    /// Load a single record from the backing store.
    ///
    /// Returns `None` if the key does not exist.
    async fn load(&self, store: &str, key: &str) -> anyhow::Result<Option<Record>>;

    /// Remove a record from the backing store.
    async fn remove(&self, store: &str, key: &str) -> anyhow::Result<()>;

    /// Whether this is a null (no-op) implementation.
    ///
    /// Returns `false` by default. Null implementations override to return
    /// `true` so the store can skip pointless load round-trips.
    fn is_null(&self) -> bool {
        false
    }
}
