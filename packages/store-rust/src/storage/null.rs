//! No-op [`RecordBackend`] implementation.
//!
//! [`NullBackend`] discards all writes and returns empty results for reads.
//! Useful for tests and ephemeral data that does not require persistence
//! beyond the in-memory engine.

use async_trait::async_trait;
use lingua_core::Record;

use crate::storage::backend::RecordBackend;

/// No-op `RecordBackend` for tests and ephemeral data.
///
/// All write operations succeed immediately without side effects; all read
/// operations return empty results. This is the default backend when no
/// external persistence is configured.
pub struct NullBackend;

#[async_trait]
impl RecordBackend for NullBackend {
    async fn save(&self, _store: &str, _key: &str, _record: &Record) -> anyhow::Result<()> {
        Ok(())
    }

    async fn load(&self, _store: &str, _key: &str) -> anyhow::Result<Option<Record>> {
        Ok(None)
    }

    async fn remove(&self, _store: &str, _key: &str) -> anyhow::Result<()> {
        Ok(())
    }

    fn is_null(&self) -> bool {
        true
    }
}
