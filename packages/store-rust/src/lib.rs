//! `Lingua` Store — in-memory record store with multilingual lifecycle hooks.
//!
//! The host collaborator for `lingua-core`: a record store that calls the
//! core's four pipeline stages at its defined lifecycle points. Projection
//! runs before a fetch, expansion after a fetch, rule propagation before
//! validation, and collapse before a save.

pub mod config;
pub mod query;
pub mod storage;
pub mod store;

pub use config::StoreConfig;
pub use query::FindQuery;
pub use storage::{MemoryStorage, NullBackend, RecordBackend, StorageEngine};
pub use store::{StoreError, TranslatedStore};
