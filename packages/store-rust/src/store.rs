//! Record store that orchestrates the multilingual lifecycle pipeline.
//!
//! [`TranslatedStore`] coordinates the in-memory
//! [`StorageEngine`](crate::storage::StorageEngine) with the
//! [`RecordBackend`](crate::storage::RecordBackend), calling the core's
//! pipeline stages at defined points: projection before a fetch, expansion
//! after a fetch, rule propagation before validation, and collapse before a
//! save.

use std::sync::Arc;

use lingua_core::{I18nConfig, Record, RecordTransform, RuleSet, ValidationResult};
use tracing::debug;

use crate::config::StoreConfig;
use crate::query::FindQuery;
use crate::storage::{RecordBackend, StorageEngine};

/// Errors surfaced by the save path beyond codec failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The record failed rule validation before persisting.
    #[error("record `{key}` failed validation: {errors:?}")]
    ValidationFailed {
        key: String,
        errors: Vec<String>,
    },
}

/// Record store with multilingual lifecycle hooks.
///
/// Fetches return expanded records (overlay or suffixed per configuration);
/// saves harvest suffixed input fields, merge them over the persisted blob,
/// and write through to the backend. Validation rules are propagated to
/// per-language names once, at construction.
pub struct TranslatedStore {
    config: StoreConfig,
    transform: RecordTransform,
    rules: RuleSet,
    engine: Box<dyn StorageEngine>,
    backend: Arc<dyn RecordBackend>,
}

impl TranslatedStore {
    /// Creates a store over the given engine and backend.
    ///
    /// `rules` are the base validation rules for this record kind; the
    /// per-language entries are derived here, before any record validation
    /// runs.
    #[must_use]
    pub fn new(
        config: StoreConfig,
        i18n: Arc<I18nConfig>,
        rules: &RuleSet,
        engine: Box<dyn StorageEngine>,
        backend: Arc<dyn RecordBackend>,
    ) -> Self {
        let transform = RecordTransform::new(i18n);
        let rules = transform.propagate_rules(rules);
        Self {
            config,
            transform,
            rules,
            engine,
            backend,
        }
    }

    /// Name of this store.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The rule set applied on save, per-language entries included.
    #[must_use]
    pub fn validation_rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Number of records currently held in memory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.engine.len()
    }

    /// Whether the in-memory engine holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    /// Fetches a record and expands its translations.
    ///
    /// # Errors
    ///
    /// Fails when the backend load fails or the persisted blob is corrupt.
    pub async fn find(&self, key: &str) -> anyhow::Result<Option<Record>> {
        let Some(raw) = self.fetch_raw(key).await? else {
            return Ok(None);
        };
        let expanded = self.transform.expand(&raw)?;
        Ok(Some(expanded))
    }

    /// Scans all records matching the query, projecting and expanding each.
    ///
    /// An explicit field projection gets the blob column injected first so
    /// translations survive the projection; a full-row query needs no
    /// injection.
    ///
    /// # Errors
    ///
    /// Fails when any matching record's blob is corrupt.
    pub async fn find_all(&self, query: &FindQuery) -> anyhow::Result<Vec<Record>> {
        let mut query = query.clone();
        self.transform.project_column(query.fields.as_mut());

        let mut matched: Vec<Record> = self
            .engine
            .snapshot_iter()
            .into_iter()
            .filter(|(_, record)| query.matches(record))
            .map(|(_, record)| query.project(&record))
            .collect();
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }

        let expanded = self.transform.expand_all(&matched)?;
        debug!(
            store = %self.config.name,
            matched = expanded.len(),
            "expanded scan results"
        );
        Ok(expanded)
    }

    /// Saves a record: validates, collapses suffixed inputs into the blob
    /// column, and writes through to the backend.
    ///
    /// Updating an existing record is a field-level update: columns this
    /// save does not mention, the untouched blob column included, keep
    /// their persisted values. Returns the record as persisted.
    ///
    /// # Errors
    ///
    /// Fails on validation errors, a corrupt persisted blob, or a backend
    /// write failure.
    pub async fn save(&self, key: &str, record: &Record) -> anyhow::Result<Record> {
        let existing = self.fetch_raw(key).await?;

        if self.config.validate_on_save {
            if let ValidationResult::Invalid { errors } = self.rules.validate(record) {
                return Err(StoreError::ValidationFailed {
                    key: key.to_string(),
                    errors,
                }
                .into());
            }
        }

        let existing_blob = existing
            .as_ref()
            .and_then(|r| r.get(self.transform.config().column()));
        let collapsed = self.transform.collapse(record, existing_blob)?;

        let mut stored = match existing {
            Some(mut base) => {
                base.extend(collapsed);
                base
            }
            None => collapsed,
        };
        if self.config.strip_suffixed_on_save {
            for names in self.transform.config().suffixed_fields().values() {
                for name in names {
                    stored.remove(name);
                }
            }
        }

        self.engine.put(key, stored.clone());
        self.backend.save(&self.config.name, key, &stored).await?;
        debug!(store = %self.config.name, key, "saved record");
        Ok(stored)
    }

    /// Removes a record from memory and the backend.
    ///
    /// # Errors
    ///
    /// Fails when the backend removal fails.
    pub async fn remove(&self, key: &str) -> anyhow::Result<Option<Record>> {
        let removed = self.engine.remove(key);
        self.backend.remove(&self.config.name, key).await?;
        Ok(removed)
    }

    /// Engine lookup with backend fallback, caching loaded records.
    async fn fetch_raw(&self, key: &str) -> anyhow::Result<Option<Record>> {
        if let Some(record) = self.engine.get(key) {
            return Ok(Some(record));
        }
        if !self.backend.is_null() {
            if let Some(record) = self.backend.load(&self.config.name, key).await? {
                self.engine.put(key, record.clone());
                debug!(store = %self.config.name, key, "loaded record from backend");
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}
