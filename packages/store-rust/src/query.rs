//! Query parameters for store scans.

use std::collections::BTreeMap;

use lingua_core::{Record, Value};
use serde::{Deserialize, Serialize};

/// Parameters for filtering, projection, and pagination on
/// [`TranslatedStore::find_all`](crate::store::TranslatedStore::find_all).
///
/// `fields: None` means a full-row fetch; the pre-fetch hook only injects
/// the blob column into an explicit projection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindQuery {
    /// Equality conditions every returned record must satisfy.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub conditions: Option<BTreeMap<String, Value>>,
    /// Column projection. `None` fetches whole rows.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fields: Option<Vec<String>>,
    /// Maximum number of records to return.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub limit: Option<usize>,
}

impl FindQuery {
    /// A query returning every record in full.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the result to the given columns.
    #[must_use]
    pub fn select<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Adds an equality condition.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), value.into());
        self
    }

    /// Caps the number of returned records.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a record satisfies every condition.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.as_ref().is_none_or(|conditions| {
            conditions
                .iter()
                .all(|(field, expected)| record.get(field) == Some(expected))
        })
    }

    /// Applies the column projection to a fetched record.
    ///
    /// A full-row query returns the record as-is.
    #[must_use]
    pub fn project(&self, record: &Record) -> Record {
        match &self.fields {
            None => record.clone(),
            Some(fields) => fields
                .iter()
                .filter_map(|field| {
                    record
                        .get(field)
                        .map(|value| (field.clone(), value.clone()))
                })
                .collect(),
        }
    }
}
