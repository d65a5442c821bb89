//! Read-path and write-path record transforms.
//!
//! [`RecordTransform`] is the explicit pipeline the host persistence layer
//! calls at its defined lifecycle points: [`project_column`] before a fetch,
//! [`expand`] after a fetch, [`propagate_rules`] before validation, and
//! [`collapse`] before a save. Every transform is a single-pass, synchronous,
//! side-effect-free function from input maps to a new output value; inputs
//! are never mutated in place.
//!
//! [`project_column`]: RecordTransform::project_column
//! [`expand`]: RecordTransform::expand
//! [`propagate_rules`]: RecordTransform::propagate_rules
//! [`collapse`]: RecordTransform::collapse

use std::sync::Arc;

use tracing::debug;

use crate::codec::{self, PerLanguage};
use crate::config::I18nConfig;
use crate::error::CodecError;
use crate::fields::RepresentationMode;
use crate::types::{Record, Value};
use crate::validate::RuleSet;

/// The read/write transform engine for one record kind.
///
/// Holds shared, immutable configuration; safe to use from arbitrary
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct RecordTransform {
    config: Arc<I18nConfig>,
}

impl RecordTransform {
    /// Creates a transform over the given configuration.
    #[must_use]
    pub fn new(config: Arc<I18nConfig>) -> Self {
        Self { config }
    }

    /// The configuration this transform was built with.
    #[must_use]
    pub fn config(&self) -> &I18nConfig {
        &self.config
    }

    /// Pre-fetch hook: appends the blob column to an explicit field
    /// projection so the read path has something to decode.
    ///
    /// A query with no explicit field list (full-row or grouped fetch)
    /// already includes the column; nothing is injected then, which is why
    /// this takes the projection as an `Option`.
    pub fn project_column(&self, fields: Option<&mut Vec<String>>) {
        if !self.config.fetch_translations() {
            return;
        }
        if let Some(fields) = fields {
            if !fields.iter().any(|f| f == self.config.column()) {
                fields.push(self.config.column().to_string());
            }
        }
    }

    /// Post-fetch hook: decodes the blob column and exposes translations
    /// per the configured representation mode.
    ///
    /// A record without the blob column is returned unchanged. In suffixed
    /// mode every active non-default language and translatable field yields
    /// a `<field>_<language>` entry (decoded value when present, explicit
    /// null otherwise) and base fields are untouched. In overlay mode
    /// non-vacant decoded values overwrite the base fields, languages
    /// applied in registry order so the last one wins per field. The blob
    /// column itself is left on the record either way.
    ///
    /// # Errors
    ///
    /// Propagates [`CodecError`] when the column value does not decode.
    pub fn expand(&self, record: &Record) -> Result<Record, CodecError> {
        let cfg = &self.config;
        if !record.contains_key(cfg.column()) {
            return Ok(record.clone());
        }
        let decoded = codec::decode(cfg.column(), record.get(cfg.column()))?;

        let mut out = record.clone();
        match cfg.field_map().mode() {
            RepresentationMode::Suffixed => {
                for language in cfg.registry().active_non_default() {
                    let translations = decoded.get(language);
                    for field in cfg.field_map().fields() {
                        let value = translations
                            .and_then(|t| t.get(field))
                            .filter(|v| !v.is_vacant())
                            .cloned()
                            .unwrap_or(Value::Null);
                        out.insert(cfg.field_map().suffixed_name(field, language), value);
                    }
                }
            }
            RepresentationMode::Overlay => {
                for language in cfg.registry().active_non_default() {
                    let Some(translations) = decoded.get(language) else {
                        continue;
                    };
                    for field in cfg.field_map().fields() {
                        if let Some(value) = translations.get(field) {
                            if !value.is_vacant() {
                                out.insert(field.clone(), value.clone());
                            }
                        }
                    }
                }
            }
        }
        Ok(out)
    }

    /// Batch form of [`expand`](Self::expand) for fetched result sets.
    ///
    /// # Errors
    ///
    /// Fails on the first record whose blob does not decode.
    pub fn expand_all(&self, records: &[Record]) -> Result<Vec<Record>, CodecError> {
        records.iter().map(|record| self.expand(record)).collect()
    }

    /// Pre-save hook: harvests suffixed per-language input fields, merges
    /// them over the currently persisted blob, and writes the re-encoded
    /// blob column onto the returned record.
    ///
    /// `existing_blob` is the persisted blob column value when an existing
    /// record is being updated; the host supplies it so a partial update
    /// cannot erase languages or fields it never mentioned. When this save
    /// carries no suffixed input at all, an update leaves the blob column
    /// untouched and a fresh insert stores the canonical empty blob so the
    /// column is always well-formed. A disabled configuration normalizes a
    /// present blob column to the canonical empty value.
    ///
    /// Entries for the default language are never written; a tampered
    /// default-language entry in the existing blob is discarded.
    ///
    /// # Errors
    ///
    /// Propagates [`CodecError`] when the existing blob does not decode or
    /// re-encoding fails.
    pub fn collapse(
        &self,
        record: &Record,
        existing_blob: Option<&Value>,
    ) -> Result<Record, CodecError> {
        let cfg = &self.config;
        let mut out = record.clone();

        if cfg.is_disabled() {
            if out.contains_key(cfg.column()) {
                out.insert(cfg.column().to_string(), empty_blob()?);
            }
            return Ok(out);
        }

        // Step 1: harvest suffixed inputs across every active non-default
        // language and translatable field.
        let mut incoming = PerLanguage::new();
        for language in cfg.registry().active_non_default() {
            for field in cfg.field_map().fields() {
                let name = cfg.field_map().suffixed_name(field, language);
                if let Some(value) = record.get(&name) {
                    incoming
                        .entry(language.clone())
                        .or_default()
                        .insert(field.clone(), value.clone());
                }
            }
        }

        // Step 2: a save that never touched translations must not clobber
        // what is already persisted.
        if incoming.is_empty() {
            if existing_blob.is_some() {
                return Ok(out);
            }
            out.insert(cfg.column().to_string(), empty_blob()?);
            return Ok(out);
        }

        // Step 3: deep-merge over the persisted state. Languages and fields
        // this save does not mention stay exactly as stored.
        let mut merged = codec::decode(cfg.column(), existing_blob)?;
        merged.remove(cfg.registry().default_language());
        for (language, fields) in incoming {
            deep_merge(merged.entry(language).or_default(), fields);
        }

        debug!(
            column = cfg.column(),
            languages = merged.len(),
            "re-encoded translation blob"
        );

        // Step 4: re-encode wholesale; an empty result is the canonical
        // empty blob, not an absent column.
        out.insert(cfg.column().to_string(), Value::Bytes(codec::encode(&merged)?));
        Ok(out)
    }

    /// Pre-validation hook: copies each translatable field's rule to every
    /// derived per-language field name.
    ///
    /// Pure and idempotent; see [`RuleSet::propagated`].
    #[must_use]
    pub fn propagate_rules(&self, rules: &RuleSet) -> RuleSet {
        rules.propagated(&self.config)
    }
}

/// Recursive per-key override: where both sides hold a nested map for the
/// same key, recurse; otherwise the incoming value wins.
pub fn deep_merge(
    existing: &mut std::collections::BTreeMap<String, Value>,
    incoming: std::collections::BTreeMap<String, Value>,
) {
    for (key, value) in incoming {
        let merged = match (existing.remove(&key), value) {
            (Some(Value::Map(mut nested)), Value::Map(update)) => {
                deep_merge(&mut nested, update);
                Value::Map(nested)
            }
            (_, value) => value,
        };
        existing.insert(key, merged);
    }
}

/// The canonical empty blob value: a present, well-formed encoding of an
/// empty per-language map.
fn empty_blob() -> Result<Value, CodecError> {
    Ok(Value::Bytes(codec::encode(&PerLanguage::new())?))
}
