//! Translatable field set and the suffixed naming scheme.

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// How decoded translations are represented on an outward-facing record.
///
/// Fixed per record-kind configuration at setup time, never recomputed per
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepresentationMode {
    /// Decoded values overwrite the base field's value in the outward record.
    /// Only the active languages' values are applied; suffixed fields are
    /// never produced.
    Overlay,
    /// Decoded values appear as additional `<field>_<language>` fields for
    /// every active non-default language. Base fields are left untouched.
    /// Missing translations yield an explicit null, never omission.
    Suffixed,
}

/// The set of translatable field names for one record kind, plus the
/// representation mode.
///
/// Immutable for the lifetime of a configuration instance.
#[derive(Debug, Clone)]
pub struct FieldMap {
    fields: Vec<String>,
    mode: RepresentationMode,
}

impl FieldMap {
    pub(crate) fn new(fields: Vec<String>, mode: RepresentationMode) -> Self {
        Self { fields, mode }
    }

    /// The translatable field names, in configured order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The representation mode for this record kind.
    #[must_use]
    pub fn mode(&self) -> RepresentationMode {
        self.mode
    }

    /// Derives the per-language field name: `"{field}_{language}"`.
    ///
    /// This naming convention is load-bearing: the write path discovers
    /// per-language input values on an incoming record by probing for fields
    /// matching it. Configuration setup rejects field/language combinations
    /// whose derived names collide.
    #[must_use]
    pub fn suffixed_name(&self, field: &str, language: &Language) -> String {
        format!("{field}_{language}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixed_name_joins_with_underscore() {
        let map = FieldMap::new(vec!["title".to_string()], RepresentationMode::Suffixed);
        assert_eq!(map.suffixed_name("title", &Language::from("en")), "title_en");
        assert_eq!(map.suffixed_name("body", &Language::from("tw")), "body_tw");
    }

    #[test]
    fn fields_keep_configured_order() {
        let map = FieldMap::new(
            vec!["title".to_string(), "body".to_string()],
            RepresentationMode::Overlay,
        );
        assert_eq!(map.fields(), ["title", "body"]);
        assert_eq!(map.mode(), RepresentationMode::Overlay);
    }
}
