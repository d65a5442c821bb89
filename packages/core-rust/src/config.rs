//! Per-record-kind configuration: languages, translatable fields, blob
//! column, and representation mode.
//!
//! Configuration is consumed once at setup and never re-read per call.
//! [`I18nConfig::builder`] validates the derived suffixed names eagerly so a
//! name collision fails setup instead of corrupting data at runtime.

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::fields::{FieldMap, RepresentationMode};
use crate::language::{Language, LanguageRegistry};

/// Default name of the column holding the encoded translation blob.
pub const DEFAULT_COLUMN: &str = "i18n";

/// Immutable configuration for one record kind.
///
/// Shared read-only across arbitrary concurrent callers once setup completes
/// (the store layer wraps it in an `Arc`).
#[derive(Debug, Clone)]
pub struct I18nConfig {
    registry: LanguageRegistry,
    fields: FieldMap,
    column: String,
    fetch_translations: bool,
}

impl I18nConfig {
    /// Starts a builder with the given default (base) language.
    #[must_use]
    pub fn builder(default_language: impl Into<Language>) -> I18nConfigBuilder {
        I18nConfigBuilder {
            default: default_language.into(),
            known: Vec::new(),
            active: None,
            activate_all: false,
            fields: Vec::new(),
            column: DEFAULT_COLUMN.to_string(),
            mode: RepresentationMode::Overlay,
            fetch_translations: true,
        }
    }

    /// The language registry.
    #[must_use]
    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// The translatable field set and representation mode.
    #[must_use]
    pub fn field_map(&self) -> &FieldMap {
        &self.fields
    }

    /// Name of the blob column.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Whether the pre-fetch hook injects the blob column into projections.
    #[must_use]
    pub fn fetch_translations(&self) -> bool {
        self.fetch_translations
    }

    /// Returns `true` when no per-language output can ever be produced:
    /// either no translatable fields or no active non-default language.
    ///
    /// A disabled configuration is valid; every per-language operation is
    /// then an identity on the non-blob fields.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.fields.fields().is_empty() || self.registry.active_non_default().next().is_none()
    }

    /// Every derived suffixed field name, grouped per active non-default
    /// language, in configured order.
    #[must_use]
    pub fn suffixed_fields(&self) -> BTreeMap<Language, Vec<String>> {
        self.registry
            .active_non_default()
            .map(|language| {
                let names = self
                    .fields
                    .fields()
                    .iter()
                    .map(|field| self.fields.suffixed_name(field, language))
                    .collect();
                (language.clone(), names)
            })
            .collect()
    }
}

/// Builder for [`I18nConfig`]. Construction validates derived names.
#[derive(Debug, Clone)]
pub struct I18nConfigBuilder {
    default: Language,
    known: Vec<Language>,
    active: Option<Vec<Language>>,
    activate_all: bool,
    fields: Vec<String>,
    column: String,
    mode: RepresentationMode,
    fetch_translations: bool,
}

impl I18nConfigBuilder {
    /// Declares the full set of languages this record kind may carry.
    #[must_use]
    pub fn known_languages<L: Into<Language>>(
        mut self,
        languages: impl IntoIterator<Item = L>,
    ) -> Self {
        self.known = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the active language set. Without this, only the default language
    /// is active and all per-language operations are no-ops.
    #[must_use]
    pub fn active_languages<L: Into<Language>>(
        mut self,
        languages: impl IntoIterator<Item = L>,
    ) -> Self {
        self.active = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    /// Activates every known language.
    #[must_use]
    pub fn all_languages(mut self) -> Self {
        self.activate_all = true;
        self
    }

    /// Declares the translatable field names.
    #[must_use]
    pub fn fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides the blob column name (default: [`DEFAULT_COLUMN`]).
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Sets the representation mode (default: [`RepresentationMode::Overlay`]).
    #[must_use]
    pub fn mode(mut self, mode: RepresentationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Disables blob-column injection in the pre-fetch hook.
    #[must_use]
    pub fn skip_fetch(mut self) -> Self {
        self.fetch_translations = false;
        self
    }

    /// Editing-surface preset: every known language active, translations
    /// exposed as suffixed fields rather than overlaid onto base columns.
    #[must_use]
    pub fn editor_profile(self) -> Self {
        self.all_languages().mode(RepresentationMode::Suffixed)
    }

    /// Validates derived names and produces the immutable configuration.
    ///
    /// # Errors
    ///
    /// Fails when any two distinct (field, language) pairs derive the same
    /// suffixed name, or a derived name shadows a translatable base field or
    /// the blob column itself.
    pub fn build(self) -> Result<I18nConfig, ConfigError> {
        let mut registry = LanguageRegistry::new(self.default, self.known);
        if self.activate_all {
            registry.activate_all();
        } else if let Some(active) = self.active {
            registry.set_active(active);
        }

        let fields = FieldMap::new(self.fields, self.mode);
        check_derived_names(&registry, &fields, &self.column)?;

        Ok(I18nConfig {
            registry,
            fields,
            column: self.column,
            fetch_translations: self.fetch_translations,
        })
    }
}

/// Rejects configurations whose derived suffixed names are ambiguous.
///
/// Checked across all (field, language) pairs of the active set so the write
/// path can rely on `suffixed_name` being injective.
fn check_derived_names(
    registry: &LanguageRegistry,
    fields: &FieldMap,
    column: &str,
) -> Result<(), ConfigError> {
    let mut seen: BTreeMap<String, (String, Language)> = BTreeMap::new();
    for language in registry.active_non_default() {
        for field in fields.fields() {
            let name = fields.suffixed_name(field, language);
            if name == column {
                return Err(ConfigError::CollidesWithColumn { name });
            }
            if fields.fields().iter().any(|f| *f == name) {
                return Err(ConfigError::ShadowsBaseField { name });
            }
            if let Some((first_field, first_language)) = seen.get(&name) {
                return Err(ConfigError::SuffixCollision {
                    name,
                    first_field: first_field.clone(),
                    first_language: first_language.to_string(),
                    second_field: field.clone(),
                    second_language: language.to_string(),
                });
            }
            seen.insert(name, (field.clone(), language.clone()));
        }
    }
    Ok(())
}
