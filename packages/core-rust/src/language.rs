//! Language identifiers and the active-language registry.
//!
//! One language is designated the *default*: its values live directly in the
//! record's native columns and are never stored in the translation blob.
//! Every other active language contributes one field map to the blob.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque language code (`"en"`, `"tw"`, ...).
///
/// Codes are compared byte-for-byte; no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Wraps a language code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The raw code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Ordered set of active languages plus the fixed default.
///
/// The active set determines which per-language fields every codec and
/// transform iteration produces. Insertion order is iteration order; it has
/// no effect on merge outcomes. The registry is immutable once configuration
/// setup completes and may then be shared across concurrent callers.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    default: Language,
    known: Vec<Language>,
    active: Vec<Language>,
}

impl LanguageRegistry {
    /// Creates a registry with the given default and the full set of known
    /// languages. The active set starts as just the default, matching a
    /// deployment that has not opted into any translations yet.
    #[must_use]
    pub fn new(default: Language, known: impl IntoIterator<Item = Language>) -> Self {
        let active = vec![default.clone()];
        Self {
            default,
            known: dedupe(known),
            active,
        }
    }

    /// Replaces the active set. Duplicates are dropped, first occurrence wins.
    ///
    /// The default language need not be included; it is implicit and tracked
    /// separately.
    pub fn set_active(&mut self, languages: impl IntoIterator<Item = Language>) {
        self.active = dedupe(languages);
    }

    /// Activates every known language.
    pub fn activate_all(&mut self) {
        self.active.clone_from(&self.known);
    }

    /// The designated default (base) language.
    #[must_use]
    pub fn default_language(&self) -> &Language {
        &self.default
    }

    /// Every language this configuration knows about, in configured order.
    #[must_use]
    pub fn known(&self) -> &[Language] {
        &self.known
    }

    /// The active set, in configured order. May include the default.
    #[must_use]
    pub fn active(&self) -> &[Language] {
        &self.active
    }

    /// The active set minus the default, in configured order.
    ///
    /// This is the sequence every codec and transform iteration walks.
    pub fn active_non_default(&self) -> impl Iterator<Item = &Language> {
        self.active.iter().filter(move |l| **l != self.default)
    }
}

/// Drops duplicates, keeping the first occurrence of each language.
fn dedupe(languages: impl IntoIterator<Item = Language>) -> Vec<Language> {
    let mut out: Vec<Language> = Vec::new();
    for language in languages {
        if !out.contains(&language) {
            out.push(language);
        }
    }
    out
}
