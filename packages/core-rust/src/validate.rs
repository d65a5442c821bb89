//! Field validation rules and their per-language propagation.
//!
//! Rules are declared against base field names. Before per-record validation
//! runs, [`RuleSet::propagated`] copies each translatable field's rule to
//! every derived `<field>_<language>` name so translated input is held to
//! the same constraints as the base value.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::I18nConfig;
use crate::types::{Record, Value};

/// Validation rule for one field.
///
/// Rules are copied by value when propagated: later mutation of a base
/// field's rule does not retroactively affect already-propagated
/// per-language entries unless propagation reruns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// The field must be present and non-vacant.
    pub required: bool,
    /// Minimum length for string values, in characters.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min_len: Option<usize>,
    /// Maximum length for string values, in characters.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_len: Option<usize>,
    /// Regex the full string value must match.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pattern: Option<String>,
}

impl FieldRule {
    /// A rule that only demands presence.
    #[must_use]
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Checks one field's value, appending human-readable failures.
    fn check(&self, field: &str, value: Option<&Value>, errors: &mut Vec<String>) {
        let vacant = value.is_none_or(Value::is_vacant);
        if self.required && vacant {
            errors.push(format!("`{field}` is required"));
        }
        if vacant {
            return;
        }
        let Some(Value::String(s)) = value else {
            return;
        };
        let len = s.chars().count();
        if let Some(min) = self.min_len {
            if len < min {
                errors.push(format!("`{field}` is shorter than {min} characters"));
            }
        }
        if let Some(max) = self.max_len {
            if len > max {
                errors.push(format!("`{field}` is longer than {max} characters"));
            }
        }
        if let Some(pattern) = &self.pattern {
            match Regex::new(pattern) {
                Ok(re) => {
                    if !re.is_match(s) {
                        errors.push(format!("`{field}` does not match `{pattern}`"));
                    }
                }
                Err(_) => errors.push(format!("`{field}` has an invalid pattern `{pattern}`")),
            }
        }
    }
}

/// Result of validating a record against a rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Every rule held.
    Valid,
    /// One or more rules failed.
    Invalid {
        /// Human-readable descriptions of each failure.
        errors: Vec<String>,
    },
}

impl ValidationResult {
    /// Whether validation passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Mapping from field name to validation rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: BTreeMap<String, FieldRule>,
}

impl RuleSet {
    /// An empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field's rule.
    pub fn insert(&mut self, field: impl Into<String>, rule: FieldRule) {
        self.rules.insert(field.into(), rule);
    }

    /// The rule for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.rules.get(field)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns this set with per-language entries added: for every
    /// translatable field that has a rule and every active non-default
    /// language, the derived `<field>_<language>` name receives a copy of
    /// the base rule.
    ///
    /// Fields without a base rule gain nothing. Idempotent: derived names
    /// never collide with base names (enforced at configuration setup), so
    /// reapplication simply re-derives the same entries.
    #[must_use]
    pub fn propagated(&self, config: &I18nConfig) -> Self {
        let mut out = self.clone();
        for language in config.registry().active_non_default() {
            for field in config.field_map().fields() {
                if let Some(rule) = self.rules.get(field) {
                    out.rules
                        .insert(config.field_map().suffixed_name(field, language), rule.clone());
                }
            }
        }
        out
    }

    /// Applies every rule to the record.
    #[must_use]
    pub fn validate(&self, record: &Record) -> ValidationResult {
        let mut errors = Vec::new();
        for (field, rule) in &self.rules {
            rule.check(field, record.get(field), &mut errors);
        }
        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid { errors }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> I18nConfig {
        I18nConfig::builder("ja")
            .known_languages(["en", "tw"])
            .active_languages(["en", "tw"])
            .fields(["title", "body"])
            .build()
            .expect("valid config")
    }

    fn title_rule() -> FieldRule {
        FieldRule {
            required: true,
            max_len: Some(10),
            ..FieldRule::default()
        }
    }

    #[test]
    fn propagated_copies_rules_to_every_language() {
        let mut rules = RuleSet::new();
        rules.insert("title", title_rule());

        let propagated = rules.propagated(&config());
        assert_eq!(propagated.len(), 3);
        assert_eq!(propagated.get("title_en"), Some(&title_rule()));
        assert_eq!(propagated.get("title_tw"), Some(&title_rule()));
        // `body` has no base rule; nothing is derived for it.
        assert!(propagated.get("body_en").is_none());
    }

    #[test]
    fn propagated_is_idempotent() {
        let mut rules = RuleSet::new();
        rules.insert("title", title_rule());

        let once = rules.propagated(&config());
        let twice = once.propagated(&config());
        assert_eq!(once, twice);
    }

    #[test]
    fn propagated_copies_by_value() {
        let mut rules = RuleSet::new();
        rules.insert("title", title_rule());
        let propagated = rules.propagated(&config());

        // Mutating the base rule afterwards must not affect derived entries.
        rules.insert("title", FieldRule::required());
        assert_eq!(propagated.get("title_en"), Some(&title_rule()));
    }

    #[test]
    fn validate_applies_propagated_rules_to_suffixed_fields() {
        let mut rules = RuleSet::new();
        rules.insert("title", title_rule());
        let propagated = rules.propagated(&config());

        let record = Record::from([
            ("title".to_string(), Value::from("ok")),
            ("title_en".to_string(), Value::from("way too long a title")),
            ("title_tw".to_string(), Value::from("ok")),
        ]);
        let ValidationResult::Invalid { errors } = propagated.validate(&record) else {
            panic!("expected failure");
        };
        assert!(errors.iter().any(|e| e.contains("title_en")));
    }

    #[test]
    fn required_rejects_vacant_values() {
        let mut rules = RuleSet::new();
        rules.insert("title", FieldRule::required());

        let missing = Record::new();
        assert!(!rules.validate(&missing).is_valid());

        let empty = Record::from([("title".to_string(), Value::String(String::new()))]);
        assert!(!rules.validate(&empty).is_valid());

        let present = Record::from([("title".to_string(), Value::from("x"))]);
        assert!(rules.validate(&present).is_valid());
    }

    #[test]
    fn pattern_rule_matches_full_strings() {
        let mut rules = RuleSet::new();
        rules.insert(
            "code",
            FieldRule {
                pattern: Some("^[a-z]{2}$".to_string()),
                ..FieldRule::default()
            },
        );

        let good = Record::from([("code".to_string(), Value::from("en"))]);
        assert!(rules.validate(&good).is_valid());

        let bad = Record::from([("code".to_string(), Value::from("EN!"))]);
        assert!(!rules.validate(&bad).is_valid());
    }

    #[test]
    fn optional_rules_skip_absent_fields() {
        let mut rules = RuleSet::new();
        rules.insert(
            "note",
            FieldRule {
                max_len: Some(3),
                ..FieldRule::default()
            },
        );
        assert!(rules.validate(&Record::new()).is_valid());
    }
}
