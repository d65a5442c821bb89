//! Store-level configuration.

/// Configuration for one [`TranslatedStore`](crate::store::TranslatedStore).
///
/// Controls naming and save-path behavior. The i18n configuration itself
/// (languages, fields, column, mode) lives in
/// [`lingua_core::I18nConfig`] and is shared with the transform engine.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Name of this store, used for backend routing and log context.
    pub name: String,
    /// Whether `save` runs rule validation before persisting.
    pub validate_on_save: bool,
    /// Whether `save` strips the derived suffixed input fields from the
    /// persisted record. The virtual per-language columns are re-derived on
    /// every fetch, so persisting them would duplicate blob data.
    pub strip_suffixed_on_save: bool,
}

impl StoreConfig {
    /// Creates a config with the given store name and default behavior.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validate_on_save: true,
            strip_suffixed_on_save: true,
        }
    }
}
