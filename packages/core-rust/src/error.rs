//! Typed failures for blob decoding and configuration setup.

use thiserror::Error;

/// Errors from encoding or decoding a persisted translation blob.
///
/// Decode failures are not recoverable locally; they propagate to the caller
/// of the read/write transforms so the host can fail the fetch or save
/// rather than silently losing data.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The column held bytes that do not parse as a per-language field map.
    #[error("translation column `{column}` does not decode as a per-language field map")]
    CorruptBlob {
        /// Name of the blob column.
        column: String,
        #[source]
        source: rmp_serde::decode::Error,
    },
    /// The column held a value the codec cannot interpret as a blob.
    #[error("translation column `{column}` holds a {found} value, expected bytes")]
    UnexpectedColumnType {
        /// Name of the blob column.
        column: String,
        /// Variant name of the offending value.
        found: &'static str,
    },
    /// Serialization of a per-language map failed.
    #[error("per-language field map failed to serialize")]
    EncodeFailed {
        #[source]
        source: rmp_serde::encode::Error,
    },
}

/// Errors detected while building an [`I18nConfig`](crate::config::I18nConfig).
///
/// All of these are configuration-time programmer errors: setup fails
/// immediately instead of letting a name collision corrupt data at runtime.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Two distinct (field, language) pairs derive the same suffixed name.
    #[error(
        "(`{first_field}`, `{first_language}`) and (`{second_field}`, `{second_language}`) \
         both derive the suffixed name `{name}`"
    )]
    SuffixCollision {
        name: String,
        first_field: String,
        first_language: String,
        second_field: String,
        second_language: String,
    },
    /// A derived suffixed name equals a translatable base field name.
    #[error("suffixed name `{name}` shadows a translatable base field")]
    ShadowsBaseField { name: String },
    /// A derived suffixed name equals the blob column name.
    #[error("suffixed name `{name}` collides with the translation column")]
    CollidesWithColumn { name: String },
}
