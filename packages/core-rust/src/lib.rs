//! `Lingua` Core — multilingual field codec, merge engine, and validation
//! propagation.
//!
//! A record keeps its default-language values in native columns and packs
//! every other language's variants of the translatable fields into one
//! encoded blob column. This crate owns the rules for that column: which
//! fields are translatable, how per-language maps are encoded and decoded,
//! how partial updates merge without destroying untouched languages, and
//! how field-level validation rules fan out to per-language field names.
//!
//! The crate is purely functional over in-memory record maps: no I/O, no
//! shared mutable state. The host persistence layer drives it through
//! [`RecordTransform`]'s four pipeline stages.

pub mod codec;
pub mod config;
pub mod error;
pub mod fields;
pub mod language;
pub mod transform;
pub mod types;
pub mod validate;

pub use config::{I18nConfig, I18nConfigBuilder, DEFAULT_COLUMN};
pub use error::{CodecError, ConfigError};
pub use fields::{FieldMap, RepresentationMode};
pub use language::{Language, LanguageRegistry};
pub use transform::RecordTransform;
pub use types::{Record, Value};
pub use validate::{FieldRule, RuleSet, ValidationResult};
