use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A fetched or to-be-saved row as a field map.
///
/// Keys are column names. `BTreeMap` keeps field order deterministic so
/// any serialized form of a record is byte-stable.
pub type Record = BTreeMap<String, Value>;

/// Generic runtime value type for record fields.
///
/// Supports all JSON-compatible types plus binary data. Used as the
/// concrete field type in [`Record`] and inside per-language field maps,
/// and referenced by [`RuleSet::validate`](crate::validate::RuleSet::validate)
/// for rule checks.
///
/// Serializes to `MsgPack` via `rmp-serde`; the translation blob column
/// holds a [`Value::Bytes`] produced by [`codec::encode`](crate::codec::encode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// JSON null.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON integer (signed 64-bit).
    Int(i64),
    /// JSON floating-point (64-bit IEEE 754).
    Float(f64),
    /// JSON string (UTF-8).
    String(String),
    /// Binary data (not directly representable in JSON).
    /// `serde_bytes` keeps this as a `MsgPack` bin payload instead of an int array.
    Bytes(#[serde(with = "serde_bytes")] Vec<u8>),
    /// JSON array (ordered sequence of values).
    Array(Vec<Value>),
    /// JSON object (ordered map of string keys to values).
    /// Uses `BTreeMap` for deterministic serialization order.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` if the value carries no data.
    ///
    /// Vacant values are pruned from language field maps at encode time and
    /// never overwrite base fields on the read path. Booleans and numbers
    /// are never vacant, `false` and `0` included.
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::Bytes(b) => b.is_empty(),
            Self::Array(a) => a.is_empty(),
            Self::Map(m) => m.is_empty(),
            Self::Bool(_) | Self::Int(_) | Self::Float(_) => false,
        }
    }

    /// Human-readable name of the variant, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// Conversion from JSON, used by tests and fixture loading.
///
/// Numbers that fit in `i64` become [`Value::Int`]; everything else
/// numeric becomes [`Value::Float`].
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(0.0)), Self::Int),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(a) => Self::Array(a.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(o) => {
                Self::Map(o.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
