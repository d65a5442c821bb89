//! Blob codec: per-language field maps to and from opaque `MsgPack` bytes.
//!
//! The persisted shape is a mapping from language code to a field map for
//! that language. The default language never appears here; its values live
//! in the base columns. Serialization goes through `rmp-serde`, the same
//! path every other persisted structure in this workspace takes.

use std::collections::BTreeMap;

use crate::error::CodecError;
use crate::language::Language;
use crate::types::Value;

/// Field map for one language: translatable field name to value.
pub type LanguageFields = BTreeMap<String, Value>;

/// The decoded shape of a blob: language to field map, default excluded.
pub type PerLanguage = BTreeMap<Language, LanguageFields>;

/// Encodes a per-language map into blob bytes.
///
/// Vacant per-field values are pruned: a (field, language) pair with no data
/// is simply not written. Language entries are *not* pruned when their field
/// map comes out empty; callers preserve the empty-vs-absent distinction
/// themselves, and the write path only inserts a language once it has a
/// value for it.
///
/// Encoding an empty map yields the canonical empty blob: a present,
/// well-formed value that decodes back to an empty mapping.
///
/// # Errors
///
/// Returns [`CodecError::EncodeFailed`] if serialization fails.
pub fn encode(per_language: &PerLanguage) -> Result<Vec<u8>, CodecError> {
    let pruned: PerLanguage = per_language
        .iter()
        .map(|(language, fields)| {
            let kept: LanguageFields = fields
                .iter()
                .filter(|(_, value)| !value.is_vacant())
                .map(|(field, value)| (field.clone(), value.clone()))
                .collect();
            (language.clone(), kept)
        })
        .collect();
    rmp_serde::to_vec_named(&pruned).map_err(|source| CodecError::EncodeFailed { source })
}

/// Decodes the blob column's value back into a per-language map.
///
/// An absent column, an explicit null, or zero-length bytes all decode to
/// the empty mapping; "no translations" is not an error. Anything else
/// must be a well-formed encoding.
///
/// # Errors
///
/// Returns [`CodecError::CorruptBlob`] when the bytes do not parse as the
/// expected nested structure, and [`CodecError::UnexpectedColumnType`] when
/// the column holds a non-bytes value.
pub fn decode(column: &str, value: Option<&Value>) -> Result<PerLanguage, CodecError> {
    match value {
        None | Some(Value::Null) => Ok(PerLanguage::new()),
        Some(Value::Bytes(bytes)) if bytes.is_empty() => Ok(PerLanguage::new()),
        Some(Value::Bytes(bytes)) => {
            rmp_serde::from_slice(bytes).map_err(|source| CodecError::CorruptBlob {
                column: column.to_string(),
                source,
            })
        }
        Some(other) => Err(CodecError::UnexpectedColumnType {
            column: column.to_string(),
            found: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(code: &str) -> Language {
        Language::from(code)
    }

    #[test]
    fn round_trip_preserves_non_vacant_fields() {
        let mut per_language = PerLanguage::new();
        per_language.insert(
            lang("en"),
            LanguageFields::from([
                ("title".to_string(), Value::from("Hello")),
                ("body".to_string(), Value::from("World")),
            ]),
        );
        per_language.insert(
            lang("tw"),
            LanguageFields::from([("title".to_string(), Value::from("哈囉"))]),
        );

        let bytes = encode(&per_language).expect("encode");
        let decoded = decode("i18n", Some(&Value::Bytes(bytes))).expect("decode");
        assert_eq!(decoded, per_language);
    }

    #[test]
    fn encode_prunes_vacant_fields_but_keeps_language_entries() {
        let mut per_language = PerLanguage::new();
        per_language.insert(
            lang("en"),
            LanguageFields::from([
                ("title".to_string(), Value::from("Hello")),
                ("body".to_string(), Value::String(String::new())),
                ("note".to_string(), Value::Null),
            ]),
        );
        per_language.insert(lang("tw"), LanguageFields::new());

        let bytes = encode(&per_language).expect("encode");
        let decoded = decode("i18n", Some(&Value::Bytes(bytes))).expect("decode");

        let en = &decoded[&lang("en")];
        assert_eq!(en.len(), 1);
        assert_eq!(en["title"], Value::from("Hello"));
        // The empty language map survives; emptiness vs absence is the caller's call.
        assert!(decoded.contains_key(&lang("tw")));
        assert!(decoded[&lang("tw")].is_empty());
    }

    #[test]
    fn absent_null_and_empty_decode_to_empty_mapping() {
        assert!(decode("i18n", None).expect("absent").is_empty());
        assert!(decode("i18n", Some(&Value::Null)).expect("null").is_empty());
        assert!(decode("i18n", Some(&Value::Bytes(Vec::new())))
            .expect("empty bytes")
            .is_empty());
    }

    #[test]
    fn canonical_empty_blob_round_trips() {
        let bytes = encode(&PerLanguage::new()).expect("encode empty");
        assert!(!bytes.is_empty());
        let decoded = decode("i18n", Some(&Value::Bytes(bytes))).expect("decode empty");
        assert!(decoded.is_empty());
    }

    #[test]
    fn garbage_bytes_are_a_corrupt_blob() {
        let err = decode("i18n", Some(&Value::Bytes(vec![0xc1, 0x00, 0x01])))
            .expect_err("garbage must fail");
        assert!(matches!(err, CodecError::CorruptBlob { column, .. } if column == "i18n"));
    }

    #[test]
    fn wrong_shape_is_a_corrupt_blob() {
        // A well-formed MsgPack string is still not a per-language map.
        let bytes = rmp_serde::to_vec_named("just a string").expect("encode");
        let err = decode("i18n", Some(&Value::Bytes(bytes))).expect_err("shape must fail");
        assert!(matches!(err, CodecError::CorruptBlob { .. }));
    }

    #[test]
    fn non_bytes_column_value_is_rejected() {
        let err =
            decode("i18n", Some(&Value::from("serialized?"))).expect_err("string must fail");
        assert!(matches!(
            err,
            CodecError::UnexpectedColumnType { found: "string", .. }
        ));
    }
}
