//! Conversion of a single property value to and from decoded documents.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{SerializeError, TypedDecodeError};
use crate::model::{AliasTable, Iri, Member, PropertyDescriptor, PropertyValue, TypedDeserializer, TypedValue};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes one raw element into a property value.
///
/// Classification is first-match, in this order:
/// 1. a string that parses as an absolute IRI becomes the IRI variant;
/// 2. a mapping accepted by `deserializer` becomes the typed variant;
/// 3. anything else is preserved verbatim as the unknown variant.
///
/// Only a [`TypedDecodeError::Malformed`] from the deserializer is
/// returned as an error; a shape mismatch falls through to step 3.
pub fn decode_value<T, D>(
    raw: &Value,
    descriptor: &Arc<PropertyDescriptor>,
    aliases: &AliasTable,
    deserializer: &D,
) -> Result<PropertyValue<T>, TypedDecodeError>
where
    T: TypedValue,
    D: TypedDeserializer<T> + ?Sized,
{
    let alias = aliases.alias_for(&descriptor.namespace).to_string();

    if let Value::String(s) = raw {
        // Strings that fail to parse are not errors, just not IRIs
        if let Ok(iri) = Iri::parse(s) {
            tracing::trace!(property = %descriptor.name, iri = %iri, "decoded IRI value");
            return Ok(PropertyValue::with_member(Arc::clone(descriptor), alias, Member::Iri(iri)));
        }
    }

    if let Value::Object(map) = raw {
        match deserializer.deserialize(map, aliases) {
            Ok(v) => {
                tracing::trace!(property = %descriptor.name, type_name = v.type_name(), "decoded typed value");
                return Ok(PropertyValue::with_member(Arc::clone(descriptor), alias, Member::Typed(v)));
            }
            Err(e) if e.is_shape_mismatch() => {
                tracing::debug!(property = %descriptor.name, error = %e, "mapping kept as unknown value");
            }
            Err(e) => return Err(e),
        }
    } else {
        tracing::debug!(property = %descriptor.name, "unrecognized value kept as unknown");
    }

    Ok(PropertyValue::with_member(Arc::clone(descriptor), alias, Member::Unknown(raw.clone())))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes one property value.
///
/// Typed values use their own serialization, IRIs their string form, and
/// unknown payloads are returned exactly as they were decoded. An unset
/// value encodes as `null`.
pub fn encode_value<T: TypedValue>(value: &PropertyValue<T>) -> Result<Value, SerializeError> {
    match value.member() {
        Member::Typed(v) => v.serialize(),
        Member::Iri(iri) => Ok(Value::String(iri.as_str().to_string())),
        Member::Unknown(raw) => Ok(raw.clone()),
        Member::Unset => Ok(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;
    use crate::vocab::security::{deserialize_public_key, public_key_descriptor, PublicKey};

    fn decode(raw: Value) -> Result<PropertyValue<PublicKey>, TypedDecodeError> {
        decode_value(&raw, &public_key_descriptor(), &AliasTable::new(), &deserialize_public_key)
    }

    #[test]
    fn test_absolute_string_is_iri() {
        let v = decode(json!("https://example.com/key1")).unwrap();
        assert!(v.is_iri());
        assert_eq!(v.get_iri().unwrap().to_string(), "https://example.com/key1");
        assert_eq!(v.alias(), "");
    }

    #[test]
    fn test_plain_string_is_unknown() {
        let v = decode(json!("just some text")).unwrap();
        assert!(v.is_unknown());
        assert_eq!(v.unknown(), Some(&json!("just some text")));

        let v = decode(json!("relative/path")).unwrap();
        assert!(v.is_unknown());
    }

    #[test]
    fn test_matching_mapping_is_typed() {
        let v = decode(json!({
            "id": "https://ex.com/k1",
            "type": "PublicKey",
            "owner": "https://ex.com/alice",
            "publicKeyPem": "-----BEGIN PUBLIC KEY-----"
        }))
        .unwrap();
        assert!(v.is_typed());
        assert_eq!(v.get().unwrap().owner().unwrap().as_str(), "https://ex.com/alice");
    }

    #[test]
    fn test_non_matching_mapping_is_unknown() {
        let raw = json!({"type": "Note", "content": "hi"});
        let v = decode(raw.clone()).unwrap();
        assert!(v.is_unknown());
        assert_eq!(encode_value(&v).unwrap(), raw);
    }

    #[test]
    fn test_malformed_mapping_propagates() {
        let err = decode(json!({"id": "not an iri", "type": "PublicKey"})).unwrap_err();
        assert!(!err.is_shape_mismatch());
    }

    #[test]
    fn test_primitives_are_unknown() {
        for raw in [json!(42), json!(true), json!(null), json!([1, 2]), json!(1.5)] {
            let v = decode(raw.clone()).unwrap();
            assert!(v.is_unknown(), "{raw} should be unknown");
            assert_eq!(encode_value(&v).unwrap(), raw);
        }
    }

    #[test]
    fn test_alias_taken_from_table() {
        let mut aliases = AliasTable::new();
        aliases.insert("https://w3id.org/security/v1", "sec");
        let v: PropertyValue<PublicKey> = decode_value(
            &json!("https://ex.com/k1"),
            &public_key_descriptor(),
            &aliases,
            &deserialize_public_key,
        )
        .unwrap();
        assert_eq!(v.alias(), "sec");
    }

    #[test]
    fn test_closure_deserializer() {
        let reject_all = |_: &Map<String, Value>, _: &AliasTable| -> Result<PublicKey, TypedDecodeError> {
            Err(TypedDecodeError::ShapeMismatch {
                expected: "PublicKey",
                reason: "never".to_string(),
            })
        };
        let v = decode_value(
            &json!({"id": "https://ex.com/k1", "type": "PublicKey"}),
            &public_key_descriptor(),
            &AliasTable::new(),
            &reject_all,
        )
        .unwrap();
        assert!(v.is_unknown());
    }

    #[test]
    fn test_unset_encodes_null() {
        let v: PropertyValue<PublicKey> = PropertyValue::new(public_key_descriptor());
        assert_eq!(encode_value(&v).unwrap(), Value::Null);
    }
}
