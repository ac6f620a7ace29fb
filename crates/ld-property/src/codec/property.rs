//! Conversion of a whole non-functional property to and from a document
//! fragment.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::codec::value::{decode_value, encode_value};
use crate::error::{DecodeError, SerializeError};
use crate::limits::MAX_PROPERTY_VALUES;
use crate::model::{AliasTable, PropertyDescriptor, PropertyList, TypedDeserializer, TypedValue};

/// Options for decoding properties.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Maximum number of values accepted for one property.
    pub max_values: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_values: MAX_PROPERTY_VALUES,
        }
    }
}

impl DecodeOptions {
    /// Creates options with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of values per property.
    pub fn with_max_values(mut self, max_values: usize) -> Self {
        self.max_values = max_values;
        self
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a property from a document fragment with default options.
///
/// See [`decode_property_with_options`].
pub fn decode_property<T, D>(
    fragment: &Map<String, Value>,
    descriptor: Arc<PropertyDescriptor>,
    aliases: &AliasTable,
    deserializer: &D,
) -> Result<Option<PropertyList<T>>, DecodeError>
where
    T: TypedValue,
    D: TypedDeserializer<T> + ?Sized,
{
    decode_property_with_options(fragment, descriptor, aliases, deserializer, &DecodeOptions::default())
}

/// Decodes a property from a document fragment.
///
/// The property is looked up under its possibly-aliased key
/// (`"<alias>:<name>"` when its namespace is aliased in `aliases`). Returns
/// `Ok(None)` when the key is absent, which is distinct from a present key
/// holding an empty array. An array is decoded element by element in order;
/// any other value is decoded as a single element.
///
/// Elements that are not recognized are kept as unknown values; only a
/// malformed typed value aborts decoding.
pub fn decode_property_with_options<T, D>(
    fragment: &Map<String, Value>,
    descriptor: Arc<PropertyDescriptor>,
    aliases: &AliasTable,
    deserializer: &D,
    options: &DecodeOptions,
) -> Result<Option<PropertyList<T>>, DecodeError>
where
    T: TypedValue,
    D: TypedDeserializer<T> + ?Sized,
{
    let alias = aliases.alias_for(&descriptor.namespace);
    let key = descriptor.key_for_alias(alias);
    let Some(raw) = fragment.get(&key) else {
        return Ok(None);
    };

    let mut list = PropertyList::with_alias(Arc::clone(&descriptor), alias);
    let elements = match raw {
        Value::Array(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };
    if elements.len() > options.max_values {
        return Err(DecodeError::TooManyValues {
            property: key,
            len: elements.len(),
            max: options.max_values,
        });
    }

    for element in elements {
        let entry = decode_value(element, &descriptor, aliases, deserializer).map_err(|source| {
            tracing::warn!(property = %key, error = %source, "aborting property decode");
            DecodeError::Typed {
                property: key.clone(),
                source,
            }
        })?;
        list.push_entry(entry);
    }

    tracing::trace!(property = %key, len = list.len(), "decoded property");
    Ok(Some(list))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a property.
///
/// Values are encoded in order into an array, except that a single value
/// is returned bare: a one-element property and a singular value are
/// written identically.
pub fn encode_property<T: TypedValue>(list: &PropertyList<T>) -> Result<Value, SerializeError> {
    let mut values = Vec::with_capacity(list.len());
    for entry in list {
        values.push(encode_value(entry)?);
    }
    if values.len() == 1 {
        return Ok(values.swap_remove(0));
    }
    Ok(Value::Array(values))
}

/// Encodes a property into a document fragment under the key matching the
/// list's alias.
pub fn encode_property_into<T: TypedValue>(
    list: &PropertyList<T>,
    fragment: &mut Map<String, Value>,
) -> Result<(), SerializeError> {
    let key = list.descriptor().key_for_alias(list.alias());
    fragment.insert(key, encode_property(list)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::vocab::security::{deserialize_public_key, public_key_descriptor, PublicKey, SECURITY_V1};

    fn fragment(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("fixture must be an object"),
        }
    }

    fn decode(doc: Value) -> Result<Option<PropertyList<PublicKey>>, DecodeError> {
        decode_property(&fragment(doc), public_key_descriptor(), &AliasTable::new(), &deserialize_public_key)
    }

    #[test]
    fn test_single_iri_roundtrip_collapses() {
        let list = decode(json!({"publicKey": "https://example.com/key1"})).unwrap().unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.at(0).is_iri());
        assert_eq!(list.at(0).get_iri().unwrap().to_string(), "https://example.com/key1");

        assert_eq!(encode_property(&list).unwrap(), json!("https://example.com/key1"));
    }

    #[test]
    fn test_single_element_array_collapses() {
        let list = decode(json!({"publicKey": ["https://example.com/key1"]})).unwrap().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(encode_property(&list).unwrap(), json!("https://example.com/key1"));
    }

    #[test]
    fn test_mixed_array() {
        let doc = json!({"publicKey": [
            {"id": "https://ex.com/k1", "type": "PublicKey", "owner": "https://ex.com/alice"},
            "https://ex.com/k2"
        ]});
        let mut list = decode(doc).unwrap().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.at(0).is_typed());
        assert!(list.at(1).is_iri());
        assert!(!list.less_than(&list));

        list.swap(0, 1);
        let out = encode_property(&list).unwrap();
        assert_eq!(out[0], json!("https://ex.com/k2"));
        assert_eq!(out[1]["id"], json!("https://ex.com/k1"));
        assert_eq!(list.at(0).position(), 0);
        assert_eq!(list.at(1).position(), 1);
    }

    #[test]
    fn test_absent_vs_empty() {
        assert!(decode(json!({"other": 1})).unwrap().is_none());

        let empty = decode(json!({"publicKey": []})).unwrap().unwrap();
        assert!(empty.is_empty());
        assert_eq!(encode_property(&empty).unwrap(), json!([]));
    }

    #[test]
    fn test_aliased_key() {
        let mut aliases = AliasTable::new();
        aliases.insert(SECURITY_V1, "sec");
        let doc = fragment(json!({
            "publicKey": "https://ex.com/ignored",
            "sec:publicKey": "https://ex.com/k1"
        }));
        let list: PropertyList<PublicKey> =
            decode_property(&doc, public_key_descriptor(), &aliases, &deserialize_public_key)
                .unwrap()
                .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.alias(), "sec");
        assert_eq!(list.property_key(&aliases), "sec:publicKey");

        let mut out = Map::new();
        encode_property_into(&list, &mut out).unwrap();
        assert_eq!(out.get("sec:publicKey"), Some(&json!("https://ex.com/k1")));
    }

    #[test]
    fn test_unknown_elements_do_not_abort() {
        let list = decode(json!({"publicKey": [
            "not an iri",
            42,
            {"type": "Note"},
            "https://ex.com/k1"
        ]}))
        .unwrap()
        .unwrap();
        assert_eq!(list.len(), 4);
        assert!(list.at(0).is_unknown());
        assert!(list.at(1).is_unknown());
        assert!(list.at(2).is_unknown());
        assert!(list.at(3).is_iri());
    }

    #[test]
    fn test_malformed_typed_value_aborts() {
        let result = decode(json!({"publicKey": [
            "https://ex.com/k1",
            {"id": "https://ex.com/k2", "type": "PublicKey", "publicKeyPem": ["not", "a", "string"]}
        ]}));
        assert!(matches!(result, Err(DecodeError::Typed { ref property, .. }) if property == "publicKey"));
    }

    #[test]
    fn test_embedded_owner_does_not_abort() {
        let list = decode(json!({"publicKey": [
            "https://ex.com/k0",
            {"id": "https://ex.com/k1", "type": "PublicKey", "owner": {"id": "https://ex.com/alice", "type": "Person"}}
        ]}))
        .unwrap()
        .unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.at(1).is_typed());
        assert_eq!(list.at(1).get().unwrap().owner().unwrap().as_str(), "https://ex.com/alice");
    }

    #[test]
    fn test_too_many_values() {
        let doc = fragment(json!({"publicKey": ["https://ex.com/1", "https://ex.com/2", "https://ex.com/3"]}));
        let options = DecodeOptions::new().with_max_values(2);
        let result: Result<Option<PropertyList<PublicKey>>, _> = decode_property_with_options(
            &doc,
            public_key_descriptor(),
            &AliasTable::new(),
            &deserialize_public_key,
            &options,
        );
        assert_eq!(
            result.unwrap_err(),
            DecodeError::TooManyValues {
                property: "publicKey".to_string(),
                len: 3,
                max: 2
            }
        );
    }

    #[test]
    fn test_roundtrip_is_stable() {
        let doc = json!({"publicKey": [
            {"id": "https://ex.com/k1", "type": "PublicKey", "owner": "https://ex.com/alice", "publicKeyPem": "PEM"},
            "https://ex.com/k2",
            "free text",
            {"type": "Unrecognized", "x": [1, 2, 3]}
        ]});
        let first = decode(doc).unwrap().unwrap();
        let mut out = Map::new();
        encode_property_into(&first, &mut out).unwrap();
        let second = decode(Value::Object(out)).unwrap().unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.kind_index(), b.kind_index());
            assert_eq!(a, b);
        }
    }
}
