//! W3ID Security v1: the `publicKey` property and its `PublicKey` type.

use std::any::Any;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde_json::{Map, Value};

use crate::error::{SerializeError, TypedDecodeError};
use crate::model::{AliasTable, ContextMap, Iri, PropertyDescriptor, PropertyList, TypedValue, VocabType};

/// Namespace URI of the W3ID Security v1 vocabulary.
pub const SECURITY_V1: &str = "https://w3id.org/security/v1";

const TYPE_NAME: &str = "PublicKey";

lazy_static! {
    static ref PUBLIC_KEY_PROPERTY: Arc<PropertyDescriptor> =
        Arc::new(super::descriptor(SECURITY_V1, "publicKey"));
}

/// Descriptor of the non-functional `publicKey` property.
pub fn public_key_descriptor() -> Arc<PropertyDescriptor> {
    Arc::clone(&PUBLIC_KEY_PROPERTY)
}

/// The `publicKey` property.
pub type PublicKeyProperty = PropertyList<PublicKey>;

/// The actor a key belongs to, as written in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOwner {
    /// A reference to the actor.
    Iri(Iri),
    /// Anything else, usually the actor embedded inline. Kept verbatim;
    /// `id` is the embedded object's identifier when it has a valid one.
    Embedded { id: Option<Iri>, raw: Value },
}

impl KeyOwner {
    /// Returns the owning actor's identifier, if known.
    pub fn id(&self) -> Option<&Iri> {
        match self {
            KeyOwner::Iri(iri) => Some(iri),
            KeyOwner::Embedded { id, .. } => id.as_ref(),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            KeyOwner::Iri(iri) => Value::String(iri.to_string()),
            KeyOwner::Embedded { raw, .. } => raw.clone(),
        }
    }

    fn sort_key(&self) -> (u8, String) {
        match self {
            KeyOwner::Iri(iri) => (0, iri.as_str().to_string()),
            KeyOwner::Embedded { raw, .. } => (1, raw.to_string()),
        }
    }

    /// Classifies a decoded `owner` value. Never fails: an owner that is
    /// neither an IRI nor an object with an `id` is still preserved.
    fn from_value(raw: &Value) -> KeyOwner {
        if let Value::String(s) = raw {
            if let Ok(iri) = Iri::parse(s) {
                return KeyOwner::Iri(iri);
            }
        }
        let id = match raw {
            Value::Object(m) => m.get("id").and_then(Value::as_str).and_then(|s| Iri::parse(s).ok()),
            _ => None,
        };
        KeyOwner::Embedded { id, raw: raw.clone() }
    }
}

/// A public key used to verify an actor's signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    id: Iri,
    owner: Option<KeyOwner>,
    public_key_pem: Option<String>,
    alias: String,
}

impl PublicKey {
    /// Creates a key with only an identifier.
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            owner: None,
            public_key_pem: None,
            alias: super::default_alias(SECURITY_V1).unwrap_or("").to_string(),
        }
    }

    /// Sets the actor that owns this key.
    pub fn with_owner(mut self, owner: Iri) -> Self {
        self.owner = Some(KeyOwner::Iri(owner));
        self
    }

    /// Sets the PEM-encoded key material.
    pub fn with_pem(mut self, pem: impl Into<String>) -> Self {
        self.public_key_pem = Some(pem.into());
        self
    }

    pub fn id(&self) -> &Iri {
        &self.id
    }

    /// Identifier of the owning actor, whether referenced or embedded.
    pub fn owner(&self) -> Option<&Iri> {
        self.owner.as_ref().and_then(KeyOwner::id)
    }

    /// The owner exactly as decoded.
    pub fn key_owner(&self) -> Option<&KeyOwner> {
        self.owner.as_ref()
    }

    pub fn public_key_pem(&self) -> Option<&str> {
        self.public_key_pem.as_deref()
    }

    fn key(&self, name: &str) -> String {
        if self.alias.is_empty() {
            name.to_string()
        } else {
            format!("{}:{name}", self.alias)
        }
    }
}

impl VocabType for PublicKey {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn serialize(&self) -> Result<Value, SerializeError> {
        let mut m = Map::new();
        m.insert("id".to_string(), Value::String(self.id.to_string()));
        m.insert("type".to_string(), Value::String(TYPE_NAME.to_string()));
        if let Some(owner) = &self.owner {
            m.insert(self.key("owner"), owner.to_value());
        }
        if let Some(pem) = &self.public_key_pem {
            m.insert(self.key("publicKeyPem"), Value::String(pem.clone()));
        }
        Ok(Value::Object(m))
    }

    fn json_ld_context(&self) -> ContextMap {
        let mut ctx = ContextMap::new();
        ctx.insert(SECURITY_V1.to_string(), self.alias.clone());
        ctx
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl TypedValue for PublicKey {
    fn less_than(&self, other: &Self) -> bool {
        let lhs = (self.id.as_str(), self.owner.as_ref().map(KeyOwner::sort_key), self.public_key_pem.as_deref());
        let rhs = (other.id.as_str(), other.owner.as_ref().map(KeyOwner::sort_key), other.public_key_pem.as_deref());
        lhs < rhs
    }
}

fn has_type(value: &Value, aliased: &str) -> bool {
    match value {
        Value::String(s) => s == TYPE_NAME || s == aliased,
        Value::Array(items) => items.iter().any(|v| has_type(v, aliased)),
        _ => false,
    }
}

fn malformed(reason: impl Into<String>) -> TypedDecodeError {
    TypedDecodeError::Malformed {
        type_name: TYPE_NAME,
        reason: reason.into(),
    }
}

fn required_iri(map: &Map<String, Value>, key: &str) -> Result<Iri, TypedDecodeError> {
    match map.get(key) {
        None => Err(malformed(format!("missing {key}"))),
        Some(Value::String(s)) => Iri::parse(s).map_err(|e| malformed(format!("{key}: {e}"))),
        Some(_) => Err(malformed(format!("{key} is not a string"))),
    }
}

/// Deserializes a `PublicKey` from a decoded mapping.
///
/// Mappings whose `type` does not name `PublicKey` are a shape mismatch;
/// a `PublicKey` with a missing or invalid `id`, or a non-string
/// `publicKeyPem`, is malformed. `owner` may be an IRI or an embedded
/// actor and is preserved either way.
pub fn deserialize_public_key(
    map: &Map<String, Value>,
    aliases: &AliasTable,
) -> Result<PublicKey, TypedDecodeError> {
    let alias = aliases.alias_for(SECURITY_V1).to_string();
    let prefixed = |name: &str| {
        if alias.is_empty() {
            name.to_string()
        } else {
            format!("{alias}:{name}")
        }
    };

    let is_key = map.get("type").is_some_and(|t| has_type(t, &prefixed(TYPE_NAME)));
    if !is_key {
        return Err(TypedDecodeError::ShapeMismatch {
            expected: TYPE_NAME,
            reason: "type does not name PublicKey".to_string(),
        });
    }

    let id = required_iri(map, "id")?;
    let owner = map.get(&prefixed("owner")).map(KeyOwner::from_value);
    let public_key_pem = match map.get(&prefixed("publicKeyPem")) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(malformed("publicKeyPem is not a string")),
    };

    Ok(PublicKey {
        id,
        owner,
        public_key_pem,
        alias,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_deserialize_full_key() {
        let key = deserialize_public_key(
            &map(json!({
                "id": "https://ex.com/users/alice#main-key",
                "type": "PublicKey",
                "owner": "https://ex.com/users/alice",
                "publicKeyPem": "-----BEGIN PUBLIC KEY-----\nMIIB"
            })),
            &AliasTable::new(),
        )
        .unwrap();
        assert_eq!(key.id().as_str(), "https://ex.com/users/alice#main-key");
        assert_eq!(key.owner().unwrap().as_str(), "https://ex.com/users/alice");
        assert!(key.public_key_pem().unwrap().starts_with("-----BEGIN"));
    }

    #[test]
    fn test_deserialize_aliased_fields() {
        let mut aliases = AliasTable::new();
        aliases.insert(SECURITY_V1, "sec");
        let key = deserialize_public_key(
            &map(json!({
                "id": "https://ex.com/k1",
                "type": ["sec:PublicKey"],
                "sec:owner": "https://ex.com/alice"
            })),
            &aliases,
        )
        .unwrap();
        assert_eq!(key.owner().unwrap().as_str(), "https://ex.com/alice");
        assert_eq!(key.serialize().unwrap()["sec:owner"], json!("https://ex.com/alice"));
    }

    #[test]
    fn test_shape_mismatch() {
        let err = deserialize_public_key(&map(json!({"id": "https://ex.com/n", "type": "Note"})), &AliasTable::new())
            .unwrap_err();
        assert!(err.is_shape_mismatch());
        let err = deserialize_public_key(&map(json!({"id": "https://ex.com/n"})), &AliasTable::new()).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn test_malformed() {
        for fixture in [
            json!({"type": "PublicKey"}),
            json!({"type": "PublicKey", "id": "not an iri"}),
            json!({"type": "PublicKey", "id": "https://ex.com/k", "publicKeyPem": false}),
        ] {
            let err = deserialize_public_key(&map(fixture), &AliasTable::new()).unwrap_err();
            assert!(!err.is_shape_mismatch());
        }
    }

    #[test]
    fn test_embedded_owner_is_preserved() {
        let owner = json!({"id": "https://ex.com/alice", "type": "Person"});
        let key = deserialize_public_key(
            &map(json!({"id": "https://ex.com/k1", "type": "PublicKey", "owner": owner.clone()})),
            &AliasTable::new(),
        )
        .unwrap();
        assert_eq!(key.owner().unwrap().as_str(), "https://ex.com/alice");
        assert!(matches!(key.key_owner(), Some(KeyOwner::Embedded { .. })));
        assert_eq!(key.serialize().unwrap()["owner"], owner);
    }

    #[test]
    fn test_unusual_owner_is_kept_not_rejected() {
        for owner in [json!(1), json!("not an iri"), json!({"type": "Person"})] {
            let key = deserialize_public_key(
                &map(json!({"id": "https://ex.com/k1", "type": "PublicKey", "owner": owner.clone()})),
                &AliasTable::new(),
            )
            .unwrap();
            assert!(key.owner().is_none());
            assert_eq!(key.serialize().unwrap()["owner"], owner);
        }
    }

    #[test]
    fn test_serialize_roundtrip() {
        let key = PublicKey::new(Iri::parse("https://ex.com/k1").unwrap())
            .with_owner(Iri::parse("https://ex.com/alice").unwrap())
            .with_pem("PEM");
        let mut aliases = AliasTable::new();
        aliases.insert(SECURITY_V1, "widsv");
        let Value::Object(m) = key.serialize().unwrap() else {
            panic!("expected object");
        };
        assert_eq!(deserialize_public_key(&m, &aliases).unwrap(), key);
    }

    #[test]
    fn test_less_than_by_id() {
        let a = PublicKey::new(Iri::parse("https://ex.com/a").unwrap());
        let b = PublicKey::new(Iri::parse("https://ex.com/b").unwrap());
        assert!(a.less_than(&b));
        assert!(!b.less_than(&a));
        assert!(!a.less_than(&a));
    }

    #[test]
    fn test_less_than_orders_referenced_before_embedded_owner() {
        let aliases = AliasTable::new();
        let referenced = deserialize_public_key(
            &map(json!({"id": "https://ex.com/k", "type": "PublicKey", "owner": "https://ex.com/alice"})),
            &aliases,
        )
        .unwrap();
        let embedded = deserialize_public_key(
            &map(json!({"id": "https://ex.com/k", "type": "PublicKey", "owner": {"id": "https://ex.com/alice"}})),
            &aliases,
        )
        .unwrap();
        assert!(referenced.less_than(&embedded));
        assert!(!embedded.less_than(&referenced));
    }

    #[test]
    fn test_descriptor() {
        let d = public_key_descriptor();
        assert_eq!(d.namespace, SECURITY_V1);
        assert_eq!(d.name, "publicKey");
        assert_eq!(d.default_alias, "widsv");
    }
}
