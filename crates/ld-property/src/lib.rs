//! Polymorphic, order-preserving property values for JSON-LD vocabularies.
//!
//! A non-functional property in an ActivityStreams-style document holds zero
//! or more values, and each value can be a typed object from a known
//! vocabulary, a bare IRI, or something this crate does not recognize. This
//! crate models one such value as a [`PropertyValue`] and the whole property
//! as a [`PropertyList`], and converts both to and from decoded JSON.
//!
//! # Quick Start
//!
//! ```rust
//! use ld_property::codec::{decode_property, encode_property};
//! use ld_property::vocab::security::{deserialize_public_key, public_key_descriptor};
//! use ld_property::{AliasTable, Iri};
//! use serde_json::{json, Value};
//!
//! let Value::Object(doc) = json!({
//!     "publicKey": [
//!         {"id": "https://ex.com/alice#main-key", "type": "PublicKey"},
//!         "https://ex.com/alice#other-key"
//!     ]
//! }) else { unreachable!() };
//!
//! let mut list = decode_property(&doc, public_key_descriptor(), &AliasTable::new(), &deserialize_public_key)
//!     .unwrap()
//!     .unwrap();
//! assert!(list.at(0).is_typed());
//! assert!(list.at(1).is_iri());
//!
//! list.append_iri(Iri::parse("https://ex.com/alice#third-key").unwrap());
//! let encoded = encode_property(&list).unwrap();
//! assert_eq!(encoded.as_array().unwrap().len(), 3);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Values, lists, IRIs, descriptors and the typed-value traits
//! - [`codec`]: Decoding from and encoding to `serde_json` trees
//! - [`canonical`]: Canonical ordering and SHA-256 digests
//! - [`validate`]: Structural checks of list bookkeeping
//! - [`vocab`]: Well-known namespaces and the `publicKey` property
//! - [`error`]: Error types
//! - [`limits`]: Decoding limits
//!
//! # Untrusted input
//!
//! Decoding never fails because a value has an unexpected shape; such values
//! are preserved verbatim and re-emitted on encode. Only a value that claims
//! a known type but is malformed, or a property with more values than
//! [`limits::MAX_PROPERTY_VALUES`], is rejected.

pub mod canonical;
pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod validate;
pub mod vocab;

// Re-export commonly used types at crate root
pub use canonical::{canonical_bytes, canonical_digest};
pub use codec::{decode_property, decode_property_with_options, encode_property, DecodeOptions};
pub use error::{DecodeError, PropertyError, SerializeError, TypedDecodeError, ValidationError};
pub use model::{
    merge_context, AliasTable, ContextMap, Iri, IriParseError, ListId, Member, PropertyDescriptor,
    PropertyList, PropertyListBuilder, PropertyValue, TypedDeserializer, TypedValue, VocabType,
};
pub use validate::validate_list;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
