//! Data model types for vocabulary properties.
//!
//! This module contains the in-memory representation of a property:
//! - IRIs (by-reference values)
//! - Descriptors and alias tables (per-property and per-document metadata)
//! - Capability traits for typed vocabulary objects
//! - Values (one occurrence) and lists (the whole non-functional property)
//! - Builders (ergonomic construction)

pub mod builder;
pub mod descriptor;
pub mod iri;
pub mod list;
pub mod typed;
pub mod value;

pub use builder::PropertyListBuilder;
pub use descriptor::{merge_context, AliasTable, ContextMap, PropertyDescriptor};
pub use iri::{Iri, IriParseError};
pub use list::PropertyList;
pub use typed::{TypedDeserializer, TypedValue, VocabType};
pub use value::{ListId, Member, PropertyValue, KIND_IRI, KIND_TYPED, KIND_UNKNOWN};
