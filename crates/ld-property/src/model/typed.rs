//! Capability traits for vocabulary objects carried by a property.

use std::any::Any;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::{SerializeError, TypedDecodeError};
use crate::model::{AliasTable, ContextMap};

/// Any object defined by a vocabulary (an ActivityStreams `Note`, a
/// security `PublicKey`, ...).
///
/// This is the type-erased view used when a caller holds "some vocabulary
/// object" and asks a property to accept it; see
/// [`PropertyValue::set_type`](crate::model::PropertyValue::set_type).
pub trait VocabType: fmt::Debug + 'static {
    /// Vocabulary name of the object's type, e.g. `"PublicKey"`.
    fn type_name(&self) -> &str;

    /// Converts the object into a decoded value suitable for re-encoding.
    fn serialize(&self) -> Result<Value, SerializeError>;

    /// JSON-LD context entries the object needs.
    fn json_ld_context(&self) -> ContextMap;

    /// Upcast for checked downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Owned upcast for checked downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// A vocabulary object that a specific property accepts as its typed value.
pub trait TypedValue: VocabType + Sized {
    /// Arbitrary but stable ordering between two values of this type.
    ///
    /// Must be a strict weak ordering.
    fn less_than(&self, other: &Self) -> bool;
}

/// Per-vocabulary deserializer for a property's typed value.
///
/// Implementations return [`TypedDecodeError::ShapeMismatch`] when the
/// mapping is simply not an instance of their type, and
/// [`TypedDecodeError::Malformed`] when it is but cannot be decoded.
/// Plain functions and closures with the matching signature implement
/// this trait.
pub trait TypedDeserializer<T> {
    fn deserialize(
        &self,
        map: &Map<String, Value>,
        aliases: &AliasTable,
    ) -> Result<T, TypedDecodeError>;
}

impl<T, F> TypedDeserializer<T> for F
where
    F: Fn(&Map<String, Value>, &AliasTable) -> Result<T, TypedDecodeError>,
{
    fn deserialize(
        &self,
        map: &Map<String, Value>,
        aliases: &AliasTable,
    ) -> Result<T, TypedDecodeError> {
        self(map, aliases)
    }
}

/// Narrows a type-erased vocabulary object to `T`.
///
/// On mismatch returns the observed type name for diagnostics.
pub(crate) fn narrow<T: TypedValue>(obj: Box<dyn VocabType>) -> Result<T, String> {
    let found = obj.type_name().to_string();
    obj.into_any().downcast::<T>().map(|v| *v).map_err(|_| found)
}
