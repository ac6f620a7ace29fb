//! A single occurrence of a property.
//!
//! Each value is exactly one of: a typed vocabulary object, an IRI
//! reference, or an unknown payload preserved verbatim from the document.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::error::{PropertyError, SerializeError};
use crate::model::typed::narrow;
use crate::model::{merge_context, ContextMap, Iri, PropertyDescriptor, PropertyList, TypedValue, VocabType};

/// Kind index of the typed variant.
pub const KIND_TYPED: i32 = 0;
/// Kind index of the IRI variant.
pub const KIND_IRI: i32 = -2;
/// Kind index of the unknown (or unset) variant.
pub const KIND_UNKNOWN: i32 = -1;

/// Identity of a [`PropertyList`], used by entries to find their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(Uuid);

impl ListId {
    pub(crate) fn new() -> Self {
        ListId(Uuid::new_v4())
    }
}

/// The content of a property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Member<T> {
    /// Freshly constructed, nothing assigned yet.
    Unset,
    /// A recognized vocabulary object.
    Typed(T),
    /// A bare reference.
    Iri(Iri),
    /// A payload this vocabulary does not recognize, kept for round-tripping.
    Unknown(Value),
}

/// One value of a property, as stored in a [`PropertyList`].
///
/// The `position`/owner pair is a relation, not a link: neighbors are
/// looked up through the owning list on demand, and an entry removed from
/// its list has no owner and therefore no neighbors.
#[derive(Debug)]
pub struct PropertyValue<T> {
    member: Member<T>,
    alias: String,
    descriptor: Arc<PropertyDescriptor>,
    position: usize,
    owner: Option<ListId>,
}

impl<T: TypedValue> PropertyValue<T> {
    /// Creates an unset value using the descriptor's default alias.
    pub fn new(descriptor: Arc<PropertyDescriptor>) -> Self {
        let alias = descriptor.default_alias.to_string();
        Self::with_member(descriptor, alias, Member::Unset)
    }

    pub(crate) fn with_member(
        descriptor: Arc<PropertyDescriptor>,
        alias: String,
        member: Member<T>,
    ) -> Self {
        Self {
            member,
            alias,
            descriptor,
            position: 0,
            owner: None,
        }
    }

    /// Returns the active variant.
    pub fn member(&self) -> &Member<T> {
        &self.member
    }

    /// Returns the typed value, if that is the active variant.
    pub fn get(&self) -> Option<&T> {
        match &self.member {
            Member::Typed(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the IRI, if that is the active variant.
    pub fn get_iri(&self) -> Option<&Iri> {
        match &self.member {
            Member::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns the preserved payload, if that is the active variant.
    pub fn unknown(&self) -> Option<&Value> {
        match &self.member {
            Member::Unknown(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the typed value as a type-erased vocabulary object.
    pub fn get_type(&self) -> Option<&dyn VocabType> {
        self.get().map(|v| v as &dyn VocabType)
    }

    /// Returns true if the typed value is the active variant.
    pub fn is_typed(&self) -> bool {
        matches!(self.member, Member::Typed(_))
    }

    /// Returns true if the IRI is the active variant.
    pub fn is_iri(&self) -> bool {
        matches!(self.member, Member::Iri(_))
    }

    /// Returns true if an unrecognized payload is held.
    pub fn is_unknown(&self) -> bool {
        matches!(self.member, Member::Unknown(_))
    }

    /// Returns true if the typed value or the IRI is set.
    pub fn has_any(&self) -> bool {
        self.is_typed() || self.is_iri()
    }

    /// Returns a small integer identifying the active variant.
    ///
    /// The values ([`KIND_TYPED`], [`KIND_IRI`], [`KIND_UNKNOWN`]) are stable
    /// across implementations and are the primary key of canonical ordering.
    pub fn kind_index(&self) -> i32 {
        match self.member {
            Member::Typed(_) => KIND_TYPED,
            Member::Iri(_) => KIND_IRI,
            Member::Unknown(_) | Member::Unset => KIND_UNKNOWN,
        }
    }

    /// Arbitrary but stable ordering between two values.
    ///
    /// IRIs sort first (lexicographically among themselves), then unknown
    /// values (all equal), then typed values (by their own ordering).
    pub fn less_than(&self, other: &PropertyValue<T>) -> bool {
        match (&self.member, &other.member) {
            (Member::Iri(a), Member::Iri(b)) => a.as_str() < b.as_str(),
            (Member::Iri(_), _) => true,
            (_, Member::Iri(_)) => false,
            (Member::Typed(a), Member::Typed(b)) => a.less_than(b),
            (Member::Typed(_), _) => false,
            (_, Member::Typed(_)) => true,
            _ => false,
        }
    }

    /// Sets the typed value, clearing any IRI or unknown payload.
    pub fn set(&mut self, v: T) {
        self.member = Member::Typed(v);
    }

    /// Sets the IRI, clearing any typed value or unknown payload.
    pub fn set_iri(&mut self, iri: Iri) {
        self.member = Member::Iri(iri);
    }

    pub(crate) fn set_unknown(&mut self, v: Value) {
        self.member = Member::Unknown(v);
    }

    /// Sets the typed value from an arbitrary vocabulary object.
    ///
    /// Fails with [`PropertyError::TypeMismatch`] if the object is not the
    /// type this property accepts; the current value is left untouched.
    pub fn set_type(&mut self, obj: Box<dyn VocabType>) -> Result<(), PropertyError> {
        let v = narrow::<T>(obj).map_err(|found| {
            tracing::debug!(property = %self.descriptor.name, %found, "rejected typed value");
            PropertyError::TypeMismatch {
                property: self.descriptor.name.to_string(),
                found,
            }
        })?;
        self.set(v);
        Ok(())
    }

    /// JSON-LD context entries needed by this value.
    pub fn json_ld_context(&self) -> ContextMap {
        let mut ctx = ContextMap::new();
        ctx.insert(self.descriptor.namespace.to_string(), self.alias.clone());
        if let Member::Typed(v) = &self.member {
            merge_context(&mut ctx, v.json_ld_context());
        }
        ctx
    }

    /// Converts this value into a decoded value for re-encoding.
    pub fn serialize(&self) -> Result<Value, SerializeError> {
        crate::codec::encode_value(self)
    }

    /// Returns the following entry in `list`, if this entry belongs to it.
    pub fn next<'a>(&self, list: &'a PropertyList<T>) -> Option<&'a PropertyValue<T>> {
        if self.owner != Some(list.id()) {
            return None;
        }
        list.get(self.position + 1)
    }

    /// Returns the preceding entry in `list`, if this entry belongs to it.
    pub fn prev<'a>(&self, list: &'a PropertyList<T>) -> Option<&'a PropertyValue<T>> {
        if self.owner != Some(list.id()) {
            return None;
        }
        self.position.checked_sub(1).and_then(|idx| list.get(idx))
    }

    /// Returns the type name of the typed value, or the property name
    /// when no typed value is set.
    pub fn name(&self) -> &str {
        match &self.member {
            Member::Typed(v) => v.type_name(),
            _ => self.descriptor.name.as_ref(),
        }
    }

    /// Alias under which the property's namespace is imported.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Index of this entry in its owning list.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Identity of the owning list, or `None` if detached.
    pub fn owner(&self) -> Option<ListId> {
        self.owner
    }

    /// Metadata of the property this value belongs to.
    pub fn descriptor(&self) -> &Arc<PropertyDescriptor> {
        &self.descriptor
    }

    pub(crate) fn attach(&mut self, owner: ListId, position: usize) {
        self.owner = Some(owner);
        self.position = position;
    }

    pub(crate) fn detach(&mut self) {
        self.owner = None;
    }
}

/// Clones the content only; the clone is not attached to any list.
impl<T: Clone> Clone for PropertyValue<T> {
    fn clone(&self) -> Self {
        Self {
            member: self.member.clone(),
            alias: self.alias.clone(),
            descriptor: Arc::clone(&self.descriptor),
            position: self.position,
            owner: None,
        }
    }
}

/// Two values are equal when they hold the same content under the same alias.
impl<T: PartialEq> PartialEq for PropertyValue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.member == other.member && self.alias == other.alias
    }
}
