//! Ordered, multi-valued (non-functional) property.

use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{PropertyError, SerializeError};
use crate::model::typed::narrow;
use crate::model::value::{ListId, Member, KIND_IRI, KIND_TYPED};
use crate::model::{merge_context, AliasTable, ContextMap, Iri, PropertyDescriptor, PropertyValue, TypedValue, VocabType};

/// A non-functional property: zero or more values in document order.
///
/// Every entry records its own index and the identity of this list; all
/// mutators keep that bookkeeping exact, so [`PropertyValue::next`] and
/// [`PropertyValue::prev`] always agree with the storage order. Index
/// arguments out of range panic, like slice indexing; use [`Self::get`]
/// or check [`Self::len`] first.
#[derive(Debug)]
pub struct PropertyList<T> {
    id: ListId,
    descriptor: Arc<PropertyDescriptor>,
    alias: String,
    entries: Vec<PropertyValue<T>>,
}

impl<T: TypedValue> PropertyList<T> {
    /// Creates an empty property using the descriptor's default alias.
    pub fn new(descriptor: Arc<PropertyDescriptor>) -> Self {
        let alias = descriptor.default_alias.to_string();
        Self::with_alias(descriptor, alias)
    }

    /// Creates an empty property whose new entries use `alias`.
    pub fn with_alias(descriptor: Arc<PropertyDescriptor>, alias: impl Into<String>) -> Self {
        Self {
            id: ListId::new(),
            descriptor,
            alias: alias.into(),
            entries: Vec::new(),
        }
    }

    /// Identity that entries use to find this list.
    pub fn id(&self) -> ListId {
        self.id
    }

    /// Metadata of this property.
    pub fn descriptor(&self) -> &Arc<PropertyDescriptor> {
        &self.descriptor
    }

    /// Alias applied to newly constructed entries.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns the unaliased property name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Returns the document key this property is read from and written to.
    pub fn property_key(&self, aliases: &AliasTable) -> String {
        self.descriptor.key_for_alias(aliases.alias_for(&self.descriptor.namespace))
    }

    fn entry(&self, member: Member<T>) -> PropertyValue<T> {
        PropertyValue::with_member(Arc::clone(&self.descriptor), self.alias.clone(), member)
    }

    fn typed_entry(&self, obj: Box<dyn VocabType>) -> Result<PropertyValue<T>, PropertyError> {
        match narrow::<T>(obj) {
            Ok(v) => Ok(self.entry(Member::Typed(v))),
            Err(found) => {
                tracing::debug!(property = %self.descriptor.name, %found, "rejected typed value");
                Err(PropertyError::TypeMismatch {
                    property: self.descriptor.name.to_string(),
                    found,
                })
            }
        }
    }

    /// Re-derives position and owner for every entry from `from` onward.
    fn renumber_from(&mut self, from: usize) {
        let id = self.id;
        for (idx, entry) in self.entries.iter_mut().enumerate().skip(from) {
            entry.attach(id, idx);
        }
    }

    pub(crate) fn push_entry(&mut self, mut entry: PropertyValue<T>) {
        entry.attach(self.id, self.entries.len());
        self.entries.push(entry);
    }

    fn insert_entry(&mut self, idx: usize, entry: PropertyValue<T>) {
        self.entries.insert(idx, entry);
        self.renumber_from(idx);
    }

    fn replace_entry(&mut self, idx: usize, mut entry: PropertyValue<T>) -> PropertyValue<T> {
        entry.attach(self.id, idx);
        let mut old = std::mem::replace(&mut self.entries[idx], entry);
        old.detach();
        old
    }

    // =========================================================================
    // Append / prepend / insert
    // =========================================================================

    /// Appends a typed value.
    pub fn append(&mut self, v: T) {
        let entry = self.entry(Member::Typed(v));
        self.push_entry(entry);
    }

    /// Appends an IRI value.
    pub fn append_iri(&mut self, iri: Iri) {
        let entry = self.entry(Member::Iri(iri));
        self.push_entry(entry);
    }

    /// Appends an arbitrary vocabulary object, if this property accepts it.
    pub fn append_type(&mut self, obj: Box<dyn VocabType>) -> Result<(), PropertyError> {
        let entry = self.typed_entry(obj)?;
        self.push_entry(entry);
        Ok(())
    }

    /// Prepends a typed value.
    pub fn prepend(&mut self, v: T) {
        self.insert(0, v);
    }

    /// Prepends an IRI value.
    pub fn prepend_iri(&mut self, iri: Iri) {
        self.insert_iri(0, iri);
    }

    /// Prepends an arbitrary vocabulary object, if this property accepts it.
    pub fn prepend_type(&mut self, obj: Box<dyn VocabType>) -> Result<(), PropertyError> {
        self.insert_type(0, obj)
    }

    /// Inserts a typed value at `idx`, shifting later entries back.
    ///
    /// # Panics
    ///
    /// Panics if `idx > len`.
    pub fn insert(&mut self, idx: usize, v: T) {
        let entry = self.entry(Member::Typed(v));
        self.insert_entry(idx, entry);
    }

    /// Inserts an IRI value at `idx`, shifting later entries back.
    ///
    /// # Panics
    ///
    /// Panics if `idx > len`.
    pub fn insert_iri(&mut self, idx: usize, iri: Iri) {
        let entry = self.entry(Member::Iri(iri));
        self.insert_entry(idx, entry);
    }

    /// Inserts an arbitrary vocabulary object at `idx`, if this property
    /// accepts it. On error the list is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `idx > len`.
    pub fn insert_type(&mut self, idx: usize, obj: Box<dyn VocabType>) -> Result<(), PropertyError> {
        assert!(idx <= self.len(), "insert index {idx} out of range for length {}", self.len());
        let entry = self.typed_entry(obj)?;
        self.insert_entry(idx, entry);
        Ok(())
    }

    // =========================================================================
    // Replace / remove / swap
    // =========================================================================

    /// Replaces the entry at `idx` with a typed value, returning the
    /// displaced entry detached from this list.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn set(&mut self, idx: usize, v: T) -> PropertyValue<T> {
        let entry = self.entry(Member::Typed(v));
        self.replace_entry(idx, entry)
    }

    /// Replaces the entry at `idx` with an IRI value, returning the
    /// displaced entry detached from this list.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn set_iri(&mut self, idx: usize, iri: Iri) -> PropertyValue<T> {
        let entry = self.entry(Member::Iri(iri));
        self.replace_entry(idx, entry)
    }

    /// Replaces the entry at `idx` with an arbitrary vocabulary object, if
    /// this property accepts it. On error the list is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn set_type(
        &mut self,
        idx: usize,
        obj: Box<dyn VocabType>,
    ) -> Result<PropertyValue<T>, PropertyError> {
        assert!(idx < self.len(), "set index {idx} out of range for length {}", self.len());
        let entry = self.typed_entry(obj)?;
        Ok(self.replace_entry(idx, entry))
    }

    /// Removes the entry at `idx`, shifting later entries forward.
    ///
    /// The returned entry is detached: it no longer reports neighbors.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn remove(&mut self, idx: usize) -> PropertyValue<T> {
        assert!(idx < self.len(), "remove index {idx} out of range for length {}", self.len());
        let mut removed = self.entries.remove(idx);
        removed.detach();
        self.renumber_from(idx);
        removed
    }

    /// Exchanges the entries at `i` and `j`.
    ///
    /// Both entries are renumbered so positions keep matching storage order.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.entries.swap(i, j);
        let id = self.id;
        self.entries[i].attach(id, i);
        self.entries[j].attach(id, j);
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn at(&self, idx: usize) -> &PropertyValue<T> {
        match self.entries.get(idx) {
            Some(entry) => entry,
            None => panic!(
                "{} property index {idx} out of range for length {}",
                self.descriptor.name,
                self.len()
            ),
        }
    }

    /// Returns the entry at `idx`, or `None` if out of bounds.
    pub fn get(&self, idx: usize) -> Option<&PropertyValue<T>> {
        self.entries.get(idx)
    }

    /// Returns the first entry, or `None` if empty.
    ///
    /// Together with [`PropertyValue::next`] and [`Self::end`] this walks the
    /// list front to back.
    pub fn begin(&self) -> Option<&PropertyValue<T>> {
        self.entries.first()
    }

    /// The past-the-end sentinel, always `None`.
    pub fn end(&self) -> Option<&PropertyValue<T>> {
        None
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PropertyValue<T>> {
        self.entries.iter()
    }

    // =========================================================================
    // Context, serialization, ordering
    // =========================================================================

    /// JSON-LD context entries needed by this property and all its values.
    pub fn json_ld_context(&self) -> ContextMap {
        let mut ctx = ContextMap::new();
        ctx.insert(self.descriptor.namespace.to_string(), self.alias.clone());
        for entry in &self.entries {
            merge_context(&mut ctx, entry.json_ld_context());
        }
        ctx
    }

    /// Converts this property into a decoded value for re-encoding.
    ///
    /// A single value is written bare rather than as a one-element array.
    pub fn serialize(&self) -> Result<Value, SerializeError> {
        crate::codec::encode_property(self)
    }

    /// Compares two properties entry by entry; if all shared positions
    /// tie, the shorter property is less.
    pub fn less_than(&self, other: &PropertyList<T>) -> bool {
        for (a, b) in self.entries.iter().zip(other.entries.iter()) {
            if a.less_than(b) {
                return true;
            }
            if b.less_than(a) {
                return false;
            }
        }
        self.len() < other.len()
    }

    /// Kind index of the entry at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn kind_index(&self, idx: usize) -> i32 {
        self.at(idx).kind_index()
    }

    /// Sort comparison between two entries of this property: by kind index,
    /// then by IRI string or typed-value ordering within a kind.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn less(&self, i: usize, j: usize) -> bool {
        entry_less(self.at(i), self.at(j))
    }

    /// Stable-sorts the entries into canonical order and renumbers them.
    pub fn sort_canonical(&mut self) {
        self.entries.sort_by(|a, b| {
            if entry_less(a, b) {
                Ordering::Less
            } else if entry_less(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
        self.renumber_from(0);
    }
}

/// Canonical sort comparison between two entries.
fn entry_less<T: TypedValue>(a: &PropertyValue<T>, b: &PropertyValue<T>) -> bool {
    let (ka, kb) = (a.kind_index(), b.kind_index());
    if ka != kb {
        return ka < kb;
    }
    match ka {
        KIND_TYPED => match (a.get(), b.get()) {
            (Some(x), Some(y)) => x.less_than(y),
            _ => false,
        },
        KIND_IRI => match (a.get_iri(), b.get_iri()) {
            (Some(x), Some(y)) => x.as_str() < y.as_str(),
            _ => false,
        },
        _ => false,
    }
}

/// Cloning yields an independent list with its own identity; the cloned
/// entries belong to the clone.
impl<T: TypedValue + Clone> Clone for PropertyList<T> {
    fn clone(&self) -> Self {
        let mut list = Self::with_alias(Arc::clone(&self.descriptor), self.alias.clone());
        for entry in &self.entries {
            list.push_entry(entry.clone());
        }
        list
    }
}

impl<'a, T> IntoIterator for &'a PropertyList<T> {
    type Item = &'a PropertyValue<T>;
    type IntoIter = std::slice::Iter<'a, PropertyValue<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
