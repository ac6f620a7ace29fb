//! Builder API for ergonomic property construction.
//!
//! # Example
//!
//! ```rust
//! use ld_property::model::builder::PropertyListBuilder;
//! use ld_property::vocab::security::{public_key_descriptor, PublicKey};
//! use ld_property::Iri;
//!
//! let list = PropertyListBuilder::<PublicKey>::new(public_key_descriptor())
//!     .alias("sec")
//!     .iri(Iri::parse("https://example.com/key1").unwrap())
//!     .value(PublicKey::new(Iri::parse("https://example.com/key2").unwrap()))
//!     .build();
//!
//! assert_eq!(list.len(), 2);
//! assert!(list.at(0).is_iri());
//! ```

use std::sync::Arc;

use crate::error::PropertyError;
use crate::model::{Iri, PropertyDescriptor, PropertyList, TypedValue, VocabType};

enum Pending<T> {
    Typed(T),
    Iri(Iri),
    Erased(Box<dyn VocabType>),
}

/// Builder for constructing a [`PropertyList`].
pub struct PropertyListBuilder<T> {
    descriptor: Arc<PropertyDescriptor>,
    alias: Option<String>,
    values: Vec<Pending<T>>,
}

impl<T: TypedValue> PropertyListBuilder<T> {
    /// Creates a new builder for the given property.
    pub fn new(descriptor: Arc<PropertyDescriptor>) -> Self {
        Self {
            descriptor,
            alias: None,
            values: Vec::new(),
        }
    }

    /// Sets the alias used for the property's namespace (defaults to the
    /// descriptor's default alias).
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds a typed value.
    pub fn value(mut self, v: T) -> Self {
        self.values.push(Pending::Typed(v));
        self
    }

    /// Adds several typed values at once.
    pub fn values(mut self, vs: impl IntoIterator<Item = T>) -> Self {
        self.values.extend(vs.into_iter().map(Pending::Typed));
        self
    }

    /// Adds an IRI value.
    pub fn iri(mut self, iri: Iri) -> Self {
        self.values.push(Pending::Iri(iri));
        self
    }

    /// Adds an arbitrary vocabulary object; checked by [`Self::try_build`].
    pub fn vocab_type(mut self, obj: Box<dyn VocabType>) -> Self {
        self.values.push(Pending::Erased(obj));
        self
    }

    /// Builds the property, failing if any object added with
    /// [`Self::vocab_type`] is not accepted by it.
    pub fn try_build(self) -> Result<PropertyList<T>, PropertyError> {
        let mut list = match self.alias {
            Some(alias) => PropertyList::with_alias(self.descriptor, alias),
            None => PropertyList::new(self.descriptor),
        };
        for pending in self.values {
            match pending {
                Pending::Typed(v) => list.append(v),
                Pending::Iri(iri) => list.append_iri(iri),
                Pending::Erased(obj) => list.append_type(obj)?,
            }
        }
        Ok(list)
    }

    /// Builds the property.
    ///
    /// # Panics
    ///
    /// Panics if an object added with [`Self::vocab_type`] is not accepted;
    /// use [`Self::try_build`] when that can happen.
    pub fn build(self) -> PropertyList<T> {
        match self.try_build() {
            Ok(list) => list,
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::security::{public_key_descriptor, PublicKey};

    fn key(s: &str) -> PublicKey {
        PublicKey::new(Iri::parse(s).unwrap())
    }

    #[test]
    fn test_builder_preserves_order() {
        let list = PropertyListBuilder::new(public_key_descriptor())
            .value(key("https://ex.com/k1"))
            .iri(Iri::parse("https://ex.com/k2").unwrap())
            .values([key("https://ex.com/k3"), key("https://ex.com/k4")])
            .build();

        assert_eq!(list.len(), 4);
        assert!(list.at(0).is_typed());
        assert!(list.at(1).is_iri());
        assert_eq!(list.at(3).get().unwrap().id().as_str(), "https://ex.com/k4");
        assert_eq!(list.alias(), "widsv");
    }

    #[test]
    fn test_builder_alias() {
        let list = PropertyListBuilder::<PublicKey>::new(public_key_descriptor())
            .alias("sec")
            .iri(Iri::parse("https://ex.com/k1").unwrap())
            .build();
        assert_eq!(list.alias(), "sec");
        assert_eq!(list.at(0).alias(), "sec");
    }

    #[test]
    fn test_builder_checked_vocab_type() {
        let list = PropertyListBuilder::<PublicKey>::new(public_key_descriptor())
            .vocab_type(Box::new(key("https://ex.com/k1")))
            .try_build()
            .unwrap();
        assert!(list.at(0).is_typed());
    }
}
