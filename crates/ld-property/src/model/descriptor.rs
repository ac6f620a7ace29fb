//! Per-property metadata and namespace alias bookkeeping.
//!
//! A [`PropertyDescriptor`] is what instantiates the generic property core
//! for one vocabulary term: which namespace it lives in, its name, and the
//! alias used when a new property is built from scratch.

use std::borrow::Cow;
use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::limits::ALIAS_SEPARATOR;

/// JSON-LD context entries: namespace URI to the alias it is imported under.
///
/// Ordered so that context blocks are emitted deterministically.
pub type ContextMap = BTreeMap<String, String>;

/// Merges `child` into `ctx` without overwriting keys already present.
///
/// Alias bindings are fixed when a vocabulary is defined, so the first
/// binding seen for a namespace wins.
pub fn merge_context(ctx: &mut ContextMap, child: ContextMap) {
    for (namespace, alias) in child {
        ctx.entry(namespace).or_insert(alias);
    }
}

/// Static description of one vocabulary property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyDescriptor {
    /// Namespace URI of the vocabulary that defines the property.
    pub namespace: Cow<'static, str>,
    /// Unaliased property name, e.g. `publicKey`.
    pub name: Cow<'static, str>,
    /// Alias applied to properties built in code rather than decoded.
    pub default_alias: Cow<'static, str>,
}

impl PropertyDescriptor {
    /// Creates a descriptor from static strings (usable in `const`/`static`).
    pub const fn new_static(
        namespace: &'static str,
        name: &'static str,
        default_alias: &'static str,
    ) -> Self {
        Self {
            namespace: Cow::Borrowed(namespace),
            name: Cow::Borrowed(name),
            default_alias: Cow::Borrowed(default_alias),
        }
    }

    /// Creates a descriptor from owned or borrowed strings.
    pub fn new(
        namespace: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
        default_alias: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            default_alias: default_alias.into(),
        }
    }

    /// Returns the document key for this property under `alias`.
    ///
    /// An empty alias means the namespace is the document default and the
    /// bare name is used.
    pub fn key_for_alias(&self, alias: &str) -> String {
        if alias.is_empty() {
            self.name.to_string()
        } else {
            format!("{alias}{ALIAS_SEPARATOR}{}", self.name)
        }
    }
}

/// Namespaces in use by one document, with the alias each is imported under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: FxHashMap<String, String>,
}

impl AliasTable {
    /// Creates an empty table (every namespace is the document default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the alias a namespace is imported under.
    pub fn insert(&mut self, namespace: impl Into<String>, alias: impl Into<String>) {
        self.aliases.insert(namespace.into(), alias.into());
    }

    /// Returns the alias for `namespace`, or `""` if it is not aliased.
    pub fn alias_for(&self, namespace: &str) -> &str {
        self.aliases.get(namespace).map(String::as_str).unwrap_or("")
    }

    /// Returns the number of aliased namespaces.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns true if no namespace is aliased.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<N: Into<String>, A: Into<String>> FromIterator<(N, A)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (N, A)>>(iter: I) -> Self {
        let mut table = AliasTable::new();
        for (namespace, alias) in iter {
            table.insert(namespace, alias);
        }
        table
    }
}
