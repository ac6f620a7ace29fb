//! Well-known vocabularies.
//!
//! Namespace URIs and the alias each is imported under when a property
//! is built in code rather than decoded from a document.

pub mod security;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::model::PropertyDescriptor;

/// ActivityStreams 2.0 (the document default; no alias).
pub const ACTIVITY_STREAMS: &str = "https://www.w3.org/ns/activitystreams";
/// Mastodon extensions.
pub const TOOT: &str = "http://joinmastodon.org/ns#";
/// ForgeFed.
pub const FORGE_FED: &str = "https://forgefed.org/ns#";
/// Schema.org.
pub const SCHEMA: &str = "http://schema.org#";

lazy_static! {
    static ref DEFAULT_ALIASES: FxHashMap<&'static str, &'static str> = {
        let mut m = FxHashMap::default();
        m.insert(ACTIVITY_STREAMS, "");
        m.insert(security::SECURITY_V1, "widsv");
        m.insert(TOOT, "toot");
        m.insert(FORGE_FED, "forgefed");
        m.insert(SCHEMA, "schema");
        m
    };
}

/// Returns the default alias of a well-known namespace.
pub fn default_alias(namespace: &str) -> Option<&'static str> {
    DEFAULT_ALIASES.get(namespace).copied()
}

/// Creates a descriptor for `name` in `namespace`, using the namespace's
/// well-known default alias (none for unrecognized namespaces).
pub fn descriptor(namespace: &'static str, name: &'static str) -> PropertyDescriptor {
    PropertyDescriptor::new_static(namespace, name, default_alias(namespace).unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alias() {
        assert_eq!(default_alias(security::SECURITY_V1), Some("widsv"));
        assert_eq!(default_alias(ACTIVITY_STREAMS), Some(""));
        assert_eq!(default_alias("https://example.com/ns#"), None);
    }

    #[test]
    fn test_descriptor_uses_default_alias() {
        let d = descriptor(TOOT, "discoverable");
        assert_eq!(d.default_alias, "toot");
        assert_eq!(d.key_for_alias(&d.default_alias), "toot:discoverable");

        let d = descriptor("https://example.com/ns#", "custom");
        assert_eq!(d.default_alias, "");
    }
}
