//! Limits applied while decoding untrusted documents.

/// Maximum number of values accepted for a single property.
pub const MAX_PROPERTY_VALUES: usize = 65_536;

/// Separator between a namespace alias and a property name in document keys.
pub const ALIAS_SEPARATOR: char = ':';
