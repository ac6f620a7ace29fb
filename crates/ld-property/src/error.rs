//! Error types for property decoding, encoding, and mutation.

use thiserror::Error;

/// Error raised by a mutation that narrows an arbitrary vocabulary object
/// to the typed value a property accepts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("illegal type to set on {property} property: {found}")]
    TypeMismatch { property: String, found: String },
}

/// Error reported by a per-vocabulary typed-value deserializer.
///
/// The two variants are treated differently by the decoder: a shape
/// mismatch means "this mapping is not one of mine" and the element is
/// preserved as an unknown value, while a malformed value aborts decoding
/// of the enclosing property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypedDecodeError {
    #[error("not a {expected}: {reason}")]
    ShapeMismatch { expected: &'static str, reason: String },

    #[error("malformed {type_name}: {reason}")]
    Malformed { type_name: &'static str, reason: String },
}

impl TypedDecodeError {
    /// Returns true if the decoder should fall back to the unknown variant.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, TypedDecodeError::ShapeMismatch { .. })
    }
}

/// Error while decoding a property from a document fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("property {property:?}: {source}")]
    Typed {
        property: String,
        #[source]
        source: TypedDecodeError,
    },

    #[error("property {property:?} has {len} values, exceeding maximum {max}")]
    TooManyValues {
        property: String,
        len: usize,
        max: usize,
    },
}

/// Error while encoding a property back into a document fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    #[error("cannot serialize {type_name}: {reason}")]
    Typed { type_name: String, reason: String },

    #[error("canonical encoding failed: {0}")]
    Canonical(String),
}

/// Structural invariant violation found by [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("entry at index {index} records position {recorded}")]
    PositionMismatch { index: usize, recorded: usize },

    #[error("entry at index {index} is not owned by this list")]
    OwnerMismatch { index: usize },
}
