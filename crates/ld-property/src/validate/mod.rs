//! Structural validation of property lists.
//!
//! The model's mutators maintain these invariants themselves; this module
//! checks them from the outside so tests (and callers that suspect a bug)
//! can verify that every entry's recorded position equals its index and
//! that every entry is owned by the list that stores it.

use crate::error::ValidationError;
use crate::model::{PropertyList, TypedValue};

/// Validates the position and owner bookkeeping of every entry.
pub fn validate_list<T: TypedValue>(list: &PropertyList<T>) -> Result<(), ValidationError> {
    for (index, entry) in list.iter().enumerate() {
        if entry.position() != index {
            return Err(ValidationError::PositionMismatch {
                index,
                recorded: entry.position(),
            });
        }
        if entry.owner() != Some(list.id()) {
            return Err(ValidationError::OwnerMismatch { index });
        }
    }
    Ok(())
}
