//! Canonical ordering and hashing of non-functional properties.
//!
//! The values of a non-functional property are semantically unordered, but
//! documents list them in whatever order their author chose. Canonical
//! form sorts them by kind index (IRIs, then unknown values, then typed
//! values) and then within a kind. Values that still tie (unknown payloads,
//! or typed values equal under their own ordering) are ordered by their
//! canonical JSON bytes, so two documents holding the same values in any
//! order hash identically.
//!
//! ```text
//! canonical_digest = SHA-256(canonical_bytes(sorted values))
//! ```

use std::cmp::Ordering;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::SerializeError;
use crate::model::{PropertyList, TypedValue};

/// Primary canonical sort key of the entry at `idx`: its kind index.
///
/// # Panics
///
/// Panics if `idx` is out of bounds.
pub fn sort_key<T: TypedValue>(list: &PropertyList<T>, idx: usize) -> i32 {
    list.kind_index(idx)
}

/// Sorts a property into canonical order in place.
pub fn sort_canonical<T: TypedValue>(list: &mut PropertyList<T>) {
    list.sort_canonical();
}

/// Returns the indices of `list` in canonical order without reordering it.
///
/// Entries are ordered by [`PropertyList::less`], with remaining ties broken
/// by their canonical JSON bytes.
pub fn canonical_order<T: TypedValue>(list: &PropertyList<T>) -> Result<Vec<usize>, SerializeError> {
    let encoded = encode_entries(list)?;
    Ok(order_encoded(list, &encoded))
}

/// Returns the canonical JSON bytes of a property.
///
/// Values are encoded in canonical order (with the usual single-value
/// collapse) and every mapping is written with sorted keys.
pub fn canonical_bytes<T: TypedValue>(list: &PropertyList<T>) -> Result<Vec<u8>, SerializeError> {
    let mut encoded = encode_entries(list)?;
    let order = order_encoded(list, &encoded);
    let mut values: Vec<Value> = order
        .into_iter()
        .map(|idx| std::mem::take(&mut encoded[idx].0))
        .collect();
    let value = if values.len() == 1 {
        values.swap_remove(0)
    } else {
        Value::Array(values)
    };
    to_bytes(&value)
}

/// Encodes every entry once, as a key-sorted value and its bytes.
fn encode_entries<T: TypedValue>(list: &PropertyList<T>) -> Result<Vec<(Value, Vec<u8>)>, SerializeError> {
    let mut encoded = Vec::with_capacity(list.len());
    for entry in list {
        let value = sort_keys(entry.serialize()?);
        let bytes = to_bytes(&value)?;
        encoded.push((value, bytes));
    }
    Ok(encoded)
}

fn order_encoded<T: TypedValue>(list: &PropertyList<T>, encoded: &[(Value, Vec<u8>)]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..list.len()).collect();
    order.sort_by(|&i, &j| {
        if list.less(i, j) {
            Ordering::Less
        } else if list.less(j, i) {
            Ordering::Greater
        } else {
            encoded[i].1.cmp(&encoded[j].1)
        }
    });
    order
}

fn to_bytes(value: &Value) -> Result<Vec<u8>, SerializeError> {
    serde_json::to_vec(value).map_err(|e| SerializeError::Canonical(e.to_string()))
}

/// Computes the SHA-256 digest of a property's canonical bytes.
pub fn canonical_digest<T: TypedValue>(list: &PropertyList<T>) -> Result<[u8; 32], SerializeError> {
    let bytes = canonical_bytes(list)?;
    Ok(Sha256::digest(&bytes).into())
}

/// Rebuilds mappings with keys in sorted order, recursively.
///
/// `Map` is already sorted unless some crate in the build enables
/// serde_json's `preserve_order` feature, which makes it keep insertion
/// order instead.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, sort_keys(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
