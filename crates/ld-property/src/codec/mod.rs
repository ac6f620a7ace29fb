//! Conversion between decoded document fragments and the property model.
//!
//! Documents are represented as `serde_json::Value` trees; this module
//! neither parses nor prints text.

pub mod property;
pub mod value;

pub use property::{
    decode_property, decode_property_with_options, encode_property, encode_property_into,
    DecodeOptions,
};
pub use value::{decode_value, encode_value};
