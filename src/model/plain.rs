//! Plain data helpers
//!
//! Hashing of plain JSON renderings (used for model `Hash` impls) and JSON
//! type names for error messages.

use serde_json::Value;
use std::hash::{Hash, Hasher};

/// JSON type name of a value, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Hash an attribute that may be unset.
pub fn hash_optional<H: Hasher>(value: Option<&Value>, state: &mut H) {
    match value {
        None => 0u8.hash(state),
        Some(value) => {
            1u8.hash(state);
            hash_plain(value, state);
        }
    }
}

/// Structural hash of a JSON value, consistent with `Value`'s `PartialEq`.
pub fn hash_plain<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        Value::Number(n) => {
            2u8.hash(state);
            if let Some(i) = n.as_i64() {
                0u8.hash(state);
                i.hash(state);
            } else if let Some(u) = n.as_u64() {
                1u8.hash(state);
                u.hash(state);
            } else if let Some(f) = n.as_f64() {
                2u8.hash(state);
                // 0.0 == -0.0 must hash alike
                let f = if f == 0.0 { 0.0 } else { f };
                f.to_bits().hash(state);
            }
        }
        Value::String(s) => {
            3u8.hash(state);
            s.hash(state);
        }
        Value::Array(items) => {
            4u8.hash(state);
            items.len().hash(state);
            for item in items {
                hash_plain(item, state);
            }
        }
        Value::Object(map) => {
            5u8.hash(state);
            map.len().hash(state);
            for (key, item) in map {
                key.hash(state);
                hash_plain(item, state);
            }
        }
    }
}
