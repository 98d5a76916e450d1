//! Enum Validator
//!
//! Enum attributes accept only their declared values. Anything else the
//! service sends is mapped to `UNKNOWN_ENUM_VALUE` so that older clients keep
//! working when a new member is added server side.

use super::advisory::Advisory;
use super::hydrate::Hydrator;
use serde_json::Value;

/// Wire form of the sentinel variant
pub const UNKNOWN_ENUM_VALUE: &str = "UNKNOWN_ENUM_VALUE";

/// A constrained string attribute. Implemented by [`wire_enum!`](crate::wire_enum).
pub trait WireEnum: Sized + Copy + 'static {
    const NAME: &'static str;
    /// Allowed wire values, sentinel excluded
    const ALLOWED: &'static [&'static str];
    const UNKNOWN: Self;

    fn from_known(value: &str) -> Option<Self>;

    fn as_wire_str(&self) -> &'static str;

    /// Known member, or the sentinel.
    fn from_wire_str(value: &str) -> Self {
        Self::from_known(value).unwrap_or(Self::UNKNOWN)
    }

    fn is_unknown(&self) -> bool {
        self.as_wire_str() == UNKNOWN_ENUM_VALUE
    }
}

/// Convert a raw enum value, substituting the sentinel for anything outside
/// the allowed set (non-string values included).
pub fn hydrate_enum<E: WireEnum>(raw: &Value, cx: &mut Hydrator<'_>) -> E {
    if let Some(known) = raw.as_str().and_then(E::from_known) {
        return known;
    }

    let value = match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let path = cx.path();
    cx.advise(Advisory::UnknownEnumValue {
        path,
        enum_type: E::NAME,
        value,
    });
    E::UNKNOWN
}
