//! Attribute storage
//!
//! Generated models keep every attribute in a [`Field`], which distinguishes
//! an attribute that was never assigned from one assigned null. Only the
//! former is omitted from `to_hash`.

use super::convert::{FromWire, ToPlain};
use super::hydrate::Hydrator;
use super::KeyStyle;
use crate::error::Result;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Field<T> {
    /// Never assigned
    #[default]
    Unset,
    /// Explicitly assigned null
    Null,
    Set(T),
}

impl<T> Field<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset | Self::Null => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset | Self::Null => None,
        }
    }

    pub fn set(&mut self, value: T) {
        *self = Self::Set(value);
    }

    pub fn set_null(&mut self) {
        *self = Self::Null;
    }

    /// Forget the value; the attribute no longer appears in `to_hash`.
    pub fn unset(&mut self) {
        *self = Self::Unset;
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset | Self::Null => None,
        }
    }
}

impl<T: FromWire> Field<T> {
    /// Convert a non-null `raw` and store it. Null payload values never reach
    /// here; [`Hydrator::hydrate_into`] leaves those attributes untouched.
    pub fn hydrate(&mut self, raw: &Value, cx: &mut Hydrator<'_>) -> Result<()> {
        *self = Self::Set(T::from_wire(raw, cx)?);
        Ok(())
    }
}

impl<T: ToPlain> Field<T> {
    /// `None` for an unset attribute, JSON null for a null one.
    pub fn to_plain(&self, keys: KeyStyle) -> Option<Value> {
        match self {
            Self::Unset => None,
            Self::Null => Some(Value::Null),
            Self::Set(value) => Some(value.to_plain(keys)),
        }
    }
}

/// `None` becomes an explicit null.
impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Set(value),
            None => Self::Null,
        }
    }
}
