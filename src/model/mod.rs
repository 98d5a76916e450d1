//! Model hydration layer
//!
//! This module turns loosely-typed API payloads (`serde_json::Value`) into
//! strongly-typed model structs, and back into plain data.
//!
//! # Architecture
//!
//! - [`hydrate`] - Walks a model's attribute table and assigns payload values
//! - [`convert`] - Converts one raw value into its declared Rust type
//! - [`enumeration`] - Enum validation with the `UNKNOWN_ENUM_VALUE` fallback
//! - [`polymorphic`] - Discriminator-based subtype resolution
//! - [`field`] - Tri-state attribute storage (unset / null / set)
//! - [`plain`] - Plain-data rendering and hashing helpers
//! - [`advisory`] - Injected sink for non-fatal hydration events
//!
//! Models are declared with [`wire_model!`](crate::wire_model) and enums with
//! [`wire_enum!`](crate::wire_enum); both generate static tables instead of
//! resolving attributes by name at runtime.
//!
//! # Example
//!
//! ```ignore
//! use cloudhydrate::model::{hydrate, Model};
//! use cloudhydrate::models::Project;
//!
//! let project: Project = hydrate(&serde_json::json!({"lifecycleState": "ACTIVE"}))?;
//! assert_eq!(project.to_hash()["lifecycle_state"], "ACTIVE");
//! ```

pub mod advisory;
pub mod convert;
pub mod enumeration;
pub mod field;
pub mod hydrate;
mod macros;
pub mod plain;
pub mod polymorphic;

use crate::error::Result;
use serde_json::{Map, Value};
use std::fmt;
use std::hash::Hasher;

pub use advisory::{Advisory, AdvisoryLog, SilentAdvisory, TracingAdvisory};
pub use convert::{FromWire, ToPlain};
pub use enumeration::{hydrate_enum, WireEnum, UNKNOWN_ENUM_VALUE};
pub use field::Field;
pub use hydrate::{hydrate, ArrayMismatch, HydrateOptions, Hydrator};
pub use polymorphic::{hydrate_polymorphic, resolve_subtype, Polymorphic};

/// Which name to use as the key when rendering plain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// snake_case attribute names (`lifecycle_state`)
    Local,
    /// API field names (`lifecycleState`)
    Wire,
}

/// One entry of a model's attribute map.
#[derive(Clone, Copy)]
pub struct Attribute {
    pub local: &'static str,
    pub wire: &'static str,
    /// True when the declared type is an array
    pub sequence: bool,
    pub describe: fn() -> TypeDesc,
}

impl Attribute {
    /// Declared semantic type of this attribute
    pub fn type_desc(&self) -> TypeDesc {
        (self.describe)()
    }

    pub fn key(&self, keys: KeyStyle) -> &'static str {
        match keys {
            KeyStyle::Local => self.local,
            KeyStyle::Wire => self.wire,
        }
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("local", &self.local)
            .field("wire", &self.wire)
            .field("type", &self.type_desc().to_string())
            .finish()
    }
}

/// Declared semantic type of an attribute (an entry of the type map).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDesc {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    Date,
    /// Untyped JSON, kept verbatim
    Object,
    Array(Box<TypeDesc>),
    Map(Box<TypeDesc>),
    Model(&'static str),
    Enum {
        name: &'static str,
        allowed: &'static [&'static str],
    },
    Family {
        name: &'static str,
        discriminator: &'static str,
    },
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("String"),
            Self::Integer => f.write_str("Integer"),
            Self::Float => f.write_str("Float"),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::DateTime => f.write_str("DateTime"),
            Self::Date => f.write_str("Date"),
            Self::Object => f.write_str("Object"),
            Self::Array(inner) => write!(f, "Array<{}>", inner),
            Self::Map(inner) => write!(f, "Hash<String, {}>", inner),
            Self::Model(name) | Self::Enum { name, .. } | Self::Family { name, .. } => {
                f.write_str(name)
            }
        }
    }
}

/// A record type with a fixed, statically known attribute set.
///
/// Implementations are generated by [`wire_model!`](crate::wire_model).
pub trait Model: Default + Clone + fmt::Debug + PartialEq + 'static {
    const NAME: &'static str;
    /// Attribute map, in declaration order
    const ATTRIBUTES: &'static [Attribute];

    /// Convert `raw` and assign it to the attribute with local name `name`.
    /// Unknown names are ignored.
    fn assign(&mut self, name: &str, raw: &Value, cx: &mut Hydrator<'_>) -> Result<()>;

    /// Plain rendering of every attribute in declaration order; `None` marks
    /// an attribute that was never set.
    fn plain_attributes(&self, keys: KeyStyle) -> Vec<Option<Value>>;

    fn plain_map(&self, keys: KeyStyle) -> Map<String, Value> {
        let mut out = Map::new();
        for (attribute, value) in Self::ATTRIBUTES.iter().zip(self.plain_attributes(keys)) {
            if let Some(value) = value {
                out.insert(attribute.key(keys).to_string(), value);
            }
        }
        out
    }

    /// Deep conversion to plain data keyed by local attribute names.
    fn to_hash(&self) -> Map<String, Value> {
        self.plain_map(KeyStyle::Local)
    }

    /// Deep conversion to plain data keyed by wire names.
    fn to_wire(&self) -> Map<String, Value> {
        self.plain_map(KeyStyle::Wire)
    }

    fn attribute(local: &str) -> Option<&'static Attribute> {
        Self::ATTRIBUTES.iter().find(|a| a.local == local)
    }

    fn attribute_by_wire(wire: &str) -> Option<&'static Attribute> {
        Self::ATTRIBUTES.iter().find(|a| a.wire == wire)
    }

    /// Local attribute name -> declared type
    fn type_map() -> Vec<(&'static str, TypeDesc)> {
        Self::ATTRIBUTES
            .iter()
            .map(|a| (a.local, a.type_desc()))
            .collect()
    }
}

/// Hash a model over its ordered plain attribute rendering.
///
/// Equal models render identically, so this agrees with `PartialEq`.
pub fn hash_model<M: Model, H: Hasher>(model: &M, state: &mut H) {
    for value in model.plain_attributes(KeyStyle::Local) {
        plain::hash_optional(value.as_ref(), state);
    }
}

/// Object-safe view of any hydrated model or family.
pub trait DynModel: fmt::Debug {
    /// Name of the concrete type that was hydrated
    fn type_name(&self) -> &'static str;
    /// Same as [`Model::to_hash`]
    fn to_plain_hash(&self) -> Map<String, Value>;
    /// Same as [`Model::to_wire`]
    fn to_plain_wire(&self) -> Map<String, Value>;
}

impl<M: Model> DynModel for M {
    fn type_name(&self) -> &'static str {
        M::NAME
    }

    fn to_plain_hash(&self) -> Map<String, Value> {
        self.to_hash()
    }

    fn to_plain_wire(&self) -> Map<String, Value> {
        self.to_wire()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_desc_renders_sdk_notation() {
        let desc = TypeDesc::Map(Box::new(TypeDesc::Array(Box::new(TypeDesc::Boolean))));
        assert_eq!(desc.to_string(), "Hash<String, Array<BOOLEAN>>");
    }

    #[test]
    fn test_type_desc_named_types() {
        assert_eq!(TypeDesc::Model("Instance").to_string(), "Instance");
        let family = TypeDesc::Family {
            name: "TrafficNode",
            discriminator: "type",
        };
        assert_eq!(family.to_string(), "TrafficNode");
    }
}
