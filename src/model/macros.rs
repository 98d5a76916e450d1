//! Declarative generators for models and enums
//!
//! These play the role a code generator plays in a cloud SDK: each invocation
//! expands to the struct, its attribute map, the assignment dispatch, and the
//! equality/hash/plain-data glue.

/// Declare a constrained-string enum with an `UnknownEnumValue` sentinel.
///
/// ```ignore
/// wire_enum! {
///     pub enum LifecycleState {
///         Creating = "CREATING",
///         Active = "ACTIVE",
///     }
/// }
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// A value this client does not know about
            UnknownEnumValue,
        }

        impl $crate::model::WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const ALLOWED: &'static [&'static str] = &[$($wire),+];
            const UNKNOWN: Self = Self::UnknownEnumValue;

            fn from_known(value: &str) -> ::std::option::Option<Self> {
                match value {
                    $( $wire => ::std::option::Option::Some(Self::$variant), )+
                    _ => ::std::option::Option::None,
                }
            }

            fn as_wire_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::UnknownEnumValue => $crate::model::UNKNOWN_ENUM_VALUE,
                }
            }
        }

        impl $crate::model::FromWire for $name {
            fn describe() -> $crate::model::TypeDesc {
                $crate::model::TypeDesc::Enum {
                    name: stringify!($name),
                    allowed: <Self as $crate::model::WireEnum>::ALLOWED,
                }
            }

            fn from_wire(
                raw: &$crate::serde_json::Value,
                cx: &mut $crate::model::Hydrator<'_>,
            ) -> $crate::error::Result<Self> {
                ::std::result::Result::Ok($crate::model::hydrate_enum::<Self>(raw, cx))
            }
        }

        impl $crate::model::ToPlain for $name {
            fn to_plain(&self, _keys: $crate::model::KeyStyle) -> $crate::serde_json::Value {
                $crate::serde_json::Value::String(
                    <Self as $crate::model::WireEnum>::as_wire_str(self).to_string(),
                )
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(<Self as $crate::model::WireEnum>::as_wire_str(self))
            }
        }
    };
}

/// Declare a model struct. Each attribute is `local_name: Type => "wireName"`;
/// append `as "name"` when the local name differs from the Rust field name
/// (e.g. `type_: String => "type" as "type"`).
///
/// The generated `Eq` and `Hash` assume `f64` attributes are finite, which
/// hydration guarantees; values assigned by hand must keep to that.
///
/// ```ignore
/// wire_model! {
///     pub struct Project {
///         project_id: String => "projectId",
///         lifecycle_state: ProjectLifecycleState => "lifecycleState",
///     }
/// }
/// ```
#[macro_export]
macro_rules! wire_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty => $wire:literal $(as $local:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $crate::model::Field<$ty>,
            )*
        }

        impl $crate::model::Model for $name {
            const NAME: &'static str = stringify!($name);
            const ATTRIBUTES: &'static [$crate::model::Attribute] = &[
                $(
                    $crate::model::Attribute {
                        local: $crate::__local_name!($field $(, $local)?),
                        wire: $wire,
                        sequence: <$ty as $crate::model::FromWire>::IS_SEQUENCE,
                        describe: <$ty as $crate::model::FromWire>::describe,
                    },
                )*
            ];

            #[allow(unused_variables)]
            fn assign(
                &mut self,
                name: &str,
                raw: &$crate::serde_json::Value,
                cx: &mut $crate::model::Hydrator<'_>,
            ) -> $crate::error::Result<()> {
                $(
                    if name == $crate::__local_name!($field $(, $local)?) {
                        return self.$field.hydrate(raw, cx);
                    }
                )*
                ::std::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn plain_attributes(
                &self,
                keys: $crate::model::KeyStyle,
            ) -> ::std::vec::Vec<::std::option::Option<$crate::serde_json::Value>> {
                ::std::vec![ $( self.$field.to_plain(keys), )* ]
            }
        }

        // Float attributes are finite when hydrated (non-finite input is an
        // `InvalidNumber` error). Writing NaN into a public field by hand
        // breaks reflexivity.
        impl ::std::cmp::Eq for $name {}

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                $crate::model::hash_model(self, state);
            }
        }

        impl $crate::model::FromWire for $name {
            fn describe() -> $crate::model::TypeDesc {
                $crate::model::TypeDesc::Model(stringify!($name))
            }

            fn from_wire(
                raw: &$crate::serde_json::Value,
                cx: &mut $crate::model::Hydrator<'_>,
            ) -> $crate::error::Result<Self> {
                cx.hydrate::<Self>(raw)
            }
        }

        impl $crate::model::ToPlain for $name {
            fn to_plain(&self, keys: $crate::model::KeyStyle) -> $crate::serde_json::Value {
                $crate::serde_json::Value::Object(
                    <Self as $crate::model::Model>::plain_map(self, keys),
                )
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __local_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $local:literal) => {
        $local
    };
}
