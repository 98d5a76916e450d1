//! Advisory log
//!
//! Non-fatal observations made during hydration (unknown enum values,
//! unresolved discriminators, array attributes fed a non-sequence, dropped
//! null elements). The sink is
//! injected into every [`Hydrator`](super::Hydrator) instead of living in a
//! global.

use std::fmt;

/// A non-fatal event observed while hydrating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// An enum attribute received a value outside its allowed set and was
    /// replaced by `UNKNOWN_ENUM_VALUE`.
    UnknownEnumValue {
        path: String,
        enum_type: &'static str,
        value: String,
    },
    /// A polymorphic payload carried a missing or unrecognized discriminator
    /// and fell back to the base type.
    UnresolvedDiscriminator {
        path: String,
        family: &'static str,
        value: Option<String>,
    },
    /// An array attribute received a non-sequence value and was left unset.
    NonSequenceArray { path: String, model: &'static str },
    /// A null element of an array or map attribute was dropped.
    NullElement { path: String },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEnumValue {
                path,
                enum_type,
                value,
            } => write!(
                f,
                "{}: unknown value '{}' for {}, using UNKNOWN_ENUM_VALUE",
                display_path(path),
                value,
                enum_type
            ),
            Self::UnresolvedDiscriminator {
                path,
                family,
                value: Some(value),
            } => write!(
                f,
                "{}: unknown {} subtype '{}', using base type",
                display_path(path),
                family,
                value
            ),
            Self::UnresolvedDiscriminator {
                path,
                family,
                value: None,
            } => write!(
                f,
                "{}: no {} discriminator, using base type",
                display_path(path),
                family
            ),
            Self::NonSequenceArray { path, model } => write!(
                f,
                "{}: {} array attribute got a non-sequence value, left unset",
                display_path(path),
                model
            ),
            Self::NullElement { path } => {
                write!(f, "{}: null element dropped", display_path(path))
            }
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

/// Sink for [`Advisory`] events.
pub trait AdvisoryLog {
    fn record(&mut self, advisory: Advisory);
}

/// Collects advisories in memory.
impl AdvisoryLog for Vec<Advisory> {
    fn record(&mut self, advisory: Advisory) {
        self.push(advisory);
    }
}

/// Forwards advisories to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAdvisory;

impl AdvisoryLog for TracingAdvisory {
    fn record(&mut self, advisory: Advisory) {
        match &advisory {
            Advisory::UnknownEnumValue {
                path,
                enum_type,
                value,
            } => {
                tracing::debug!(path = %path, enum_type, value = %value, "unknown enum value");
            }
            Advisory::UnresolvedDiscriminator {
                path,
                family,
                value,
            } => {
                tracing::debug!(path = %path, family, value = ?value, "unresolved discriminator");
            }
            Advisory::NonSequenceArray { path, model } => {
                tracing::debug!(path = %path, model, "non-sequence value for array attribute");
            }
            Advisory::NullElement { path } => {
                tracing::debug!(path = %path, "null element dropped");
            }
        }
    }
}

/// Drops every advisory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAdvisory;

impl AdvisoryLog for SilentAdvisory {
    fn record(&mut self, _advisory: Advisory) {}
}
