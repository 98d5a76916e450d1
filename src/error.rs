//! Error types
//!
//! Hydration errors are never wrapped by the library; they propagate to the
//! caller (usually the layer that deserialized an API response).

/// Errors raised while hydrating a model from a raw payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HydrateError {
    /// The same attribute was supplied under its wire name and its local name.
    #[error("you cannot provide both :{wire} and :{local} to {model}")]
    DuplicateAttribute {
        model: &'static str,
        local: &'static str,
        wire: &'static str,
    },
    /// The raw value has a JSON type the declared type cannot be built from.
    #[error("{path}: expected {expected}, got {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    /// A numeric value could not be parsed, is not finite, or is not integral.
    #[error("{path}: invalid number `{value}`")]
    InvalidNumber { path: String, value: String },
    #[error("{path}: invalid datetime `{value}`")]
    InvalidDateTime { path: String, value: String },
    #[error("{path}: invalid date `{value}`")]
    InvalidDate { path: String, value: String },
    /// An array attribute received a non-sequence value while
    /// [`ArrayMismatch::Reject`](crate::model::ArrayMismatch::Reject) is set.
    #[error("{path}: expected a sequence for an array attribute")]
    NonSequenceArray { path: String },
}

/// Errors from the model catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown model: {0}")]
    UnknownModel(String),
    #[error("{0} is not a polymorphic family")]
    NotAFamily(String),
    #[error(transparent)]
    Hydrate(#[from] HydrateError),
}

pub type Result<T, E = HydrateError> = std::result::Result<T, E>;
