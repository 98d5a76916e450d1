//! Polymorphic Subtype Resolver
//!
//! A polymorphic family is an enum with one variant per concrete subtype plus
//! an `Unknown` variant carrying the base model. The discriminator attribute
//! (`type` unless overridden) selects the variant through a static table;
//! missing or unrecognized discriminators fall back to the base. Like any
//! attribute, the discriminator is read under its wire or its local name.

use super::advisory::Advisory;
use super::hydrate::Hydrator;
use crate::error::{HydrateError, Result};
use serde_json::Value;
use std::fmt;

pub trait Polymorphic: Sized + Clone + fmt::Debug + PartialEq + 'static {
    /// Fieldless tag naming each variant
    type Kind: Copy + Eq + fmt::Debug + 'static;

    const FAMILY: &'static str;
    const DISCRIMINATOR: &'static str = "type";
    /// Local attribute name of the discriminator, as written by `to_hash`
    const DISCRIMINATOR_LOCAL: &'static str = "type";
    /// Discriminator value -> variant
    const SUBTYPES: &'static [(&'static str, Self::Kind)];
    /// Variant used when the discriminator does not resolve
    const BASE: Self::Kind;

    /// Hydrate the concrete type named by `kind`.
    fn hydrate_kind(kind: Self::Kind, raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self>;

    fn kind(&self) -> Self::Kind;

    /// Name of the concrete model behind `kind`
    fn subtype_name(kind: Self::Kind) -> &'static str;
}

/// Raw discriminator under its wire key, else under its local key.
fn discriminator_value<P: Polymorphic>(raw: &Value) -> Option<&Value> {
    raw.get(P::DISCRIMINATOR)
        .or_else(|| raw.get(P::DISCRIMINATOR_LOCAL))
}

/// Discriminator value of a raw payload, if present and a string.
pub fn discriminator_of<P: Polymorphic>(raw: &Value) -> Option<&str> {
    discriminator_value::<P>(raw)?.as_str()
}

/// Table lookup; `None` when the value is missing or unrecognized.
pub fn lookup_subtype<P: Polymorphic>(discriminator: Option<&str>) -> Option<P::Kind> {
    let discriminator = discriminator?;
    P::SUBTYPES
        .iter()
        .find(|(value, _)| *value == discriminator)
        .map(|(_, kind)| *kind)
}

/// Resolve the concrete subtype for a raw payload. Never fails.
pub fn resolve_subtype<P: Polymorphic>(raw: &Value) -> P::Kind {
    lookup_subtype::<P>(discriminator_of::<P>(raw)).unwrap_or(P::BASE)
}

/// Resolve, then hydrate the resolved type. Unresolved discriminators on a
/// mapping payload are reported as an advisory.
pub fn hydrate_polymorphic<P: Polymorphic>(raw: &Value, cx: &mut Hydrator<'_>) -> Result<P> {
    if P::DISCRIMINATOR != P::DISCRIMINATOR_LOCAL
        && raw.get(P::DISCRIMINATOR).is_some()
        && raw.get(P::DISCRIMINATOR_LOCAL).is_some()
    {
        return Err(HydrateError::DuplicateAttribute {
            model: P::FAMILY,
            local: P::DISCRIMINATOR_LOCAL,
            wire: P::DISCRIMINATOR,
        });
    }

    let discriminator = discriminator_of::<P>(raw);
    let kind = match lookup_subtype::<P>(discriminator) {
        Some(kind) => kind,
        None => {
            if raw.is_object() {
                let value = match discriminator_value::<P>(raw) {
                    None | Some(Value::Null) => None,
                    Some(Value::String(s)) => Some(s.clone()),
                    Some(other) => Some(other.to_string()),
                };
                let path = cx.path();
                cx.advise(Advisory::UnresolvedDiscriminator {
                    path,
                    family: P::FAMILY,
                    value,
                });
            }
            P::BASE
        }
    };
    P::hydrate_kind(kind, raw, cx)
}
