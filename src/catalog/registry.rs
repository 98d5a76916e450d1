//! Model Registry - name-indexed catalog of shipped models
//!
//! Built once on first access and read-only afterwards. Lets callers that only
//! know a type by name (the CLI, response routers) hydrate it or inspect its
//! attribute and type maps.

use crate::error::{CatalogError, HydrateError};
use crate::model::polymorphic::resolve_subtype;
use crate::model::{Attribute, DynModel, FromWire, Hydrator, Model, Polymorphic};
use crate::models::{
    AccessDeniedTrafficNode, EgressTrafficSpec, Instance, InstanceShapeConfig,
    InstanceSourceDetails, InstanceSourceDetailsBase, InstanceSourceViaBootVolumeDetails,
    InstanceSourceViaImageDetails, InvisibleTrafficNode, PathAnalysisResult, Project,
    ResourceId, RoutingAction, SecurityAction, TrafficNode, TrafficNodeBase, TrafficRoute,
    VisibleTrafficNode, VnicAttachment,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

type HydrateFn = fn(&Value, &mut Hydrator<'_>) -> Result<Box<dyn DynModel>, HydrateError>;
type ResolveFn = fn(&Value) -> &'static str;

/// What a catalog entry describes
#[derive(Debug, Clone)]
pub enum EntryKind {
    Model {
        attributes: &'static [Attribute],
    },
    Family {
        discriminator: &'static str,
        /// Discriminator value -> concrete model name
        subtypes: Vec<(&'static str, &'static str)>,
        base: &'static str,
    },
}

/// A named, hydratable type
#[derive(Clone)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub kind: EntryKind,
    hydrate: HydrateFn,
    resolve: Option<ResolveFn>,
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl CatalogEntry {
    pub fn is_family(&self) -> bool {
        matches!(self.kind, EntryKind::Family { .. })
    }

    pub fn hydrate(
        &self,
        raw: &Value,
        cx: &mut Hydrator<'_>,
    ) -> Result<Box<dyn DynModel>, HydrateError> {
        (self.hydrate)(raw, cx)
    }

    /// Concrete model name a payload resolves to; `None` for plain models.
    pub fn resolve(&self, raw: &Value) -> Option<&'static str> {
        self.resolve.map(|resolve| resolve(raw))
    }
}

fn hydrate_boxed<T>(raw: &Value, cx: &mut Hydrator<'_>) -> Result<Box<dyn DynModel>, HydrateError>
where
    T: FromWire + DynModel + 'static,
{
    Ok(Box::new(T::from_wire(raw, cx)?))
}

fn resolve_name<P: Polymorphic>(raw: &Value) -> &'static str {
    P::subtype_name(resolve_subtype::<P>(raw))
}

fn model_entry<M: Model + FromWire>() -> CatalogEntry {
    CatalogEntry {
        name: M::NAME,
        kind: EntryKind::Model {
            attributes: M::ATTRIBUTES,
        },
        hydrate: hydrate_boxed::<M>,
        resolve: None,
    }
}

fn family_entry<P: Polymorphic + FromWire + DynModel>() -> CatalogEntry {
    CatalogEntry {
        name: P::FAMILY,
        kind: EntryKind::Family {
            discriminator: P::DISCRIMINATOR,
            subtypes: P::SUBTYPES
                .iter()
                .map(|(value, kind)| (*value, P::subtype_name(*kind)))
                .collect(),
            base: P::subtype_name(P::BASE),
        },
        hydrate: hydrate_boxed::<P>,
        resolve: Some(resolve_name::<P>),
    }
}

/// Global catalog
static CATALOG: OnceLock<BTreeMap<&'static str, CatalogEntry>> = OnceLock::new();

/// Get the catalog (built on first access)
pub fn get_catalog() -> &'static BTreeMap<&'static str, CatalogEntry> {
    CATALOG.get_or_init(|| {
        let entries = [
            model_entry::<Project>(),
            model_entry::<ResourceId>(),
            model_entry::<Instance>(),
            model_entry::<InstanceShapeConfig>(),
            model_entry::<VnicAttachment>(),
            family_entry::<InstanceSourceDetails>(),
            model_entry::<InstanceSourceDetailsBase>(),
            model_entry::<InstanceSourceViaImageDetails>(),
            model_entry::<InstanceSourceViaBootVolumeDetails>(),
            family_entry::<TrafficNode>(),
            model_entry::<TrafficNodeBase>(),
            model_entry::<VisibleTrafficNode>(),
            model_entry::<InvisibleTrafficNode>(),
            model_entry::<AccessDeniedTrafficNode>(),
            model_entry::<EgressTrafficSpec>(),
            model_entry::<RoutingAction>(),
            model_entry::<SecurityAction>(),
            model_entry::<TrafficRoute>(),
            model_entry::<PathAnalysisResult>(),
        ];

        let catalog: BTreeMap<_, _> = entries.into_iter().map(|e| (e.name, e)).collect();
        tracing::debug!("model catalog initialized with {} entries", catalog.len());
        catalog
    })
}

/// Get an entry by name (exact match first, then case-insensitive)
pub fn get_entry(name: &str) -> Option<&'static CatalogEntry> {
    let catalog = get_catalog();
    catalog.get(name).or_else(|| {
        catalog
            .values()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    })
}

/// Get all entry names (for listings and completion)
pub fn get_all_entry_names() -> Vec<&'static str> {
    get_catalog().keys().copied().collect()
}

/// Hydrate the type registered under `name`.
pub fn hydrate_by_name(
    name: &str,
    raw: &Value,
    cx: &mut Hydrator<'_>,
) -> Result<Box<dyn DynModel>, CatalogError> {
    let entry = get_entry(name).ok_or_else(|| CatalogError::UnknownModel(name.to_string()))?;
    Ok(entry.hydrate(raw, cx)?)
}

/// Resolve which concrete model a payload of family `name` would hydrate to.
pub fn resolve_by_name(name: &str, raw: &Value) -> Result<&'static str, CatalogError> {
    let entry = get_entry(name).ok_or_else(|| CatalogError::UnknownModel(name.to_string()))?;
    entry
        .resolve(raw)
        .ok_or_else(|| CatalogError::NotAFamily(entry.name.to_string()))
}
