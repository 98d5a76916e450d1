//! cloudhydrate - hydrate cloud API payloads into typed models
//!
//! Raw JSON responses from a cloud API are turned into strongly typed model
//! values and back into plain data:
//!
//! - [`model`]: the hydration engine (type converter, enum validation,
//!   polymorphic subtype resolution, structural equality and hashing)
//! - [`models`]: the shipped API models, declared with [`wire_model!`] and
//!   [`wire_enum!`]
//! - [`catalog`]: name-indexed access to the shipped models
//! - [`payload`]: loading payloads from files or stdin

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod models;
pub mod payload;

// Referenced by the declarative model macros.
#[doc(hidden)]
pub use serde_json;

pub use error::{CatalogError, HydrateError};
pub use model::{Field, Hydrator, Model};
