//! Model catalog
//!
//! Name-based access to the shipped models for callers that only learn the
//! type at runtime. Hydration itself stays statically dispatched; the catalog
//! only maps a name to the monomorphized entry point.
//!
//! # Example
//!
//! ```ignore
//! use cloudhydrate::catalog::hydrate_by_name;
//! use cloudhydrate::model::{Hydrator, TracingAdvisory};
//!
//! let mut log = TracingAdvisory;
//! let node = hydrate_by_name("TrafficNode", &payload, &mut Hydrator::new(&mut log))?;
//! println!("{}", node.type_name());
//! ```

mod registry;

pub use registry::*;
