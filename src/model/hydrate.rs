//! Attribute Hydrator
//!
//! Populates a model from an untyped payload by walking the model's static
//! attribute table. Wire keys (`lifecycleState`) and local keys
//! (`lifecycle_state`) are both accepted; supplying both for one attribute is
//! a caller error. Keys the model does not declare are ignored.

use super::advisory::{Advisory, AdvisoryLog, TracingAdvisory};
use super::Model;
use crate::error::{HydrateError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What to do when an array attribute receives a non-sequence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayMismatch {
    /// Leave the attribute untouched and record an advisory
    #[default]
    Skip,
    /// Fail with [`HydrateError::NonSequenceArray`]
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HydrateOptions {
    pub array_mismatch: ArrayMismatch,
}

/// One step of the location reported in errors and advisories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Hydration context: the injected advisory sink, options, and the current
/// location inside the payload.
pub struct Hydrator<'a> {
    log: &'a mut dyn AdvisoryLog,
    options: HydrateOptions,
    path: Vec<Segment>,
}

impl<'a> Hydrator<'a> {
    pub fn new(log: &'a mut dyn AdvisoryLog) -> Self {
        Self {
            log,
            options: HydrateOptions::default(),
            path: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: HydrateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> HydrateOptions {
        self.options
    }

    /// Current location, e.g. `vnicAttachments[1].timeCreated`
    pub fn path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                Segment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                Segment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
            }
        }
        out
    }

    pub fn advise(&mut self, advisory: Advisory) {
        self.log.record(advisory);
    }

    /// Run `f` with `segment` appended to the current path.
    pub fn scoped<T>(
        &mut self,
        segment: Segment,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.path.push(segment);
        let result = f(self);
        self.path.pop();
        result
    }

    /// Hydrate a fresh instance of `M`.
    pub fn hydrate<M: Model>(&mut self, raw: &Value) -> Result<M> {
        let mut model = M::default();
        self.hydrate_into(&mut model, raw)?;
        Ok(model)
    }

    /// Hydrate `target` in place. Non-mapping input leaves it unchanged, and
    /// so does a failure: attributes are staged on a copy and committed only
    /// once every one of them converted.
    pub fn hydrate_into<M: Model>(&mut self, target: &mut M, raw: &Value) -> Result<()> {
        let mut staged = target.clone();
        self.assign_all(&mut staged, raw)?;
        *target = staged;
        Ok(())
    }

    fn assign_all<M: Model>(&mut self, target: &mut M, raw: &Value) -> Result<()> {
        let Some(map) = raw.as_object() else {
            return Ok(());
        };

        for attribute in M::ATTRIBUTES {
            let by_wire = map.get(attribute.wire);
            let by_local = if attribute.local == attribute.wire {
                None
            } else {
                map.get(attribute.local)
            };

            let value = match (by_wire, by_local) {
                (Some(_), Some(_)) => {
                    return Err(HydrateError::DuplicateAttribute {
                        model: M::NAME,
                        local: attribute.local,
                        wire: attribute.wire,
                    });
                }
                (Some(value), None) | (None, Some(value)) => value,
                (None, None) => continue,
            };

            if value.is_null() {
                continue;
            }

            if attribute.sequence && !value.is_array() {
                // Kept for compatibility with services that send a scalar
                // here; it can hide a malformed response, hence the advisory.
                let path = self.child_path(attribute.wire);
                match self.options.array_mismatch {
                    ArrayMismatch::Skip => {
                        self.advise(Advisory::NonSequenceArray {
                            path,
                            model: M::NAME,
                        });
                        continue;
                    }
                    ArrayMismatch::Reject => return Err(HydrateError::NonSequenceArray { path }),
                }
            }

            self.scoped(Segment::Key(attribute.wire.to_string()), |cx| {
                target.assign(attribute.local, value, cx)
            })?;
        }

        Ok(())
    }

    fn child_path(&mut self, key: &str) -> String {
        self.path.push(Segment::Key(key.to_string()));
        let path = self.path();
        self.path.pop();
        path
    }
}

/// Hydrate a fresh `M`, sending advisories to `tracing`.
pub fn hydrate<M: Model>(raw: &Value) -> Result<M> {
    let mut log = TracingAdvisory;
    Hydrator::new(&mut log).hydrate(raw)
}
