//! Type Converter
//!
//! Converts a single raw JSON value into the Rust type an attribute is
//! declared with. Dispatch is static: every supported type implements
//! [`FromWire`], and models, enums and families get their implementations from
//! the declaring macros.

use super::advisory::Advisory;
use super::hydrate::{Hydrator, Segment};
use super::plain::json_type_name;
use super::{KeyStyle, TypeDesc};
use crate::error::{HydrateError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// Naive timestamp layouts accepted after RFC 3339, interpreted as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Strings accepted as boolean true (compared case-insensitively)
const TRUTHY: &[&str] = &["true", "t", "yes", "y", "1"];

/// A type an attribute can be declared with.
pub trait FromWire: Sized {
    /// True for array types; the hydrator skips non-sequence input for them
    const IS_SEQUENCE: bool = false;

    /// True when a JSON null is a meaningful value of the type. Null elements
    /// of arrays and maps of any other type are dropped.
    const ACCEPTS_NULL: bool = false;

    /// Declared type, as listed in the owning model's type map
    fn describe() -> TypeDesc;

    /// Build a value from its raw (non-null) wire form.
    fn from_wire(raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self>;
}

/// Deep conversion back to plain data.
pub trait ToPlain {
    fn to_plain(&self, keys: KeyStyle) -> Value;
}

fn type_mismatch(cx: &Hydrator<'_>, expected: &'static str, raw: &Value) -> HydrateError {
    HydrateError::TypeMismatch {
        path: cx.path(),
        expected,
        found: json_type_name(raw),
    }
}

fn invalid_number(cx: &Hydrator<'_>, value: impl Into<String>) -> HydrateError {
    HydrateError::InvalidNumber {
        path: cx.path(),
        value: value.into(),
    }
}

fn drop_null(cx: &mut Hydrator<'_>) {
    let path = cx.path();
    cx.advise(Advisory::NullElement { path });
}

impl FromWire for String {
    fn describe() -> TypeDesc {
        TypeDesc::String
    }

    fn from_wire(raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self> {
        match raw {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(type_mismatch(cx, "string", other)),
        }
    }
}

impl ToPlain for String {
    fn to_plain(&self, _keys: KeyStyle) -> Value {
        Value::String(self.clone())
    }
}

impl FromWire for i64 {
    fn describe() -> TypeDesc {
        TypeDesc::Integer
    }

    fn from_wire(raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self> {
        match raw {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(i);
                }
                // Integral floats such as 4.0 are accepted; 4.5 is not
                match n.as_f64() {
                    Some(f)
                        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
                    {
                        Ok(f as i64)
                    }
                    _ => Err(invalid_number(cx, n.to_string())),
                }
            }
            Value::String(s) => s.trim().parse().map_err(|_| invalid_number(cx, s.as_str())),
            other => Err(type_mismatch(cx, "integer", other)),
        }
    }
}

impl ToPlain for i64 {
    fn to_plain(&self, _keys: KeyStyle) -> Value {
        Value::from(*self)
    }
}

impl FromWire for f64 {
    fn describe() -> TypeDesc {
        TypeDesc::Float
    }

    fn from_wire(raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self> {
        match raw {
            Value::Number(n) => n.as_f64().ok_or_else(|| invalid_number(cx, n.to_string())),
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(f),
                _ => Err(invalid_number(cx, s.as_str())),
            },
            other => Err(type_mismatch(cx, "float", other)),
        }
    }
}

impl ToPlain for f64 {
    fn to_plain(&self, _keys: KeyStyle) -> Value {
        // Non-finite floats have no JSON form
        serde_json::Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl FromWire for bool {
    fn describe() -> TypeDesc {
        TypeDesc::Boolean
    }

    fn from_wire(raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self> {
        let text = match raw {
            Value::Bool(b) => return Ok(*b),
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            other => return Err(type_mismatch(cx, "boolean", other)),
        };
        Ok(TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(&text)))
    }
}

impl ToPlain for bool {
    fn to_plain(&self, _keys: KeyStyle) -> Value {
        Value::Bool(*self)
    }
}

/// Parse an RFC 3339 timestamp, falling back to naive layouts read as UTC.
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

impl FromWire for DateTime<Utc> {
    fn describe() -> TypeDesc {
        TypeDesc::DateTime
    }

    fn from_wire(raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self> {
        let Value::String(text) = raw else {
            return Err(type_mismatch(cx, "datetime string", raw));
        };
        parse_datetime(text).ok_or_else(|| HydrateError::InvalidDateTime {
            path: cx.path(),
            value: text.clone(),
        })
    }
}

impl ToPlain for DateTime<Utc> {
    fn to_plain(&self, _keys: KeyStyle) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromWire for NaiveDate {
    fn describe() -> TypeDesc {
        TypeDesc::Date
    }

    fn from_wire(raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self> {
        let Value::String(text) = raw else {
            return Err(type_mismatch(cx, "date string", raw));
        };
        let trimmed = text.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .or_else(|| parse_datetime(trimmed).map(|dt| dt.date_naive()))
            .ok_or_else(|| HydrateError::InvalidDate {
                path: cx.path(),
                value: text.clone(),
            })
    }
}

impl ToPlain for NaiveDate {
    fn to_plain(&self, _keys: KeyStyle) -> Value {
        Value::String(self.format("%Y-%m-%d").to_string())
    }
}

/// Untyped attributes keep the raw JSON.
impl FromWire for Value {
    const ACCEPTS_NULL: bool = true;

    fn describe() -> TypeDesc {
        TypeDesc::Object
    }

    fn from_wire(raw: &Value, _cx: &mut Hydrator<'_>) -> Result<Self> {
        Ok(raw.clone())
    }
}

impl ToPlain for Value {
    fn to_plain(&self, _keys: KeyStyle) -> Value {
        self.clone()
    }
}

impl<T: FromWire> FromWire for Vec<T> {
    const IS_SEQUENCE: bool = true;

    fn describe() -> TypeDesc {
        TypeDesc::Array(Box::new(T::describe()))
    }

    fn from_wire(raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self> {
        let Value::Array(items) = raw else {
            return Err(type_mismatch(cx, "array", raw));
        };
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            cx.scoped(Segment::Index(index), |cx| {
                if item.is_null() && !T::ACCEPTS_NULL {
                    drop_null(cx);
                } else {
                    out.push(T::from_wire(item, cx)?);
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

impl<T: ToPlain> ToPlain for Vec<T> {
    fn to_plain(&self, keys: KeyStyle) -> Value {
        Value::Array(self.iter().map(|item| item.to_plain(keys)).collect())
    }
}

/// Map keys are kept verbatim; only values are converted.
impl<T: FromWire> FromWire for BTreeMap<String, T> {
    fn describe() -> TypeDesc {
        TypeDesc::Map(Box::new(T::describe()))
    }

    fn from_wire(raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self> {
        let Value::Object(entries) = raw else {
            return Err(type_mismatch(cx, "object", raw));
        };
        let mut out = BTreeMap::new();
        for (key, value) in entries {
            cx.scoped(Segment::Key(key.clone()), |cx| {
                if value.is_null() && !T::ACCEPTS_NULL {
                    drop_null(cx);
                } else {
                    out.insert(key.clone(), T::from_wire(value, cx)?);
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

impl<T: ToPlain> ToPlain for BTreeMap<String, T> {
    fn to_plain(&self, keys: KeyStyle) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_plain(keys)))
                .collect(),
        )
    }
}
