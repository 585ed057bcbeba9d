//! Typed record decoding
//!
//! Records are checked against their declared required fields before serde
//! sees them, so a missing field is reported by name.

use super::types::{Page, Record, RecordShape};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static SERDE_FIELD: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?:missing|unknown|duplicate) field `([^`]+)`").ok());

/// Follow a dot path (`sites.site`) into a JSON value
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Decode a page of records from a validated body
pub fn decode_page<T: Record>(body: &Value, shape: &RecordShape) -> Result<Page<T>> {
    let records = match extract_path(body, shape.records_path) {
        Some(Value::Array(items)) => items
            .iter()
            .map(decode_record::<T>)
            .collect::<Result<Vec<_>>>()?,
        Some(Value::Null) | None => {
            return Err(Error::malformed(
                T::KIND,
                Some(last_segment(shape.records_path)),
                format!("missing record list at '{}'", shape.records_path),
            ))
        }
        Some(other) => {
            return Err(Error::malformed(
                T::KIND,
                Some(last_segment(shape.records_path)),
                format!("expected a list at '{}', got {}", shape.records_path, type_name(other)),
            ))
        }
    };

    let reported_total = shape
        .total_path
        .and_then(|path| extract_path(body, path))
        .and_then(Value::as_u64);

    Ok(Page {
        records,
        reported_total,
    })
}

/// Decode a single record found at `path`
pub fn decode_one<T: Record>(body: &Value, path: &str) -> Result<T> {
    match extract_path(body, path) {
        Some(Value::Null) | None => Err(Error::malformed(
            T::KIND,
            Some(last_segment(path)),
            format!("missing record at '{path}'"),
        )),
        Some(value) => decode_record(value),
    }
}

/// Check required fields, then deserialize
fn decode_record<T: Record>(value: &Value) -> Result<T> {
    let Some(object) = value.as_object() else {
        return Err(Error::malformed(
            T::KIND,
            None,
            format!("expected an object, got {}", type_name(value)),
        ));
    };

    if let Some(missing) = T::REQUIRED
        .iter()
        .find(|field| object.get(**field).map_or(true, Value::is_null))
    {
        return Err(Error::malformed(
            T::KIND,
            Some((*missing).to_string()),
            "missing required field",
        ));
    }

    T::deserialize(value).map_err(|e| {
        let message = e.to_string();
        Error::malformed(T::KIND, serde_field(&message), message)
    })
}

fn serde_field(message: &str) -> Option<String> {
    SERDE_FIELD
        .as_ref()?
        .captures(message)
        .map(|caps| caps[1].to_string())
}

fn last_segment(path: &str) -> String {
    path.rsplit('.').next().unwrap_or(path).to_string()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
