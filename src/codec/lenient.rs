//! Tolerant field deserializers for webhook wire types.
//!
//! Platforms send partial and loosely typed JSON. Each helper here reads the
//! raw field as a [`Value`] first and never fails on a valid document: `null`
//! and values of the wrong shape resolve to absent (or empty), and scalars
//! are coerced where the reading is unambiguous (a numeric id becomes its
//! decimal text, the strings `"true"` / `"false"` become flags).
//!
//! Use with `#[serde(default, deserialize_with = "lenient::...")]`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::json_kind;

fn mismatch(expected: &'static str, found: &Value) {
    tracing::debug!(expected, found = json_kind(found), "ignoring mistyped field");
}

fn convert<T: DeserializeOwned>(value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed field");
            None
        }
    }
}

/// Optional string. Numbers and booleans keep their JSON text.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => {
            mismatch("string", &other);
            None
        }
    })
}

/// Optional boolean. Accepts the strings `"true"` and `"false"`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None => None,
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) if s == "true" => Some(true),
        Some(Value::String(s)) if s == "false" => Some(false),
        Some(other) => {
            mismatch("boolean", &other);
            None
        }
    })
}

/// Optional nested value of any type; unreadable values are absent.
pub(crate) fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(convert))
}

/// Sequence that reads `null` or a non-array as empty. Unreadable elements
/// are skipped.
pub(crate) fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(optional_seq(deserializer)?.unwrap_or_default())
}

/// Optional sequence: `null` or a non-array is absent. Unreadable elements
/// are skipped.
pub(crate) fn optional_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None => None,
        Some(Value::Array(items)) => Some(items.into_iter().filter_map(convert).collect()),
        Some(other) => {
            mismatch("array", &other);
            None
        }
    })
}
