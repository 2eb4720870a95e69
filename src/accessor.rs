//! Dotted-path access into partially populated JSON.
//!
//! Paths are `.`-separated segments (`"user.userStorage"`,
//! `"inputs.0.rawInputs.0.query"`). Numeric segments index arrays. A missing
//! segment anywhere along the path resolves to `None`; nothing here panics
//! or errors on absent data.

use serde_json::Value;

/// Resolve `path` under `root`, or `None` if any segment is missing.
///
/// The empty path resolves to `root` itself.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split('.').try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Resolve `path` to a string slice, or `None` if absent or not a string.
pub fn lookup_str<'a>(root: &'a Value, path: &str) -> Option<&'a str> {
    lookup(root, path).and_then(Value::as_str)
}

/// Whether `path` resolves to a non-null value.
pub fn contains(root: &Value, path: &str) -> bool {
    lookup(root, path).is_some_and(|v| !v.is_null())
}
