//! Error taxonomy for request hydration and mutation.
//!
//! Missing fields are never errors: every accessor resolves them to `None`.
//! The variants below cover genuinely malformed input only. Nothing here is
//! retried; the transport layer decides how to report a failure upstream.

use thiserror::Error;

use crate::platforms::Platform;

/// Errors raised while decoding, encoding or mutating a request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The wire text is not syntactically valid JSON.
    #[error("malformed request JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The wire text parsed, but its root is not a JSON object.
    #[error("request root must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON kind found at the root (e.g. "array", "null").
        found: &'static str,
    },

    /// The payload is an object but the request type rejected it.
    ///
    /// The built-in adapters read every field leniently, so only a custom
    /// [`crate::RequestCodec`] type with strict fields produces this.
    #[error("payload does not match the {platform} request shape: {source}")]
    Shape {
        /// Platform whose wire shape was expected.
        platform: Platform,
        /// Underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// The opaque user storage blob is not a JSON object.
    #[error("user storage is not a JSON object: {0}")]
    UserStorage(String),

    /// Encoding the request back to JSON failed.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// No adapter recognises the payload.
    #[error("payload does not match any supported platform")]
    UnknownPlatform,
}

/// Name of the JSON kind of `value`, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
