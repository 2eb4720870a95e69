//! Conversion between adapter instances and plain JSON.
//!
//! Only data fields travel over the wire. Behavior is reattached by
//! construction: [`RequestCodec::hydrate`] is the explicit factory that turns
//! plain data into a typed adapter, so `from_json(to_json(r))` answers every
//! canonical query the same way `r` does.
//!
//! Any JSON object hydrates. Nested fields of the wrong shape resolve to
//! absent through the [`lenient`] field deserializers, so only invalid text
//! and non-object roots are errors for the built-in adapters.

pub(crate) mod lenient;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{json_kind, RequestError};
use crate::platforms::Platform;

/// Input accepted by [`RequestCodec::from_json`]: wire text or parsed data.
#[derive(Debug, Clone)]
pub enum JsonInput<'a> {
    /// Raw wire text, not yet parsed.
    Text(&'a str),
    /// An already-parsed JSON value.
    Value(Value),
}

impl<'a> From<&'a str> for JsonInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for JsonInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl From<Value> for JsonInput<'_> {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl JsonInput<'_> {
    /// Parse text input; pass values through.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Parse`] if the text is not valid JSON.
    pub fn into_value(self) -> Result<Value, RequestError> {
        match self {
            Self::Text(text) => serde_json::from_str(text).map_err(RequestError::Parse),
            Self::Value(value) => Ok(value),
        }
    }
}

/// Plain-data encoding for a platform request type.
pub trait RequestCodec: Serialize + DeserializeOwned {
    /// Platform whose wire shape this type models.
    const PLATFORM: Platform;

    /// Encode the request's own fields as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Encode`] if serialization fails.
    fn to_json(&self) -> Result<Value, RequestError> {
        serde_json::to_value(self).map_err(RequestError::Encode)
    }

    /// Encode the request as compact wire text.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Encode`] if serialization fails.
    fn to_json_string(&self) -> Result<String, RequestError> {
        serde_json::to_string(self).map_err(RequestError::Encode)
    }

    /// Decode wire text or an already-parsed value into a typed request.
    ///
    /// Text is parsed to plain data first; the root object is then hydrated
    /// exactly once and nested objects stay plain data.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Parse`] for invalid JSON text,
    /// [`RequestError::NotAnObject`] if the root is not an object, and
    /// [`RequestError::Shape`] if the implementing type rejects the object.
    fn from_json<'a>(input: impl Into<JsonInput<'a>>) -> Result<Self, RequestError> {
        let value = input.into().into_value()?;
        Self::hydrate(value)
    }

    /// Build a fully-behaved request from plain data.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::NotAnObject`] if `value` is not an object and
    /// [`RequestError::Shape`] if the implementing type rejects the object.
    fn hydrate(value: Value) -> Result<Self, RequestError> {
        if !value.is_object() {
            return Err(RequestError::NotAnObject {
                found: json_kind(&value),
            });
        }
        let request = serde_json::from_value(value).map_err(|source| RequestError::Shape {
            platform: Self::PLATFORM,
            source,
        })?;
        tracing::debug!(platform = %Self::PLATFORM, "hydrated request");
        Ok(request)
    }
}
