//! The canonical request contract.
//!
//! [`CanonicalRequest`] is the only surface the dialogue engine programs
//! against. Each platform adapter implements it over its own wire types.
//!
//! Fallback policy: an adapter that cannot represent a concept leaves the
//! default method in place. Default setters return the unchanged receiver
//! and default getters return `None` (or `false` for predicates). No method
//! fails because an operation is unsupported; only
//! [`CanonicalRequest::set_user_id`] can fail, and only on malformed input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RequestError;
use crate::platforms::Platform;

pub mod capability;
pub mod view;

pub use capability::{Capability, DeviceName, Surface};
pub use view::CanonicalView;

/// Opaque per-session key/value data owned by the dialogue engine.
pub type SessionData = Map<String, Value>;

/// Canonical inputs (slots) keyed by name.
pub type Inputs = BTreeMap<String, Input>;

/// A single canonical input value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// Input name.
    pub name: String,
    /// Raw spoken or typed value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Normalised value, when a resolver produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Identifier of the resolved entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Input {
    /// Input with a name and raw value only.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            key: None,
            id: None,
        }
    }
}

/// Record that `operation` is a no-op on `platform`.
fn unsupported(platform: Platform, operation: &'static str) {
    tracing::trace!(%platform, operation, "operation not supported, ignoring");
}

/// Operations the dialogue engine may invoke on any inbound request.
///
/// Setters take `&mut self` and hand the same receiver back so calls chain.
pub trait CanonicalRequest {
    /// Platform this request was hydrated as.
    fn platform(&self) -> Platform;

    // ── Session ─────────────────────────────────────────────────────

    /// Identifier of the current session, if the platform reports one.
    fn session_id(&self) -> Option<&str> {
        None
    }

    /// Whether this turn starts a new session.
    fn is_new_session(&self) -> bool;

    /// Mark the session as new or continuing.
    fn set_new_session(&mut self, is_new: bool) -> &mut Self;

    /// Session data carried with the request.
    fn session_data(&self) -> Option<&SessionData> {
        None
    }

    /// Replace all session data.
    fn set_session_data(&mut self, _data: SessionData) -> &mut Self {
        unsupported(self.platform(), "set_session_data");
        self
    }

    /// Insert or overwrite one session data entry.
    fn add_session_data(&mut self, _key: &str, _value: Value) -> &mut Self {
        unsupported(self.platform(), "add_session_data");
        self
    }

    /// Dialogue state name.
    fn state(&self) -> Option<&str> {
        None
    }

    /// Set the dialogue state name.
    fn set_state(&mut self, _state: &str) -> &mut Self {
        unsupported(self.platform(), "set_state");
        self
    }

    // ── User ────────────────────────────────────────────────────────

    /// Stable user identifier for the conversation.
    fn user_id(&self) -> Option<&str>;

    /// Assign the user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::UserStorage`] when the adapter keeps the id in
    /// a storage blob that cannot be parsed.
    fn set_user_id(&mut self, user_id: &str) -> Result<&mut Self, RequestError>;

    /// User locale (BCP 47 tag).
    fn locale(&self) -> Option<&str>;

    /// Set the user locale.
    fn set_locale(&mut self, locale: &str) -> &mut Self;

    /// Account-linking access token.
    fn access_token(&self) -> Option<&str> {
        None
    }

    /// Set the account-linking access token.
    fn set_access_token(&mut self, _token: &str) -> &mut Self {
        unsupported(self.platform(), "set_access_token");
        self
    }

    /// Opaque user storage string, passed through untouched.
    fn user_storage(&self) -> Option<&str> {
        None
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Name of the matched intent.
    fn intent_name(&self) -> Option<&str> {
        None
    }

    /// Set the matched intent name.
    fn set_intent_name(&mut self, _name: &str) -> &mut Self {
        unsupported(self.platform(), "set_intent_name");
        self
    }

    /// Canonical inputs.
    fn inputs(&self) -> Option<&Inputs> {
        None
    }

    /// Replace all canonical inputs.
    fn set_inputs(&mut self, _inputs: Inputs) -> &mut Self {
        unsupported(self.platform(), "set_inputs");
        self
    }

    /// Add one canonical input by name and raw value.
    fn add_input(&mut self, _name: &str, _value: &str) -> &mut Self {
        unsupported(self.platform(), "add_input");
        self
    }

    /// Request timestamp (RFC 3339).
    fn timestamp(&self) -> Option<String> {
        None
    }

    /// Set the request timestamp.
    fn set_timestamp(&mut self, _timestamp: &str) -> &mut Self {
        unsupported(self.platform(), "set_timestamp");
        self
    }

    // ── Device ──────────────────────────────────────────────────────

    /// Whether the device can render visual output.
    fn has_screen_interface(&self) -> bool {
        false
    }

    /// Whether the device can play audio responses.
    fn has_audio_interface(&self) -> bool {
        false
    }

    /// Whether the device can play video.
    fn has_video_interface(&self) -> bool {
        false
    }

    /// Whether the device can open web links.
    fn has_web_browser_interface(&self) -> bool {
        false
    }

    /// Overwrite the device surface with a screen device bundle.
    fn set_screen_interface(&mut self) -> &mut Self {
        unsupported(self.platform(), "set_screen_interface");
        self
    }

    /// Overwrite the device surface with an audio-only bundle.
    fn set_audio_interface(&mut self) -> &mut Self {
        unsupported(self.platform(), "set_audio_interface");
        self
    }

    /// Overwrite the device surface with a video-capable bundle.
    fn set_video_interface(&mut self) -> &mut Self {
        unsupported(self.platform(), "set_video_interface");
        self
    }

    /// Device class, if the platform can classify devices.
    fn device_name(&self) -> Option<DeviceName> {
        None
    }
}
