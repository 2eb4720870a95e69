//! Platform adapters and static dispatch over them.
//!
//! Each adapter is an independent type implementing [`CanonicalRequest`].
//! [`AnyRequest`] holds whichever adapter a payload was hydrated as, and
//! forwards every canonical operation to it by `match`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::accessor;
use crate::codec::{JsonInput, RequestCodec};
use crate::error::RequestError;
use crate::request::{CanonicalRequest, DeviceName, Inputs, SessionData};

pub mod google_action;
pub mod google_business;

pub use google_action::GoogleActionRequest;
pub use google_business::GoogleBusinessRequest;

/// Conversational platform a payload originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Voice-assistant action webhook.
    GoogleAction,
    /// Business messaging webhook.
    GoogleBusiness,
}

impl Platform {
    /// Every supported platform.
    pub const ALL: [Platform; 2] = [Platform::GoogleAction, Platform::GoogleBusiness];

    /// Stable kebab-case name used in config and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoogleAction => "google-action",
            Self::GoogleBusiness => "google-business",
        }
    }

    /// Guess the platform from the shape of a raw payload.
    ///
    /// Business messaging payloads carry string `agent` and `conversationId`
    /// fields at the root. Action payloads carry at least one of
    /// `conversation`, `surface`, `inputs` or `user`.
    pub fn detect(payload: &Value) -> Option<Self> {
        if accessor::lookup_str(payload, "agent").is_some()
            && accessor::lookup_str(payload, "conversationId").is_some()
        {
            return Some(Self::GoogleBusiness);
        }
        ["conversation", "surface", "inputs", "user"]
            .iter()
            .any(|key| accessor::contains(payload, key))
            .then_some(Self::GoogleAction)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised platform name.
#[derive(Debug, Error)]
#[error("unknown platform '{0}' (expected google-action or google-business)")]
pub struct ParsePlatformError(String);

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParsePlatformError(s.to_owned()))
    }
}

/// A request hydrated as one of the supported platform adapters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyRequest {
    /// Voice-assistant action request.
    GoogleAction(GoogleActionRequest),
    /// Business messaging request.
    GoogleBusiness(GoogleBusinessRequest),
}

macro_rules! delegate {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            AnyRequest::GoogleAction($inner) => $body,
            AnyRequest::GoogleBusiness($inner) => $body,
        }
    };
}

impl AnyRequest {
    /// Hydrate `input` as the given platform's request type.
    ///
    /// # Errors
    ///
    /// Propagates the platform codec's parse, root and shape errors.
    pub fn hydrate<'a>(
        platform: Platform,
        input: impl Into<JsonInput<'a>>,
    ) -> Result<Self, RequestError> {
        Ok(match platform {
            Platform::GoogleAction => Self::GoogleAction(GoogleActionRequest::from_json(input)?),
            Platform::GoogleBusiness => {
                Self::GoogleBusiness(GoogleBusinessRequest::from_json(input)?)
            }
        })
    }

    /// Detect the platform from the payload shape, then hydrate.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::UnknownPlatform`] if no adapter recognises the
    /// payload, plus any error from [`AnyRequest::hydrate`].
    pub fn detect_and_hydrate<'a>(input: impl Into<JsonInput<'a>>) -> Result<Self, RequestError> {
        let value = input.into().into_value()?;
        let platform = Platform::detect(&value).ok_or(RequestError::UnknownPlatform)?;
        Self::hydrate(platform, value)
    }

    /// Encode the wrapped request as plain JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<Value, RequestError> {
        delegate!(self, r => r.to_json())
    }
}

impl From<GoogleActionRequest> for AnyRequest {
    fn from(request: GoogleActionRequest) -> Self {
        Self::GoogleAction(request)
    }
}

impl From<GoogleBusinessRequest> for AnyRequest {
    fn from(request: GoogleBusinessRequest) -> Self {
        Self::GoogleBusiness(request)
    }
}

impl CanonicalRequest for AnyRequest {
    fn platform(&self) -> Platform {
        delegate!(self, r => r.platform())
    }

    fn session_id(&self) -> Option<&str> {
        delegate!(self, r => r.session_id())
    }

    fn is_new_session(&self) -> bool {
        delegate!(self, r => r.is_new_session())
    }

    fn set_new_session(&mut self, is_new: bool) -> &mut Self {
        delegate!(self, r => { r.set_new_session(is_new); });
        self
    }

    fn session_data(&self) -> Option<&SessionData> {
        delegate!(self, r => r.session_data())
    }

    fn set_session_data(&mut self, data: SessionData) -> &mut Self {
        delegate!(self, r => { r.set_session_data(data); });
        self
    }

    fn add_session_data(&mut self, key: &str, value: Value) -> &mut Self {
        delegate!(self, r => { r.add_session_data(key, value); });
        self
    }

    fn state(&self) -> Option<&str> {
        delegate!(self, r => r.state())
    }

    fn set_state(&mut self, state: &str) -> &mut Self {
        delegate!(self, r => { r.set_state(state); });
        self
    }

    fn user_id(&self) -> Option<&str> {
        delegate!(self, r => r.user_id())
    }

    fn set_user_id(&mut self, user_id: &str) -> Result<&mut Self, RequestError> {
        delegate!(self, r => { r.set_user_id(user_id)?; });
        Ok(self)
    }

    fn locale(&self) -> Option<&str> {
        delegate!(self, r => r.locale())
    }

    fn set_locale(&mut self, locale: &str) -> &mut Self {
        delegate!(self, r => { r.set_locale(locale); });
        self
    }

    fn access_token(&self) -> Option<&str> {
        delegate!(self, r => r.access_token())
    }

    fn set_access_token(&mut self, token: &str) -> &mut Self {
        delegate!(self, r => { r.set_access_token(token); });
        self
    }

    fn user_storage(&self) -> Option<&str> {
        delegate!(self, r => r.user_storage())
    }

    fn intent_name(&self) -> Option<&str> {
        delegate!(self, r => r.intent_name())
    }

    fn set_intent_name(&mut self, name: &str) -> &mut Self {
        delegate!(self, r => { r.set_intent_name(name); });
        self
    }

    fn inputs(&self) -> Option<&Inputs> {
        delegate!(self, r => r.inputs())
    }

    fn set_inputs(&mut self, inputs: Inputs) -> &mut Self {
        delegate!(self, r => { r.set_inputs(inputs); });
        self
    }

    fn add_input(&mut self, name: &str, value: &str) -> &mut Self {
        delegate!(self, r => { r.add_input(name, value); });
        self
    }

    fn timestamp(&self) -> Option<String> {
        delegate!(self, r => r.timestamp())
    }

    fn set_timestamp(&mut self, timestamp: &str) -> &mut Self {
        delegate!(self, r => { r.set_timestamp(timestamp); });
        self
    }

    fn has_screen_interface(&self) -> bool {
        delegate!(self, r => r.has_screen_interface())
    }

    fn has_audio_interface(&self) -> bool {
        delegate!(self, r => r.has_audio_interface())
    }

    fn has_video_interface(&self) -> bool {
        delegate!(self, r => r.has_video_interface())
    }

    fn has_web_browser_interface(&self) -> bool {
        delegate!(self, r => r.has_web_browser_interface())
    }

    fn set_screen_interface(&mut self) -> &mut Self {
        delegate!(self, r => { r.set_screen_interface(); });
        self
    }

    fn set_audio_interface(&mut self) -> &mut Self {
        delegate!(self, r => { r.set_audio_interface(); });
        self
    }

    fn set_video_interface(&mut self) -> &mut Self {
        delegate!(self, r => { r.set_video_interface(); });
        self
    }

    fn device_name(&self) -> Option<DeviceName> {
        delegate!(self, r => r.device_name())
    }
}
