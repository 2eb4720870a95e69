//! Voice-assistant action adapter.
//!
//! Maps the action webhook payload onto [`CanonicalRequest`]. Session
//! continuity comes from `conversation.type`, identity from `user`, and
//! device capabilities from the current `surface`. State, intents, inputs
//! and session data have no representation on this platform and fall back
//! to the contract's no-op defaults.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::codec::{lenient, RequestCodec};
use crate::error::{json_kind, RequestError};
use crate::platforms::Platform;
use crate::request::capability::{classify_device, surface_has};
use crate::request::{CanonicalRequest, Capability, DeviceName, Surface};

/// Capabilities installed by [`CanonicalRequest::set_screen_interface`].
const SCREEN_BUNDLE: [Capability; 4] = [
    Capability::MediaResponseAudio,
    Capability::ScreenOutput,
    Capability::AudioOutput,
    Capability::WebBrowser,
];

/// Capabilities installed by [`CanonicalRequest::set_audio_interface`].
const AUDIO_BUNDLE: [Capability; 2] = [Capability::MediaResponseAudio, Capability::AudioOutput];

/// Key written into user storage by [`CanonicalRequest::set_user_id`].
const STORAGE_USER_ID_KEY: &str = "userId";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// The `user` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionUser {
    /// Platform-assigned user id.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// User locale.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Time of the user's previous interaction.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
    /// Granted permissions.
    #[serde(
        default,
        deserialize_with = "lenient::optional_seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub permissions: Option<Vec<String>>,
    /// Account-linking token.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Profile names, when the name permission was granted.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile: Option<UserProfile>,
    /// JSON-encoded storage blob owned by the dialogue engine.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub user_storage: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `user.profile` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Full display name.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Given name.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    /// Family name.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `conversation` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConversation {
    /// Conversation (session) id.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    /// Raw conversation type; see [`ConversationType`].
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub conversation_type: Option<String>,
    /// Opaque continuation token echoed back by the platform.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub conversation_token: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Canonical reading of `conversation.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationType {
    /// First turn of a session.
    New,
    /// Continuation of a prior turn.
    Active,
}

impl ConversationType {
    /// Interpret a raw wire value. Only the exact literal `"ACTIVE"` is a
    /// continuation; anything else, including absence, is a new session.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            Some("ACTIVE") => Self::Active,
            _ => Self::New,
        }
    }

    /// Literal wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Active => "ACTIVE",
        }
    }
}

/// One element of `inputs[]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionInput {
    /// Platform intent name.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    /// Raw utterances or events, in order.
    #[serde(default, deserialize_with = "lenient::seq")]
    pub raw_inputs: Vec<RawInput>,
    /// Intent arguments, in order.
    #[serde(
        default,
        deserialize_with = "lenient::optional_seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub arguments: Option<Vec<InputArgument>>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One element of `inputs[].rawInputs[]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    /// Input modality, e.g. `VOICE`, `KEYBOARD`, `TOUCH`.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Recognised query text.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One element of `inputs[].arguments[]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputArgument {
    /// Argument name.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Text as spoken or typed.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    /// Normalised text value.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,
    /// Structured payload, e.g. a sign-in or transaction result.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub extension: Option<ArgumentExtension>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `extension` object of an argument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgumentExtension {
    /// Type URL of the extension payload.
    #[serde(
        rename = "@type",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_tag: Option<String>,
    /// Result status, e.g. `OK` or `CANCELLED`.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `availableSurfaces`: a single surface or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AvailableSurfaces {
    /// A list of surfaces.
    Many(Vec<Surface>),
    /// One surface object.
    One(Surface),
}

impl AvailableSurfaces {
    /// Borrow every listed surface.
    pub fn surfaces(&self) -> Vec<&Surface> {
        match self {
            Self::Many(surfaces) => surfaces.iter().collect(),
            Self::One(surface) => vec![surface],
        }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// An action webhook request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleActionRequest {
    /// The user.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub user: Option<ActionUser>,
    /// Session continuity.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub conversation: Option<ActionConversation>,
    /// Utterances and events for this turn.
    #[serde(
        default,
        deserialize_with = "lenient::optional_seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub inputs: Option<Vec<ActionInput>>,
    /// The current device surface.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub surface: Option<Surface>,
    /// Whether the action runs in the developer sandbox.
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub is_in_sandbox: Option<bool>,
    /// Other surfaces the user owns.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub available_surfaces: Option<AvailableSurfaces>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GoogleActionRequest {
    /// Query text of the first raw input of the first input.
    pub fn raw_query(&self) -> Option<&str> {
        self.inputs
            .as_deref()?
            .first()?
            .raw_inputs
            .first()?
            .query
            .as_deref()
    }

    /// First argument named `name` across all inputs.
    pub fn argument(&self, name: &str) -> Option<&InputArgument> {
        self.inputs
            .as_deref()?
            .iter()
            .filter_map(|input| input.arguments.as_deref())
            .flatten()
            .find(|arg| arg.name.as_deref() == Some(name))
    }

    /// Whether the request comes from the developer sandbox.
    pub fn is_in_sandbox(&self) -> bool {
        self.is_in_sandbox.unwrap_or(false)
    }

    /// Known capabilities across all available surfaces, deduplicated.
    pub fn available_capabilities(&self) -> Vec<Capability> {
        let mut found: Vec<Capability> = Vec::new();
        let surfaces = self
            .available_surfaces
            .as_ref()
            .map(AvailableSurfaces::surfaces)
            .unwrap_or_default();
        for capability in surfaces.into_iter().flat_map(Surface::known) {
            if !found.contains(&capability) {
                found.push(capability);
            }
        }
        found
    }

    fn user_mut(&mut self) -> &mut ActionUser {
        self.user.get_or_insert_with(ActionUser::default)
    }
}

impl RequestCodec for GoogleActionRequest {
    const PLATFORM: Platform = Platform::GoogleAction;
}

impl CanonicalRequest for GoogleActionRequest {
    fn platform(&self) -> Platform {
        Platform::GoogleAction
    }

    fn session_id(&self) -> Option<&str> {
        self.conversation.as_ref()?.conversation_id.as_deref()
    }

    fn is_new_session(&self) -> bool {
        let raw = self
            .conversation
            .as_ref()
            .and_then(|c| c.conversation_type.as_deref());
        ConversationType::from_wire(raw) != ConversationType::Active
    }

    fn set_new_session(&mut self, is_new: bool) -> &mut Self {
        let kind = if is_new {
            ConversationType::New
        } else {
            ConversationType::Active
        };
        self.conversation
            .get_or_insert_with(ActionConversation::default)
            .conversation_type = Some(kind.as_str().to_owned());
        self
    }

    fn user_id(&self) -> Option<&str> {
        self.user.as_ref()?.user_id.as_deref()
    }

    /// Stores the id as `userId` inside the `user.userStorage` blob, not in
    /// `user.userId`. Existing storage keys are kept.
    // NOTE: every other adapter writes its top-level identity field. This
    // one keeps the storage convention for wire compatibility.
    fn set_user_id(&mut self, user_id: &str) -> Result<&mut Self, RequestError> {
        let user = self.user_mut();
        let mut storage = match user.user_storage.as_deref() {
            Some(raw) => serde_json::from_str::<Value>(raw).map_err(|e| {
                warn!(error = %e, "user storage is not valid JSON");
                RequestError::UserStorage(e.to_string())
            })?,
            None => Value::Object(Map::new()),
        };
        let Some(fields) = storage.as_object_mut() else {
            let found = json_kind(&storage);
            warn!(found, "user storage is not a JSON object");
            return Err(RequestError::UserStorage(format!("found {found}")));
        };
        fields.insert(
            STORAGE_USER_ID_KEY.to_owned(),
            Value::String(user_id.to_owned()),
        );
        user.user_storage = Some(storage.to_string());
        Ok(self)
    }

    fn locale(&self) -> Option<&str> {
        self.user.as_ref()?.locale.as_deref()
    }

    fn set_locale(&mut self, locale: &str) -> &mut Self {
        self.user_mut().locale = Some(locale.to_owned());
        self
    }

    fn access_token(&self) -> Option<&str> {
        self.user.as_ref()?.access_token.as_deref()
    }

    fn set_access_token(&mut self, token: &str) -> &mut Self {
        self.user_mut().access_token = Some(token.to_owned());
        self
    }

    fn user_storage(&self) -> Option<&str> {
        self.user.as_ref()?.user_storage.as_deref()
    }

    /// The wire format carries no timestamp, so the read time is reported.
    fn timestamp(&self) -> Option<String> {
        Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    fn has_screen_interface(&self) -> bool {
        surface_has(self.surface.as_ref(), Capability::ScreenOutput)
    }

    fn has_audio_interface(&self) -> bool {
        surface_has(self.surface.as_ref(), Capability::MediaResponseAudio)
    }

    fn has_web_browser_interface(&self) -> bool {
        surface_has(self.surface.as_ref(), Capability::WebBrowser)
    }

    fn set_screen_interface(&mut self) -> &mut Self {
        self.surface = Some(Surface::with(&SCREEN_BUNDLE));
        self
    }

    fn set_audio_interface(&mut self) -> &mut Self {
        self.surface = Some(Surface::with(&AUDIO_BUNDLE));
        self
    }

    fn device_name(&self) -> Option<DeviceName> {
        Some(classify_device(self.has_screen_interface(), || {
            self.has_web_browser_interface()
        }))
    }
}
