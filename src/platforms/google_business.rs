//! Business messaging adapter.
//!
//! Business messaging identifies the user by conversation: `conversationId`
//! doubles as both session and user id. The platform is stateless, so
//! session newness and session data ride along in adapter-owned fields
//! (`isNewSession`, `sessionData`) that the engine fills between turns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{lenient, RequestCodec};
use crate::error::RequestError;
use crate::platforms::Platform;
use crate::request::{CanonicalRequest, SessionData};

/// Session data key holding the dialogue state.
pub const STATE_KEY: &str = "_STATE_";

/// The `message` object of a text message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMessage {
    /// Platform message id.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Resource name of the message.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message text.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Time the user sent the message.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `suggestionResponse` object sent when a user taps a suggestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    /// Resource name of the message the suggestion belonged to.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Postback payload attached to the suggestion.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub postback_data: Option<String>,
    /// Time the user tapped the suggestion.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// Suggestion label.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Suggestion kind, e.g. `REPLY` or `ACTION`.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub suggestion_type: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `context.userInfo` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// User display name.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Locale reported by the user's device.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub user_device_locale: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `context` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessContext {
    /// How the user entered the conversation.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    /// Place id of the location the conversation started from.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// Locale negotiated between the user and the agent.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub resolved_locale: Option<String>,
    /// Information about the user.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_info: Option<UserInfo>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A business messaging webhook request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleBusinessRequest {
    /// Agent resource name.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Conversation id; also the user id on this platform.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    /// Agent-defined identifier.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub custom_agent_id: Option<String>,
    /// Request id, unique per delivery.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Text message, when the user typed.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<BusinessMessage>,
    /// Suggestion tap, when the user chose a suggestion.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub suggestion_response: Option<SuggestionResponse>,
    /// Conversation context.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub context: Option<BusinessContext>,
    /// Time the platform sent the webhook.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub send_time: Option<String>,
    /// Session marker set by the engine; absent means a new session.
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub is_new_session: Option<bool>,
    /// Session data carried between turns.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_data: Option<SessionData>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GoogleBusinessRequest {
    /// Typed message text, or the label of the tapped suggestion.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(|m| m.text.as_deref())
            .or_else(|| self.suggestion_response.as_ref()?.text.as_deref())
    }

    /// Postback payload of the tapped suggestion.
    pub fn postback_data(&self) -> Option<&str> {
        self.suggestion_response.as_ref()?.postback_data.as_deref()
    }

    fn session_data_mut(&mut self) -> &mut SessionData {
        self.session_data.get_or_insert_with(SessionData::new)
    }
}

impl RequestCodec for GoogleBusinessRequest {
    const PLATFORM: Platform = Platform::GoogleBusiness;
}

impl CanonicalRequest for GoogleBusinessRequest {
    fn platform(&self) -> Platform {
        Platform::GoogleBusiness
    }

    fn session_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    fn is_new_session(&self) -> bool {
        self.is_new_session.unwrap_or(true)
    }

    fn set_new_session(&mut self, is_new: bool) -> &mut Self {
        self.is_new_session = Some(is_new);
        self
    }

    fn session_data(&self) -> Option<&SessionData> {
        self.session_data.as_ref()
    }

    fn set_session_data(&mut self, data: SessionData) -> &mut Self {
        self.session_data = Some(data);
        self
    }

    fn add_session_data(&mut self, key: &str, value: Value) -> &mut Self {
        self.session_data_mut().insert(key.to_owned(), value);
        self
    }

    fn state(&self) -> Option<&str> {
        self.session_data.as_ref()?.get(STATE_KEY)?.as_str()
    }

    fn set_state(&mut self, state: &str) -> &mut Self {
        self.add_session_data(STATE_KEY, Value::String(state.to_owned()))
    }

    fn user_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    fn set_user_id(&mut self, user_id: &str) -> Result<&mut Self, RequestError> {
        self.conversation_id = Some(user_id.to_owned());
        Ok(self)
    }

    fn locale(&self) -> Option<&str> {
        let context = self.context.as_ref()?;
        context
            .resolved_locale
            .as_deref()
            .or_else(|| context.user_info.as_ref()?.user_device_locale.as_deref())
    }

    fn set_locale(&mut self, locale: &str) -> &mut Self {
        self.context
            .get_or_insert_with(BusinessContext::default)
            .resolved_locale = Some(locale.to_owned());
        self
    }

    fn timestamp(&self) -> Option<String> {
        self.send_time.clone()
    }

    fn set_timestamp(&mut self, timestamp: &str) -> &mut Self {
        self.send_time = Some(timestamp.to_owned());
        self
    }

    /// Chat surfaces always render text and cards.
    fn has_screen_interface(&self) -> bool {
        true
    }
}
