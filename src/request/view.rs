//! Serializable snapshot of every canonical query on a request.

use serde::Serialize;

use super::{CanonicalRequest, DeviceName, Inputs, SessionData};
use crate::platforms::Platform;

/// What the dialogue engine would observe through [`CanonicalRequest`].
///
/// The synthesized timestamp is captured separately in [`Self::timestamp`]
/// and excluded from equality, since some platforms stamp the read time.
#[derive(Debug, Clone, Serialize)]
pub struct CanonicalView {
    /// Originating platform.
    pub platform: Platform,
    /// Session identifier.
    pub session_id: Option<String>,
    /// Whether the turn starts a new session.
    pub new_session: bool,
    /// User identifier.
    pub user_id: Option<String>,
    /// User locale.
    pub locale: Option<String>,
    /// Whether an access token is present. The token itself is not captured.
    pub has_access_token: bool,
    /// Opaque user storage string.
    pub user_storage: Option<String>,
    /// Session data.
    pub session_data: Option<SessionData>,
    /// Dialogue state.
    pub state: Option<String>,
    /// Intent name.
    pub intent_name: Option<String>,
    /// Canonical inputs.
    pub inputs: Option<Inputs>,
    /// Request timestamp at capture time.
    pub timestamp: Option<String>,
    /// Screen capability.
    pub screen: bool,
    /// Audio capability.
    pub audio: bool,
    /// Video capability.
    pub video: bool,
    /// Web browser capability.
    pub web_browser: bool,
    /// Device class.
    pub device_name: Option<DeviceName>,
}

impl CanonicalView {
    /// Query every canonical operation on `request`.
    pub fn capture<R: CanonicalRequest + ?Sized>(request: &R) -> Self {
        Self {
            platform: request.platform(),
            session_id: request.session_id().map(str::to_owned),
            new_session: request.is_new_session(),
            user_id: request.user_id().map(str::to_owned),
            locale: request.locale().map(str::to_owned),
            has_access_token: request.access_token().is_some(),
            user_storage: request.user_storage().map(str::to_owned),
            session_data: request.session_data().cloned(),
            state: request.state().map(str::to_owned),
            intent_name: request.intent_name().map(str::to_owned),
            inputs: request.inputs().cloned(),
            timestamp: request.timestamp(),
            screen: request.has_screen_interface(),
            audio: request.has_audio_interface(),
            video: request.has_video_interface(),
            web_browser: request.has_web_browser_interface(),
            device_name: request.device_name(),
        }
    }
}

impl PartialEq for CanonicalView {
    fn eq(&self, other: &Self) -> bool {
        self.platform == other.platform
            && self.session_id == other.session_id
            && self.new_session == other.new_session
            && self.user_id == other.user_id
            && self.locale == other.locale
            && self.has_access_token == other.has_access_token
            && self.user_storage == other.user_storage
            && self.session_data == other.session_data
            && self.state == other.state
            && self.intent_name == other.intent_name
            && self.inputs == other.inputs
            && self.screen == other.screen
            && self.audio == other.audio
            && self.video == other.video
            && self.web_browser == other.web_browser
            && self.device_name == other.device_name
    }
}
