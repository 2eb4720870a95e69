//! Surface capabilities and device classification.
//!
//! Capability names are compared exactly and case-sensitively against the
//! fixed vocabulary below; they are preserved verbatim on the wire in both
//! directions. Order within a surface carries no meaning.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::lenient;

/// A capability from the fixed vocabulary reported by a device surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// The device can render visual output.
    ScreenOutput,
    /// The device can play synthesized speech.
    AudioOutput,
    /// The device can play long-form media responses.
    MediaResponseAudio,
    /// The device can open web links.
    WebBrowser,
}

impl Capability {
    /// Every capability in the vocabulary.
    pub const ALL: [Capability; 4] = [
        Capability::ScreenOutput,
        Capability::AudioOutput,
        Capability::MediaResponseAudio,
        Capability::WebBrowser,
    ];

    /// Literal wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ScreenOutput => "actions.capability.SCREEN_OUTPUT",
            Self::AudioOutput => "actions.capability.AUDIO_OUTPUT",
            Self::MediaResponseAudio => "actions.capability.MEDIA_RESPONSE_AUDIO",
            Self::WebBrowser => "actions.capability.WEB_BROWSER",
        }
    }

    /// Parse a wire name. Matching is exact; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `{ "name": ... }` entry in a surface's capability list.
///
/// Names outside the vocabulary are kept as-is so they survive a round trip.
/// An entry without a name matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityRecord {
    /// Capability wire name.
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Capability> for CapabilityRecord {
    fn from(capability: Capability) -> Self {
        Self {
            name: Some(capability.as_str().to_owned()),
            extra: Map::new(),
        }
    }
}

/// Interaction capabilities reported by one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Capability entries; a missing, null or mistyped list reads as empty.
    #[serde(default, deserialize_with = "lenient::seq")]
    pub capabilities: Vec<CapabilityRecord>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Surface {
    /// Build a surface holding exactly `capabilities`, in order.
    pub fn with(capabilities: &[Capability]) -> Self {
        Self {
            capabilities: capabilities.iter().copied().map(Into::into).collect(),
            extra: Map::new(),
        }
    }

    /// Whether the surface lists `capability` (exact name match).
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities
            .iter()
            .any(|record| record.name.as_deref() == Some(capability.as_str()))
    }

    /// Recognised capabilities, in listing order, skipping unknown names.
    pub fn known(&self) -> Vec<Capability> {
        self.capabilities
            .iter()
            .filter_map(|record| record.name.as_deref().and_then(Capability::from_name))
            .collect()
    }
}

/// Whether an optional surface lists `capability`. An absent surface has none.
pub fn surface_has(surface: Option<&Surface>, capability: Capability) -> bool {
    surface.is_some_and(|s| s.has(capability))
}

/// Device class derived from surface capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceName {
    /// No screen: a smart speaker.
    #[serde(rename = "GOOGLE_ASSISTANT_SPEAKER")]
    Speaker,
    /// Screen without a web browser.
    #[serde(rename = "GOOGLE_ASSISTANT_SMARTDISPLAY")]
    SmartDisplay,
    /// Screen with a web browser.
    #[serde(rename = "GOOGLE_ASSISTANT_PHONE")]
    Phone,
}

impl DeviceName {
    /// Literal wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Speaker => "GOOGLE_ASSISTANT_SPEAKER",
            Self::SmartDisplay => "GOOGLE_ASSISTANT_SMARTDISPLAY",
            Self::Phone => "GOOGLE_ASSISTANT_PHONE",
        }
    }
}

impl fmt::Display for DeviceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a device: screen presence first, browser presence as tie-break.
///
/// `has_browser` is only evaluated when `has_screen` is true.
pub fn classify_device(has_screen: bool, has_browser: impl FnOnce() -> bool) -> DeviceName {
    if !has_screen {
        return DeviceName::Speaker;
    }
    if has_browser() {
        DeviceName::Phone
    } else {
        DeviceName::SmartDisplay
    }
}
