//! Inbound event and outbound response envelopes.
//!
//! The platform owns the wire format; the core consumes [`RequestEnvelope`]
//! and produces [`ResponseEnvelope`]. Audio and visual payloads are symbolic
//! references ([`DirectiveRef`]) resolved by the rendering collaborator, the
//! core never emits raw markup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The three event kinds the platform delivers to the skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    SessionStart,
    IntentEvent,
    SessionEnd,
}

/// A single filled slot: the raw spoken value plus any entity-resolution ids
/// supplied upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resolved_ids: Vec<String>,
}

impl Slot {
    pub fn raw(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            resolved_ids: Vec::new(),
        }
    }

    /// First resolved id if resolution ran, otherwise the raw value.
    pub fn resolved(&self) -> &str {
        self.resolved_ids
            .first()
            .map(String::as_str)
            .unwrap_or(&self.value)
    }
}

/// One incoming event, already parsed out of the platform request by the
/// gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub kind: RequestKind,
    #[serde(default)]
    pub intent_name: Option<String>,
    #[serde(default)]
    pub slots: BTreeMap<String, Slot>,
    pub locale: String,
    pub user_id: String,
    pub session_id: String,
    /// IANA time zone of the originating device, when the platform grants it.
    #[serde(default)]
    pub time_zone: Option<String>,
    /// Set on SessionEnd events (e.g. "USER_INITIATED", "ERROR").
    #[serde(default)]
    pub end_reason: Option<String>,
    /// Whether the device can render visual templates.
    #[serde(default)]
    pub supports_display: bool,
}

impl RequestEnvelope {
    /// Returns the resolved value of a slot, if present and non-empty.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .map(Slot::resolved)
            .filter(|v| !v.trim().is_empty())
    }
}

/// Symbolic reference to an audio or visual template plus its data payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveRef {
    pub token: String,
    pub template: String,
    pub data: serde_json::Value,
}

impl DirectiveRef {
    pub fn new(token: impl Into<String>, template: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            token: token.into(),
            template: template.into(),
            data,
        }
    }
}

/// The reply returned to the platform after one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_directive: Option<DirectiveRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_directive: Option<DirectiveRef>,
    pub end_session: bool,
}

impl ResponseEnvelope {
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }

    /// Empty reply that closes the session (SessionEnd acknowledgment).
    pub fn empty() -> Self {
        Self {
            speech: None,
            reprompt: None,
            audio_directive: None,
            visual_directive: None,
            end_session: true,
        }
    }
}

/// Builder for [`ResponseEnvelope`].
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    speech: Option<String>,
    reprompt: Option<String>,
    audio_directive: Option<DirectiveRef>,
    visual_directive: Option<DirectiveRef>,
    end_session: bool,
}

impl ResponseBuilder {
    pub fn speak(mut self, speech: impl Into<String>) -> Self {
        self.speech = Some(speech.into());
        self
    }

    pub fn reprompt(mut self, reprompt: impl Into<String>) -> Self {
        self.reprompt = Some(reprompt.into());
        self
    }

    pub fn audio(mut self, directive: DirectiveRef) -> Self {
        self.audio_directive = Some(directive);
        self
    }

    pub fn visual(mut self, directive: DirectiveRef) -> Self {
        self.visual_directive = Some(directive);
        self
    }

    pub fn end_session(mut self, end: bool) -> Self {
        self.end_session = end;
        self
    }

    pub fn build(self) -> ResponseEnvelope {
        ResponseEnvelope {
            speech: self.speech,
            reprompt: self.reprompt,
            audio_directive: self.audio_directive,
            visual_directive: self.visual_directive,
            end_session: self.end_session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_prefers_resolution_id() {
        let slot = Slot {
            value: "the keys".to_string(),
            resolved_ids: vec!["KEYS".to_string()],
        };
        assert_eq!(slot.resolved(), "KEYS");
        assert_eq!(Slot::raw("sofa").resolved(), "sofa");
    }

    #[test]
    fn envelope_slot_skips_blank_values() {
        let mut slots = BTreeMap::new();
        slots.insert("name".to_string(), Slot::raw("  "));
        let envelope = RequestEnvelope {
            kind: RequestKind::IntentEvent,
            intent_name: Some("FindThingIntent".to_string()),
            slots,
            locale: "en-US".to_string(),
            user_id: "u1".to_string(),
            session_id: "s1".to_string(),
            time_zone: None,
            end_reason: None,
            supports_display: false,
        };
        assert_eq!(envelope.slot("name"), None);
        assert_eq!(envelope.slot("missing"), None);
    }

    #[test]
    fn builder_sets_end_session() {
        let response = ResponseEnvelope::builder()
            .speak("Goodbye!")
            .end_session(true)
            .build();
        assert_eq!(response.speech.as_deref(), Some("Goodbye!"));
        assert!(response.end_session);
        assert!(response.reprompt.is_none());
    }
}
