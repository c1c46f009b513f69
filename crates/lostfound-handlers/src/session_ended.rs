//! End-of-session bookkeeping.

use lostfound_core::{RequestHandler, RequestKind, ResponseEnvelope, SkillError, TurnContext};

/// Handles the platform's session-end notification. No speech goes out; the
/// end reason is logged, at error level when the platform reports a fault.
pub struct SessionEndedHandler;

impl RequestHandler for SessionEndedHandler {
    fn name(&self) -> &str {
        "SessionEndedHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_kind(RequestKind::SessionEnd)
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        let reason = turn
            .envelope()
            .end_reason
            .clone()
            .unwrap_or_else(|| "UNKNOWN".to_string());
        if reason == "ERROR" {
            tracing::error!(
                target: "lostfound::handlers",
                reason = %reason,
                "session ended by platform error"
            );
        } else {
            tracing::info!(
                target: "lostfound::handlers",
                reason = %reason,
                "session ended"
            );
        }
        Ok(ResponseEnvelope::empty())
    }
}
