//! Catch-all for intents no earlier predicate claimed. Must stay last in
//! the chain.

use lostfound_core::{RequestHandler, RequestKind, ResponseEnvelope, SkillError, TurnContext};

pub struct FallbackHandler;

impl RequestHandler for FallbackHandler {
    fn name(&self) -> &str {
        "FallbackHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_kind(RequestKind::IntentEvent)
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        tracing::debug!(
            target: "lostfound::handlers",
            intent = turn.envelope().intent_name.as_deref().unwrap_or(""),
            "no handler claimed intent"
        );
        Ok(ResponseEnvelope::builder()
            .speak(turn.t("FALLBACK")?)
            .reprompt(turn.t("FALLBACK_REPROMPT")?)
            .build())
    }
}
