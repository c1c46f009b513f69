//! Session-ending intents.

use lostfound_core::{RequestHandler, ResponseEnvelope, SkillError, TurnContext};

/// Stop and cancel end the session unconditionally, regardless of the
/// current conversation state. Registered ahead of all state-specific
/// predicates.
pub struct StopHandler;

impl RequestHandler for StopHandler {
    fn name(&self) -> &str {
        "StopHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_one_of_intents(&["AMAZON.StopIntent", "AMAZON.CancelIntent"])
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        Ok(ResponseEnvelope::builder()
            .speak(turn.t("EXIT")?)
            .end_session(true)
            .build())
    }
}

/// A bare "no" with no pending state prompt above it in the chain also ends
/// the session. Registered after every state-specific "no" predicate.
pub struct NoAtTopLevelHandler;

impl RequestHandler for NoAtTopLevelHandler {
    fn name(&self) -> &str {
        "NoAtTopLevelHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_intent("AMAZON.NoIntent")
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        Ok(ResponseEnvelope::builder()
            .speak(turn.t("EXIT")?)
            .end_session(true)
            .build())
    }
}
