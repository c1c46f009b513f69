//! Help prompt.

use lostfound_core::{RequestHandler, ResponseEnvelope, SkillError, TurnContext};

pub struct HelpHandler;

impl RequestHandler for HelpHandler {
    fn name(&self) -> &str {
        "HelpHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_intent("AMAZON.HelpIntent")
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        Ok(ResponseEnvelope::builder()
            .speak(turn.t("HELP")?)
            .reprompt(turn.t("HELP_REPROMPT")?)
            .build())
    }
}
