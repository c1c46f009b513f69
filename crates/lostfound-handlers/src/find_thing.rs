//! Finding a thing: exact case-folded lookup against the registry.

use lostfound_core::{
    ConversationState, RequestHandler, ResponseEnvelope, SkillError, TurnContext,
};

/// Handles `FindThingIntent`. An empty registry redirects to registration
/// without touching durable state; a lookup miss is a normal branch, not a
/// fault.
pub struct FindThingHandler;

impl RequestHandler for FindThingHandler {
    fn name(&self) -> &str {
        "FindThingHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_intent("FindThingIntent")
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        if turn.attributes().things.is_empty() {
            turn.session.state = ConversationState::RegisterThing;
            return Ok(ResponseEnvelope::builder()
                .speak(turn.t("NOTHING_REMEMBERED")?)
                .reprompt(turn.t("NOTHING_REMEMBERED_REPROMPT")?)
                .build());
        }

        let name = turn.slot("name")?;
        turn.session.state = ConversationState::FindThing;

        match turn.attributes().things.find(&name).cloned() {
            Some(thing) => {
                turn.session.current_thing = Some(thing.clone());
                let speech = format!(
                    "{} {}",
                    turn.t_with(
                        "FOUND_THING",
                        &[("name", &thing.name), ("location", &thing.location)],
                    )?,
                    turn.t("ASK_TO_FIND_THING")?
                );
                Ok(ResponseEnvelope::builder()
                    .speak(speech)
                    .reprompt(turn.t("ASK_TO_FIND_THING_REPROMPT")?)
                    .build())
            }
            None => {
                let display_name = name.trim().to_uppercase();
                tracing::debug!(
                    target: "lostfound::handlers",
                    name = %display_name,
                    "lookup miss"
                );
                let speech = format!(
                    "{} {}",
                    turn.t_with("NOT_FOUND_THING", &[("name", &display_name)])?,
                    turn.t("ASK_TO_FIND_THING")?
                );
                Ok(ResponseEnvelope::builder()
                    .speak(speech)
                    .reprompt(turn.t("ASK_TO_FIND_THING_REPROMPT")?)
                    .build())
            }
        }
    }
}
