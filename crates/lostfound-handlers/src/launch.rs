//! Session launch: greets the user and routes them toward registering or
//! finding things depending on what they already track.

use lostfound_core::{
    is_day_time, local_hour, ConversationState, DirectiveRef, RequestHandler, RequestKind,
    ResponseEnvelope, SkillError, TurnContext,
};

use crate::directives::{
    AUDIO_LAUNCH_NO_THINGS, AUDIO_LAUNCH_WITH_THINGS, TOKEN_TITLE, VISUAL_HOME, VISUAL_TITLE,
};

/// Handles skill launch, an explicit start-over, and "yes" to playing again.
pub struct LaunchHandler;

impl RequestHandler for LaunchHandler {
    fn name(&self) -> &str {
        "LaunchHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_kind(RequestKind::SessionStart)
            || turn.is_intent("AMAZON.StartOverIntent")
            || turn.is_yes(ConversationState::PlayAgain)
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        // Sounds and visuals key off the user's time of day, resolved once
        // per session. An unknown or missing zone counts as day.
        if turn.session.is_day_time.is_none() {
            let hour = turn.envelope().time_zone.as_deref().and_then(local_hour);
            let day = hour.map(is_day_time).unwrap_or(true);
            turn.session.is_day_time = Some(day);
            tracing::debug!(
                target: "lostfound::handlers",
                hour = ?hour,
                is_day_time = day,
                "resolved time of day"
            );
        }
        let day = turn.session.is_day_time.unwrap_or(true);

        match turn.attributes().things.newest().cloned() {
            None => {
                // Nothing tracked yet: offer the first shop visit.
                turn.session.state = ConversationState::VisitLostThenFoundShop;
                let speech = format!(
                    "{} {}",
                    turn.t("GENERIC_GREETING")?,
                    turn.t("GOTO_LOST_THEN_FOUND_PROMPT")?
                );
                let mut builder = ResponseEnvelope::builder()
                    .speak(speech)
                    .reprompt(turn.t("GOTO_LOST_THEN_FOUND_REPROMPT")?)
                    .audio(DirectiveRef::new(
                        TOKEN_TITLE,
                        AUDIO_LAUNCH_NO_THINGS,
                        serde_json::json!({ "isDayTime": day }),
                    ));
                if turn.envelope().supports_display {
                    builder = builder.visual(DirectiveRef::new(
                        TOKEN_TITLE,
                        VISUAL_TITLE,
                        serde_json::json!({ "isDayTime": day }),
                    ));
                }
                Ok(builder.build())
            }
            Some(newest) => {
                // Returning user: offer to find the most recent thing.
                turn.session.state = ConversationState::FindThing;
                turn.session.current_thing = Some(newest.clone());
                let names: Vec<String> = turn
                    .attributes()
                    .things
                    .iter()
                    .map(|t| t.name.clone())
                    .collect();
                let speech = turn.t_with(
                    "WELCOME_BACK_ASK_TO_FIND_THING",
                    &[("name", &newest.name)],
                )?;
                let mut builder = ResponseEnvelope::builder()
                    .speak(speech)
                    .reprompt(turn.t("WELCOME_BACK_ASK_TO_FIND_THING_REPROMPT")?)
                    .audio(DirectiveRef::new(
                        TOKEN_TITLE,
                        AUDIO_LAUNCH_WITH_THINGS,
                        serde_json::json!({ "isDayTime": day, "things": names }),
                    ));
                if turn.envelope().supports_display {
                    builder = builder.visual(DirectiveRef::new(
                        TOKEN_TITLE,
                        VISUAL_HOME,
                        serde_json::json!({ "isDayTime": day, "things": names }),
                    ));
                }
                Ok(builder.build())
            }
        }
    }
}
