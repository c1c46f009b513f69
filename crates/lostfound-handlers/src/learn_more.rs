//! Hearing more about a tracked thing, and the yes/no follow-ups.

use lostfound_core::{
    ConversationState, RequestHandler, ResponseEnvelope, SkillError, TurnContext,
};

/// Handles `LearnMoreAboutThingIntent`: stashes the thing for the follow-up
/// confirmation and offers the full catalog entry.
pub struct LearnMoreHandler;

impl RequestHandler for LearnMoreHandler {
    fn name(&self) -> &str {
        "LearnMoreHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_intent("LearnMoreAboutThingIntent")
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        let name = turn.slot("name")?;
        match turn.attributes().things.find(&name).cloned() {
            Some(thing) => {
                turn.session.state = ConversationState::LearnMore;
                turn.session.current_thing = Some(thing.clone());
                Ok(ResponseEnvelope::builder()
                    .speak(turn.t_with("LEARN_MORE_OFFER", &[("name", &thing.name)])?)
                    .reprompt(turn.t_with("LEARN_MORE_REPROMPT", &[("name", &thing.name)])?)
                    .build())
            }
            None => {
                // Not tracked: steer back to the find prompt.
                let display = name.trim().to_uppercase();
                turn.session.state = ConversationState::FindThing;
                let speech = format!(
                    "{} {}",
                    turn.t_with("THING_NOT_TRACKED", &[("name", &display)])?,
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

/// Handles "yes" while details are on offer: full entry, then the play-again
/// prompt.
pub struct LearnMoreConfirmationHandler;

impl RequestHandler for LearnMoreConfirmationHandler {
    fn name(&self) -> &str {
        "LearnMoreConfirmationHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_yes(ConversationState::LearnMore)
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        match turn.session.current_thing.clone() {
            Some(thing) => {
                turn.session.state = ConversationState::PlayAgain;
                let speech = format!(
                    "{} {}",
                    turn.t_with(
                        "ABOUT_THING",
                        &[("name", &thing.name), ("location", &thing.location)],
                    )?,
                    turn.t("PLAY_AGAIN")?
                );
                Ok(ResponseEnvelope::builder()
                    .speak(speech)
                    .reprompt(turn.t("PLAY_AGAIN")?)
                    .build())
            }
            None => {
                // The stashed thing is gone (shouldn't happen); recover by
                // steering back to the find prompt.
                turn.session.state = ConversationState::FindThing;
                let speech = format!(
                    "{} {}",
                    turn.t("ACKNOWLEDGE")?,
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

/// Handles "no" while details are on offer: back to browsing.
pub struct DoNotLearnMoreHandler;

impl RequestHandler for DoNotLearnMoreHandler {
    fn name(&self) -> &str {
        "DoNotLearnMoreHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_no(ConversationState::LearnMore)
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        turn.session.state = ConversationState::FindThing;
        let speech = format!(
            "{} {}",
            turn.t("ACKNOWLEDGE")?,
            turn.t("ASK_TO_FIND_THING")?
        );
        Ok(ResponseEnvelope::builder()
            .speak(speech)
            .reprompt(turn.t("ASK_TO_FIND_THING_REPROMPT")?)
            .build())
    }
}
