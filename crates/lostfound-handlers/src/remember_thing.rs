//! Registering a thing: the only action that mutates the durable registry.

use lostfound_core::{
    ConversationState, DirectiveRef, RequestHandler, ResponseEnvelope, SkillError, Thing,
    TurnContext,
};

use crate::directives::{TOKEN_TITLE, VISUAL_HOME};

/// Handles `RememberThingIntent`: normalizes the name and location, upserts
/// into the registry, evicts the oldest thing beyond capacity, and
/// checkpoints durable state before the response goes out.
pub struct RememberThingHandler;

impl RequestHandler for RememberThingHandler {
    fn name(&self) -> &str {
        "RememberThingHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_intent("RememberThingIntent")
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        let name = turn.slot("name")?;
        let location = turn.slot("location")?;
        let thing = Thing::new(&name, &location);

        let attributes = turn.attributes_mut();
        let evicted = attributes.things.remember(thing.clone());

        // The eviction notice is played at most once ever per user.
        let evicted_notice = match evicted {
            Some(old) if !attributes.heard_sent_back_prompt => {
                attributes.heard_sent_back_prompt = true;
                Some(old.name)
            }
            _ => None,
        };

        turn.session.state = ConversationState::FindThing;
        turn.session.current_thing = Some(thing.clone());

        tracing::info!(
            target: "lostfound::handlers",
            name = %thing.name,
            tracked = turn.attributes().things.len(),
            evicted = evicted_notice.is_some(),
            "registered thing '{}'",
            thing.name
        );

        let mut speech = turn.t_with(
            "REMEMBERED_THING",
            &[("name", &thing.name), ("location", &thing.location)],
        )?;
        if let Some(evicted_name) = evicted_notice {
            speech.push(' ');
            speech.push_str(&turn.t_with("SENT_BACK_PROMPT", &[("name", &evicted_name)])?);
        }
        speech.push(' ');
        speech.push_str(&turn.t("ASK_TO_FIND_THING")?);

        let mut builder = ResponseEnvelope::builder()
            .speak(speech)
            .reprompt(turn.t("ASK_TO_FIND_THING_REPROMPT")?);
        if turn.envelope().supports_display {
            let names: Vec<String> = turn
                .attributes()
                .things
                .iter()
                .map(|t| t.name.clone())
                .collect();
            builder = builder.visual(DirectiveRef::new(
                TOKEN_TITLE,
                VISUAL_HOME,
                serde_json::json!({ "things": names }),
            ));
        }
        Ok(builder.build())
    }
}

/// Handles "yes" while the register prompt is pending: asks for the thing.
pub struct RememberThingConfirmationHandler;

impl RequestHandler for RememberThingConfirmationHandler {
    fn name(&self) -> &str {
        "RememberThingConfirmationHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_yes(ConversationState::RegisterThing)
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        Ok(ResponseEnvelope::builder()
            .speak(turn.t("ASK_TO_REMEMBER_THING")?)
            .reprompt(turn.t("ASK_TO_REMEMBER_THING_REPROMPT")?)
            .build())
    }
}
