//! The shop visit: the shop keeper greets the user and asks what to catalog.

use lostfound_core::{
    ConversationState, DirectiveRef, RequestHandler, ResponseEnvelope, SkillError, TurnContext,
};

use crate::directives::{AUDIO_SHOP, TOKEN_SHOP, VISUAL_SHOP};

/// Handles the explicit shop-visit intent and "yes" to the launch offer.
pub struct VisitShopHandler;

impl RequestHandler for VisitShopHandler {
    fn name(&self) -> &str {
        "VisitShopHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_intent("VisitLostThenFoundShopIntent")
            || turn.is_yes(ConversationState::VisitLostThenFoundShop)
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        let greeting_key = if turn.attributes().things.is_empty() {
            "SHOP_KEEPER_GREETING"
        } else {
            "SHOP_KEEPER_GREETING_HAS_THINGS"
        };
        let speech = format!(
            "{} {} {}",
            turn.t("FIRST_VISIT")?,
            turn.t(greeting_key)?,
            turn.t("ASK_TO_REMEMBER_THING")?
        );

        turn.session.state = ConversationState::RegisterThing;
        let day = turn.session.is_day_time.unwrap_or(true);

        let mut builder = ResponseEnvelope::builder()
            .speak(speech)
            .reprompt(turn.t("ASK_TO_REMEMBER_THING_REPROMPT")?)
            .audio(DirectiveRef::new(
                TOKEN_SHOP,
                AUDIO_SHOP,
                serde_json::json!({ "isDayTime": day }),
            ));
        if turn.envelope().supports_display {
            builder = builder.visual(DirectiveRef::new(
                TOKEN_SHOP,
                VISUAL_SHOP,
                serde_json::json!({ "isDayTime": day }),
            ));
        }
        Ok(builder.build())
    }
}
