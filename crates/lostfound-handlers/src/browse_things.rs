//! Browsing tracked things by catalog type.

use lostfound_core::{
    find_type, spoken_types, ConversationState, RequestHandler, ResponseEnvelope, SkillError,
    Thing, TurnContext,
};

/// Handles `BrowseThingsByTypeIntent`: resolves the `type` slot against the
/// static catalog, stashes it as the browsed type, and lists the user's
/// tracked things under it. An unknown type is a normal branch answered with
/// the types the catalog covers.
pub struct BrowseThingsByTypeHandler;

impl RequestHandler for BrowseThingsByTypeHandler {
    fn name(&self) -> &str {
        "BrowseThingsByTypeHandler"
    }

    fn can_handle(&self, turn: &TurnContext) -> bool {
        turn.is_intent("BrowseThingsByTypeIntent")
    }

    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError> {
        let query = turn.slot("type")?;

        let Some(ty) = find_type(&query) else {
            let types = turn.disjunction(&spoken_types())?;
            let display = query.trim().to_uppercase();
            let speech = format!(
                "{} {}",
                turn.t_with("THING_TYPE_NOT_AVAILABLE", &[("type", &display)])?,
                turn.t_with("THING_TYPES_AVAILABLE", &[("types", &types)])?
            );
            return Ok(ResponseEnvelope::builder()
                .speak(speech)
                .reprompt(turn.t_with("THING_TYPES_AVAILABLE_REPROMPT", &[("types", &types)])?)
                .build());
        };

        turn.session.current_type = Some(ty.id.to_string());

        let matches: Vec<Thing> = turn.attributes().things.of_type(ty).cloned().collect();
        if matches.is_empty() {
            turn.session.state = ConversationState::RegisterThing;
            let speech = format!(
                "{} {}",
                turn.t_with("NO_THINGS_OF_TYPE", &[("type", ty.spoken)])?,
                turn.t("ASK_TO_REMEMBER_THING")?
            );
            return Ok(ResponseEnvelope::builder()
                .speak(speech)
                .reprompt(turn.t("ASK_TO_REMEMBER_THING_REPROMPT")?)
                .build());
        }

        let names: Vec<String> = matches.iter().map(|t| t.name.clone()).collect();
        let things = turn.disjunction(&names)?;
        let first = matches[0].clone();
        turn.session.state = ConversationState::LearnMore;
        turn.session.current_thing = Some(first.clone());

        let speech = format!(
            "{} {}",
            turn.t_with(
                "THINGS_OF_TYPE",
                &[("type", ty.spoken), ("things", &things)],
            )?,
            turn.t_with("LEARN_MORE_REPROMPT", &[("name", &first.name)])?
        );
        Ok(ResponseEnvelope::builder()
            .speak(speech)
            .reprompt(turn.t_with("LEARN_MORE_REPROMPT", &[("name", &first.name)])?)
            .build())
    }
}
