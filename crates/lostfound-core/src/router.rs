//! Predicate-based intent router.
//!
//! Handlers form a strict priority list: `can_handle` is evaluated in
//! registration order and the first match runs, exactly once. The catch-all
//! fallback must therefore be registered last. One turn is one
//! read-modify-write against the attribute store: the bag is loaded before
//! dispatch and saved only after a successful handler that dirtied it,
//! before the response is returned.

use std::sync::Arc;

use crate::envelope::{RequestEnvelope, RequestKind, ResponseEnvelope};
use crate::error::SkillError;
use crate::i18n::Resources;
use crate::state::{ConversationState, SessionAttributes};
use crate::store::{AttributeStore, PersistentAttributes};

/// Spoken when even the error translation cannot be produced.
const LAST_RESORT_ERROR: &str = "Sorry, something went wrong. Please try again later.";

/// One intent handler: a predicate over the turn and the action bound to it.
pub trait RequestHandler: Send + Sync {
    /// Handler name for routing diagnostics.
    fn name(&self) -> &str;

    /// Whether this handler wants the event, given the current conversation
    /// state. Must not mutate anything.
    fn can_handle(&self, turn: &TurnContext) -> bool;

    /// Executes the action. Errors are classified as handler faults by the
    /// router; lookup misses are normal branches and must be answered here.
    fn handle(&self, turn: &mut TurnContext) -> Result<ResponseEnvelope, SkillError>;
}

/// Everything one turn may observe and mutate: the incoming event, the
/// session attributes, the durable snapshot, and the locale's string table.
/// Exclusively owned by the chosen handler until the turn completes.
pub struct TurnContext {
    envelope: RequestEnvelope,
    pub session: SessionAttributes,
    attributes: PersistentAttributes,
    resources: Resources,
    dirty: bool,
}

impl TurnContext {
    pub fn new(
        envelope: RequestEnvelope,
        session: SessionAttributes,
        attributes: PersistentAttributes,
        resources: Resources,
    ) -> Self {
        Self {
            envelope,
            session,
            attributes,
            resources,
            dirty: false,
        }
    }

    pub fn envelope(&self) -> &RequestEnvelope {
        &self.envelope
    }

    /// Read-only view of the durable snapshot.
    pub fn attributes(&self) -> &PersistentAttributes {
        &self.attributes
    }

    /// Mutable view of the durable snapshot; marks the turn for a checkpoint
    /// write after the handler succeeds.
    pub fn attributes_mut(&mut self) -> &mut PersistentAttributes {
        self.dirty = true;
        &mut self.attributes
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // Predicate vocabulary, composable inside `can_handle`.

    pub fn is_kind(&self, kind: RequestKind) -> bool {
        self.envelope.kind == kind
    }

    pub fn is_intent(&self, intent_name: &str) -> bool {
        self.is_kind(RequestKind::IntentEvent)
            && self.envelope.intent_name.as_deref() == Some(intent_name)
    }

    pub fn is_one_of_intents(&self, intent_names: &[&str]) -> bool {
        intent_names.iter().any(|name| self.is_intent(name))
    }

    /// An affirmative answer is only meaningful while a specific state is
    /// pending; the predicate is the conjunction of both.
    pub fn is_yes(&self, state: ConversationState) -> bool {
        self.is_intent("AMAZON.YesIntent") && self.session.state == state
    }

    pub fn is_no(&self, state: ConversationState) -> bool {
        self.is_intent("AMAZON.NoIntent") && self.session.state == state
    }

    /// Required slot; absence is a handler fault.
    pub fn slot(&self, name: &'static str) -> Result<String, SkillError> {
        self.envelope
            .slot(name)
            .map(str::to_string)
            .ok_or(SkillError::MissingSlot(name))
    }

    pub fn t(&self, key: &str) -> Result<String, SkillError> {
        self.resources.translate(key, &[])
    }

    pub fn t_with(&self, key: &str, subs: &[(&str, &str)]) -> Result<String, SkillError> {
        self.resources.translate(key, subs)
    }

    /// Joins items for speech with the locale's disjunction word.
    pub fn disjunction(&self, items: &[String]) -> Result<String, SkillError> {
        self.resources.disjunction(items)
    }
}

/// The assembled skill: the ordered handler chain plus the attribute store.
pub struct Skill {
    handlers: Vec<Arc<dyn RequestHandler>>,
    store: Arc<dyn AttributeStore>,
}

impl Skill {
    pub fn new(store: Arc<dyn AttributeStore>) -> Self {
        Self {
            handlers: Vec::new(),
            store,
        }
    }

    /// Appends a handler. Order is part of the routing contract.
    pub fn register(&mut self, handler: Arc<dyn RequestHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_names(&self) -> Vec<String> {
        self.handlers.iter().map(|h| h.name().to_string()).collect()
    }

    /// Processes one event to completion. `session` is updated in place only
    /// when the turn succeeds; a faulted turn leaves both the session and the
    /// durable record at their pre-turn snapshots.
    pub fn handle_turn(
        &self,
        envelope: RequestEnvelope,
        session: &mut SessionAttributes,
    ) -> ResponseEnvelope {
        let resources = Resources::for_locale(&envelope.locale);

        let attributes = match self.store.load(&envelope.user_id) {
            Ok(found) => found.unwrap_or_default(),
            Err(err) => {
                tracing::error!(
                    target: "lostfound::router",
                    user_id = %envelope.user_id,
                    error = %err,
                    "attribute load failed before dispatch"
                );
                return error_response(&resources);
            }
        };

        let mut turn = TurnContext::new(envelope, session.clone(), attributes, resources);

        let Some(handler) = self.handlers.iter().find(|h| h.can_handle(&turn)) else {
            tracing::warn!(
                target: "lostfound::router",
                kind = ?turn.envelope.kind,
                intent = ?turn.envelope.intent_name,
                "no handler matched; falling back"
            );
            return fallback_response(&turn.resources);
        };

        tracing::debug!(
            target: "lostfound::router",
            handler = handler.name(),
            intent = ?turn.envelope.intent_name,
            state = ?turn.session.state,
            "dispatching"
        );

        match handler.handle(&mut turn) {
            Ok(response) => {
                if turn.dirty {
                    // Checkpoint the conversation state alongside the
                    // registry, write-before-respond.
                    turn.attributes.state = turn.session.state;
                    if let Err(err) = self.store.save(&turn.envelope.user_id, &turn.attributes) {
                        tracing::error!(
                            target: "lostfound::router",
                            handler = handler.name(),
                            error = %err,
                            "checkpoint failed; suppressing response"
                        );
                        return error_response(&turn.resources);
                    }
                }
                *session = turn.session;
                response
            }
            Err(err) => {
                tracing::error!(
                    target: "lostfound::router",
                    handler = handler.name(),
                    error = %err,
                    "handler fault"
                );
                error_response(&turn.resources)
            }
        }
    }
}

/// Fixed apology for unmatched intent events: session continues, nothing is
/// written.
fn fallback_response(resources: &Resources) -> ResponseEnvelope {
    let speech = resources
        .translate("FALLBACK", &[])
        .unwrap_or_else(|_| LAST_RESORT_ERROR.to_string());
    let reprompt = resources.translate("FALLBACK_REPROMPT", &[]).ok();
    ResponseEnvelope {
        speech: Some(speech),
        reprompt,
        audio_directive: None,
        visual_directive: None,
        end_session: false,
    }
}

/// Fixed apology for handler faults: the session ends and no identifiers or
/// error detail reach the reply.
fn error_response(resources: &Resources) -> ResponseEnvelope {
    let speech = resources
        .translate("ERROR", &[])
        .unwrap_or_else(|_| LAST_RESORT_ERROR.to_string());
    ResponseEnvelope {
        speech: Some(speech),
        reprompt: None,
        audio_directive: None,
        visual_directive: None,
        end_session: true,
    }
}
