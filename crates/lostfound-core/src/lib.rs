//! lostfound-core: the intent-routing and conversation-state engine behind
//! the Lost Then Found voice skill.
//!
//! The gateway add-on and the handlers crate build on the types exported
//! here: inbound/outbound envelopes, the conversation state machine, the
//! capacity-bounded thing registry, the durable attribute store, and the
//! ordered predicate router.

mod catalog;
mod config;
mod envelope;
mod error;
mod i18n;
mod registry;
mod router;
mod state;
mod store;

pub use catalog::{find_type, spoken_types, type_of, ThingType, THING_TYPES};
pub use config::SkillConfig;
pub use envelope::{
    DirectiveRef, RequestEnvelope, RequestKind, ResponseBuilder, ResponseEnvelope, Slot,
};
pub use error::SkillError;
pub use i18n::Resources;
pub use registry::{Thing, ThingRegistry, MAX_TRACKED_THINGS};
pub use router::{RequestHandler, Skill, TurnContext};
pub use state::{is_day_time, local_hour, ConversationState, SessionAttributes};
pub use store::{AttributeStore, MemoryAttributeStore, PersistentAttributes, SledAttributeStore};
