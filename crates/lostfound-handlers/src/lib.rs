//! Concrete intent handlers for the Lost Then Found skill.
//!
//! [`default_chain`] returns the handlers in their contractual order: the
//! router dispatches to the first matching predicate, so the catch-all
//! [`FallbackHandler`] must stay last and the stop/cancel override sits ahead
//! of every state-specific predicate.

mod browse_things;
mod fallback;
mod find_thing;
mod help;
mod launch;
mod learn_more;
mod remember_thing;
mod session_ended;
mod stop;
mod visit_shop;

pub use browse_things::BrowseThingsByTypeHandler;
pub use fallback::FallbackHandler;
pub use find_thing::FindThingHandler;
pub use help::HelpHandler;
pub use launch::LaunchHandler;
pub use learn_more::{DoNotLearnMoreHandler, LearnMoreConfirmationHandler, LearnMoreHandler};
pub use remember_thing::{RememberThingConfirmationHandler, RememberThingHandler};
pub use session_ended::SessionEndedHandler;
pub use stop::{NoAtTopLevelHandler, StopHandler};
pub use visit_shop::VisitShopHandler;

use std::sync::Arc;

use lostfound_core::{AttributeStore, RequestHandler, Skill};

/// Symbolic tokens and template names the rendering collaborator resolves.
pub mod directives {
    pub const TOKEN_TITLE: &str = "title";
    pub const TOKEN_SHOP: &str = "lost_then_found_shop";

    pub const AUDIO_LAUNCH_NO_THINGS: &str = "launch_no_things";
    pub const AUDIO_LAUNCH_WITH_THINGS: &str = "launch_with_things";
    pub const AUDIO_SHOP: &str = "lost_then_found_shop";

    pub const VISUAL_TITLE: &str = "title";
    pub const VISUAL_HOME: &str = "home";
    pub const VISUAL_SHOP: &str = "lost_then_found_shop";
}

/// The full handler set in registration order.
pub fn default_chain() -> Vec<Arc<dyn RequestHandler>> {
    vec![
        Arc::new(LaunchHandler),
        Arc::new(StopHandler),
        Arc::new(VisitShopHandler),
        Arc::new(RememberThingHandler),
        Arc::new(RememberThingConfirmationHandler),
        Arc::new(FindThingHandler),
        Arc::new(BrowseThingsByTypeHandler),
        Arc::new(LearnMoreHandler),
        Arc::new(LearnMoreConfirmationHandler),
        Arc::new(DoNotLearnMoreHandler),
        Arc::new(HelpHandler),
        Arc::new(NoAtTopLevelHandler),
        Arc::new(SessionEndedHandler),
        // Keep last so it doesn't shadow the other IntentEvent handlers.
        Arc::new(FallbackHandler),
    ]
}

/// Assembles a [`Skill`] with the default chain over the given store.
pub fn build_skill(store: Arc<dyn AttributeStore>) -> Skill {
    let mut skill = Skill::new(store);
    for handler in default_chain() {
        skill.register(handler);
    }
    skill
}
