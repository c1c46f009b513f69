//! Conversation state: what the skill expects the user to say next.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::registry::Thing;

/// The state machine driving yes/no interpretation between turns.
///
/// The identifiers are persisted to storage as written; renaming a variant is
/// a breaking schema change. `CheckThing` and `RemoveThing` are declared for
/// schema stability but no handler currently transitions into them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationState {
    /// The user is being offered a first visit to the shop.
    #[default]
    VisitLostThenFoundShop,
    /// The user is being prompted to register a thing to track.
    RegisterThing,
    /// The user is being prompted to review a registered thing.
    CheckThing,
    /// The user is being prompted for a thing they think is lost.
    FindThing,
    /// The user was offered details about a specific tracked thing.
    LearnMore,
    /// The user is being prompted to stop tracking a thing.
    RemoveThing,
    /// The register/find cycle completed; the user was offered another round.
    PlayAgain,
}

/// Session-scoped attributes: owned by the active exchange and discarded at
/// session end. Only `state` is checkpointed to durable storage, and only on
/// turns that also mutate the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionAttributes {
    /// Defaults to [`ConversationState::VisitLostThenFoundShop`].
    #[serde(default)]
    pub state: ConversationState,
    /// Resolved once per session at launch; `None` until then.
    #[serde(default)]
    pub is_day_time: Option<bool>,
    /// Carries context between a prompt and its yes/no confirmation.
    #[serde(default)]
    pub current_thing: Option<Thing>,
    /// Id of the catalog type last browsed; `None` outside a browse flow.
    #[serde(default)]
    pub current_type: Option<String>,
}

/// Day time is 7 AM through 9 PM inclusive; sounds and visuals key off this.
pub fn is_day_time(hour: u32) -> bool {
    (7..=21).contains(&hour)
}

/// Current hour of day in the given IANA time zone, or `None` if the zone
/// name does not parse.
pub fn local_hour(time_zone: &str) -> Option<u32> {
    let tz: chrono_tz::Tz = time_zone.parse().ok()?;
    Some(chrono::Utc::now().with_timezone(&tz).hour())
}
