//! Durable per-user attribute store.
//!
//! The store is a key-value blob keyed by user id. Each turn performs a
//! single read-modify-write: the router loads the attribute bag before any
//! handler runs and saves it after a successful handler that touched durable
//! state, before the response is emitted.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::SkillError;
use crate::registry::ThingRegistry;
use crate::state::ConversationState;

const TREE_NAME: &str = "user_attributes";

/// The durable attribute bag for one user. Fields absent in storage (older
/// records) rehydrate to their documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistentAttributes {
    /// Ordered registry of tracked things; defaults to empty.
    #[serde(default)]
    pub things: ThingRegistry,
    /// Last checkpointed conversation state; defaults to the shop visit.
    #[serde(default)]
    pub state: ConversationState,
    /// One-time flag: the user has heard the eviction notice.
    #[serde(default)]
    pub heard_sent_back_prompt: bool,
}

impl PersistentAttributes {
    fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }
}

/// Load/save contract for the durable attribute bag. One user's record is
/// exclusively owned by that user; there is no cross-user sharing.
pub trait AttributeStore: Send + Sync {
    /// Returns the stored bag, or `None` for a user with no record yet.
    fn load(&self, user_id: &str) -> Result<Option<PersistentAttributes>, SkillError>;

    /// Replaces the stored bag for the user.
    fn save(&self, user_id: &str, attributes: &PersistentAttributes) -> Result<(), SkillError>;
}

/// Sled-backed store: one tree, JSON-encoded records keyed by user id.
pub struct SledAttributeStore {
    db: sled::Db,
}

impl SledAttributeStore {
    /// Opens or creates the attribute DB at the given path.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, SkillError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }
}

impl AttributeStore for SledAttributeStore {
    fn load(&self, user_id: &str) -> Result<Option<PersistentAttributes>, SkillError> {
        let tree = self.db.open_tree(TREE_NAME)?;
        let Some(bytes) = tree.get(user_id.as_bytes())? else {
            return Ok(None);
        };
        match PersistentAttributes::from_bytes(&bytes) {
            Some(attrs) => Ok(Some(attrs)),
            None => {
                // Unreadable record: rehydrate defaults rather than failing
                // every turn for this user.
                tracing::warn!(
                    target: "lostfound::store",
                    user_id = user_id,
                    "attribute record did not deserialize; using defaults"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, user_id: &str, attributes: &PersistentAttributes) -> Result<(), SkillError> {
        let tree = self.db.open_tree(TREE_NAME)?;
        let prev = tree.insert(user_id.as_bytes(), attributes.to_bytes())?;
        tracing::info!(
            target: "lostfound::store",
            user_id = user_id,
            things = attributes.things.len(),
            action = if prev.is_some() { "UPDATE" } else { "INSERT" },
            "checkpointed attributes for '{}' ({} things)",
            user_id,
            attributes.things.len()
        );
        Ok(())
    }
}

/// In-memory store for tests and demos.
#[derive(Default)]
pub struct MemoryAttributeStore {
    records: RwLock<HashMap<String, PersistentAttributes>>,
}

impl MemoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeStore for MemoryAttributeStore {
    fn load(&self, user_id: &str) -> Result<Option<PersistentAttributes>, SkillError> {
        let records = self
            .records
            .read()
            .map_err(|e| SkillError::Storage(e.to_string()))?;
        Ok(records.get(user_id).cloned())
    }

    fn save(&self, user_id: &str, attributes: &PersistentAttributes) -> Result<(), SkillError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| SkillError::Storage(e.to_string()))?;
        records.insert(user_id.to_string(), attributes.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Thing;

    #[test]
    fn sled_store_round_trips_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledAttributeStore::open_path(dir.path()).unwrap();

        assert!(store.load("user-1").unwrap().is_none());

        let mut attrs = PersistentAttributes::default();
        attrs.things.remember(Thing::new("Keys", "the sofa"));
        attrs.state = ConversationState::FindThing;
        store.save("user-1", &attrs).unwrap();

        let loaded = store.load("user-1").unwrap().unwrap();
        assert_eq!(loaded, attrs);
    }

    #[test]
    fn load_is_idempotent_without_intervening_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledAttributeStore::open_path(dir.path()).unwrap();

        let mut attrs = PersistentAttributes::default();
        attrs.things.remember(Thing::new("wallet", "drawer"));
        store.save("user-2", &attrs).unwrap();

        let first = store.load("user-2").unwrap();
        let second = store.load("user-2").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn absent_fields_rehydrate_to_defaults() {
        let attrs = PersistentAttributes::from_bytes(b"{}").unwrap();
        assert!(attrs.things.is_empty());
        assert_eq!(attrs.state, ConversationState::VisitLostThenFoundShop);
        assert!(!attrs.heard_sent_back_prompt);
    }

    #[test]
    fn users_do_not_share_records() {
        let store = MemoryAttributeStore::new();
        let mut attrs = PersistentAttributes::default();
        attrs.things.remember(Thing::new("ring", "linen closet"));
        store.save("user-a", &attrs).unwrap();
        assert!(store.load("user-b").unwrap().is_none());
    }
}
