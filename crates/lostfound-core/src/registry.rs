//! The per-user registry of tracked things.

use serde::{Deserialize, Serialize};

use crate::catalog::ThingType;

/// Policy constant: at most this many things are tracked per user.
pub const MAX_TRACKED_THINGS: usize = 4;

/// One trackable item: a name and where the user hid it. Both fields are
/// case-normalized to upper case so spoken input compares and displays
/// consistently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thing {
    pub name: String,
    pub location: String,
}

impl Thing {
    pub fn new(name: &str, location: &str) -> Self {
        Self {
            name: name.trim().to_uppercase(),
            location: location.trim().to_uppercase(),
        }
    }
}

/// Ordered, capacity-bounded list of things. Insertion order is recency
/// order: index 0 is the oldest entry and the first to be evicted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThingRegistry {
    things: Vec<Thing>,
}

impl ThingRegistry {
    /// Upserts a thing by name. A thing with a name already tracked replaces
    /// the old entry and moves to the most-recent position. When the registry
    /// would exceed [`MAX_TRACKED_THINGS`], the oldest thing is evicted and
    /// returned so the caller can mention it once.
    pub fn remember(&mut self, thing: Thing) -> Option<Thing> {
        if let Some(pos) = self.things.iter().position(|t| t.name == thing.name) {
            self.things.remove(pos);
        }
        self.things.push(thing);
        if self.things.len() > MAX_TRACKED_THINGS {
            Some(self.things.remove(0))
        } else {
            None
        }
    }

    /// Exact case-folded lookup by name.
    pub fn find(&self, name: &str) -> Option<&Thing> {
        let needle = name.trim().to_uppercase();
        self.things.iter().find(|t| t.name == needle)
    }

    /// The most recently remembered thing.
    pub fn newest(&self) -> Option<&Thing> {
        self.things.last()
    }

    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    pub fn len(&self) -> usize {
        self.things.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Thing> {
        self.things.iter()
    }

    /// Tracked things belonging to a catalog type, in recency order.
    pub fn of_type(&self, ty: &'static ThingType) -> impl Iterator<Item = &Thing> {
        self.things
            .iter()
            .filter(move |t| crate::catalog::type_of(&t.name) == Some(ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_name_and_location() {
        let thing = Thing::new(" keys ", "the sofa");
        assert_eq!(thing.name, "KEYS");
        assert_eq!(thing.location, "THE SOFA");
    }

    #[test]
    fn remember_then_find_round_trips_case_insensitively() {
        let mut registry = ThingRegistry::default();
        registry.remember(Thing::new("Keys", "the sofa"));
        let found = registry.find("keys").unwrap();
        assert_eq!(found.location, "THE SOFA");
        assert!(registry.find("wallet").is_none());
    }

    #[test]
    fn capacity_evicts_oldest_in_fifo_order() {
        let mut registry = ThingRegistry::default();
        for (i, name) in ["KEYS", "PHONE", "WALLET", "WATCH"].iter().enumerate() {
            let evicted = registry.remember(Thing::new(name, &format!("spot {}", i)));
            assert!(evicted.is_none());
        }
        let evicted = registry.remember(Thing::new("RING", "drawer")).unwrap();
        assert_eq!(evicted.name, "KEYS");
        assert_eq!(registry.len(), MAX_TRACKED_THINGS);
        let names: Vec<&str> = registry.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["PHONE", "WALLET", "WATCH", "RING"]);
    }

    #[test]
    fn remember_same_name_updates_without_duplicating() {
        let mut registry = ThingRegistry::default();
        registry.remember(Thing::new("keys", "the sofa"));
        let evicted = registry.remember(Thing::new("KEYS", "the drawer"));
        assert!(evicted.is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("keys").unwrap().location, "THE DRAWER");
    }

    #[test]
    fn of_type_filters_by_derived_type() {
        let mut registry = ThingRegistry::default();
        registry.remember(Thing::new("House Keys", "the drawer"));
        registry.remember(Thing::new("Wallet", "the sofa"));
        registry.remember(Thing::new("Car Keys", "the hook"));

        let ty = crate::catalog::find_type("keys").unwrap();
        let names: Vec<&str> = registry.of_type(ty).map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["HOUSE KEYS", "CAR KEYS"]);

        let ty = crate::catalog::find_type("ring").unwrap();
        assert_eq!(registry.of_type(ty).count(), 0);
    }

    #[test]
    fn upsert_refreshes_recency() {
        let mut registry = ThingRegistry::default();
        for name in ["KEYS", "PHONE", "WALLET", "WATCH"] {
            registry.remember(Thing::new(name, "somewhere"));
        }
        // Re-remembering KEYS makes PHONE the oldest entry.
        registry.remember(Thing::new("KEYS", "key chain"));
        let evicted = registry.remember(Thing::new("RING", "drawer")).unwrap();
        assert_eq!(evicted.name, "PHONE");
    }
}
