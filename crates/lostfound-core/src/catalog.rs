//! Static catalog of browsable thing types.
//!
//! The table is read-only reference data: handlers borrow entries, nothing
//! mutates it. The ids mirror the interaction model's slot resolution ids.

/// One browsable type: the wire id and the spoken form used in prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThingType {
    pub id: &'static str,
    pub spoken: &'static str,
}

pub static THING_TYPES: &[ThingType] = &[
    ThingType { id: "KEYS", spoken: "keys" },
    ThingType { id: "PHONE", spoken: "phone" },
    ThingType { id: "BOOK", spoken: "book" },
    ThingType { id: "MONEY", spoken: "money" },
    ThingType { id: "WATCH", spoken: "watch" },
    ThingType { id: "WALLET", spoken: "wallet" },
    ThingType { id: "CREDIT_CARD", spoken: "credit card" },
    ThingType { id: "REMOTE_CONTROL", spoken: "remote control" },
    ThingType { id: "RING", spoken: "ring" },
    ThingType { id: "EARRINGS", spoken: "earrings" },
    ThingType { id: "PENCIL", spoken: "pencil" },
    ThingType { id: "NINTENDO_SWITCH", spoken: "nintendo switch" },
];

fn fold(value: &str) -> String {
    value.trim().to_uppercase().replace(' ', "_")
}

/// Case-folded lookup by wire id or spoken form ("CREDIT_CARD" and
/// "credit card" both resolve).
pub fn find_type(query: &str) -> Option<&'static ThingType> {
    let folded = fold(query);
    THING_TYPES.iter().find(|t| t.id == folded)
}

/// The type a tracked thing belongs to, derived from its normalized name.
/// "CAR KEYS" counts as keys; an unmatched name is untyped.
pub fn type_of(thing_name: &str) -> Option<&'static ThingType> {
    let folded = fold(thing_name);
    THING_TYPES
        .iter()
        .find(|t| folded == t.id || folded.ends_with(&format!("_{}", t.id)))
}

/// Spoken forms of every type, for the types-available prompt.
pub fn spoken_types() -> Vec<String> {
    THING_TYPES.iter().map(|t| t.spoken.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_type_accepts_id_and_spoken_form() {
        assert_eq!(find_type("CREDIT_CARD").unwrap().spoken, "credit card");
        assert_eq!(find_type("credit card").unwrap().id, "CREDIT_CARD");
        assert_eq!(find_type(" keys ").unwrap().id, "KEYS");
        assert!(find_type("unicorn").is_none());
    }

    #[test]
    fn type_of_matches_on_the_trailing_word() {
        assert_eq!(type_of("KEYS").unwrap().id, "KEYS");
        assert_eq!(type_of("CAR KEYS").unwrap().id, "KEYS");
        // No word boundary, no match.
        assert!(type_of("MONKEYS").is_none());
        assert!(type_of("UMBRELLA").is_none());
    }

    #[test]
    fn spoken_types_covers_the_whole_table() {
        let spoken = spoken_types();
        assert_eq!(spoken.len(), THING_TYPES.len());
        assert!(spoken.iter().any(|s| s == "nintendo switch"));
    }
}
