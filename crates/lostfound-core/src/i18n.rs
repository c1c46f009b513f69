//! Localized string tables and template substitution.
//!
//! A [`Resources`] table is resolved synchronously for the turn's locale
//! before any handler runs. Entries are either a single template or a list of
//! variants; lists are sampled uniformly at random, which is the only
//! nondeterminism in the engine and affects wording only.

use std::collections::HashMap;

use rand::Rng;

use crate::error::SkillError;

#[derive(Debug, Clone, Copy)]
enum Entry {
    Text(&'static str),
    List(&'static [&'static str]),
}

/// Merged string table for one locale.
pub struct Resources {
    entries: HashMap<&'static str, Entry>,
}

impl Resources {
    /// Base `en` table with locale-specific overrides layered on top.
    /// Unknown locales fall back to plain `en`.
    pub fn for_locale(locale: &str) -> Self {
        let mut entries = en();
        if locale.eq_ignore_ascii_case("en-US") {
            entries.extend(en_us());
        }
        Self { entries }
    }

    /// Looks up `key`, picks a variant if the entry is a list, and fills
    /// `{{placeholder}}` substitutions.
    pub fn translate(&self, key: &str, subs: &[(&str, &str)]) -> Result<String, SkillError> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| SkillError::MissingTranslation(key.to_string()))?;
        let template = match entry {
            Entry::Text(text) => text,
            Entry::List(variants) => {
                let index = rand::thread_rng().gen_range(0..variants.len());
                variants[index]
            }
        };
        Ok(substitute(template, subs))
    }

    /// Joins items for speech: `["keys", "a watch"]` -> `"keys, or, a watch"`.
    pub fn disjunction(&self, items: &[String]) -> Result<String, SkillError> {
        match items {
            [] => Ok(String::new()),
            [only] => Ok(only.clone()),
            _ => {
                let or = self.translate("DISJUNCTION", &[])?;
                let (last, rest) = items.split_last().expect("len checked above");
                let mut parts: Vec<&str> = rest.iter().map(String::as_str).collect();
                parts.push(&or);
                parts.push(last);
                Ok(parts.join(", "))
            }
        }
    }
}

fn substitute(template: &str, subs: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in subs {
        out = out.replace(&format!("{{{{{}}}}}", key), value);
    }
    out
}

fn en() -> HashMap<&'static str, Entry> {
    use Entry::{List, Text};
    [
        ("GENERIC_GREETING", Text("Hey there.")),
        ("GENERIC_RETURN_GREETING", Text("Great to see you back.")),
        (
            "GOTO_LOST_THEN_FOUND_PROMPT",
            Text("So happy to see you. A new digital lost and found shop opened up in town. It's called Lost Then Found. It helps you keep track of where you place or hide your valuable things. Would you be interested in cataloging your things and where you placed them? I promise to not tell anyone."),
        ),
        (
            "GOTO_LOST_THEN_FOUND_REPROMPT",
            Text("Would you like me to remember or to find a thing of yours at the Lost Then Found?"),
        ),
        ("FIRST_VISIT", Text("Great! Alright, let's go.")),
        (
            "SHOP_KEEPER_GREETING",
            List(&[
                "<voice name='Hans'>Hey there, name's Tim! Welcome to Lost Then Found. Tell me a thing and where you hid it, and we'll keep it safe on our shelves.</voice>",
                "<voice name='Hans'>Welcome in! I'm Tim, the shop keeper. Every thing you catalog here stays our little secret.</voice>",
                "<voice name='Hans'>Hello hello! Tim here. Bring me your keys, your wallet, anything at all, and I'll remember exactly where it is.</voice>",
            ]),
        ),
        (
            "SHOP_KEEPER_GREETING_HAS_THINGS",
            List(&[
                "<voice name='Hans'>Welcome back. Your shelf is right where you left it. What else should we catalog today?</voice>",
                "<voice name='Hans'>Hey there. Good to see you again. Your things are all safe. What's next?</voice>",
            ]),
        ),
        (
            "ASK_TO_REMEMBER_THING",
            Text("What would you like me to remember for you?"),
        ),
        (
            "ASK_TO_REMEMBER_THING_REPROMPT",
            Text("What should I remember for you?"),
        ),
        (
            "REMEMBERED_THING",
            Text("Ok. I'll remember that {{name}} is at the {{location}}."),
        ),
        (
            "ASK_TO_FIND_THING",
            Text("What would you like to find? Or would you like to remember another thing?"),
        ),
        (
            "ASK_TO_FIND_THING_REPROMPT",
            Text("What should I find for you? Or should I remember another thing?"),
        ),
        (
            "WELCOME_BACK_ASK_TO_FIND_THING",
            Text("Welcome back to Lost Then Found. The last thing you catalogued was {{name}}. What would you like to find? Or would you like to remember another thing?"),
        ),
        (
            "WELCOME_BACK_ASK_TO_FIND_THING_REPROMPT",
            Text("What should I find for you? Or should I remember another thing?"),
        ),
        ("FOUND_THING", Text("{{name}} is located at the {{location}}.")),
        (
            "NOT_FOUND_THING",
            Text("You did not tell me where {{name}} is hidden."),
        ),
        (
            "NOTHING_REMEMBERED",
            Text("You haven't catalogued any things yet. Would you like me to remember something now?"),
        ),
        (
            "NOTHING_REMEMBERED_REPROMPT",
            Text("Would you like me to remember a thing for you?"),
        ),
        (
            "SENT_BACK_PROMPT",
            Text("My shelves only have room for four things, so {{name}} went back to the shop and I stopped tracking it. You can always catalog it again."),
        ),
        (
            "THINGS_OF_TYPE",
            Text("Under {{type}} I have {{things}}."),
        ),
        (
            "NO_THINGS_OF_TYPE",
            Text("Nothing is catalogued under {{type}} yet."),
        ),
        (
            "THING_TYPE_NOT_AVAILABLE",
            Text("I don't have a shelf for {{type}}."),
        ),
        (
            "THING_TYPES_AVAILABLE",
            Text("I can keep track of things like {{types}}."),
        ),
        (
            "THING_TYPES_AVAILABLE_REPROMPT",
            Text("Which type should I look under? I know about {{types}}."),
        ),
        (
            "LEARN_MORE_OFFER",
            Text("{{name}} is in the catalog. Would you like to hear the whole entry?"),
        ),
        (
            "LEARN_MORE_REPROMPT",
            Text("Would you like to hear more about {{name}}?"),
        ),
        (
            "ABOUT_THING",
            Text("Here's what I know. {{name}} is safely catalogued, and last I heard it was at the {{location}}. I'll keep it our secret."),
        ),
        (
            "THING_NOT_TRACKED",
            Text("I don't see {{name}} in the catalog."),
        ),
        ("ACKNOWLEDGE", Text("Ok.")),
        ("PLAY_AGAIN", Text("Would you like to play again?")),
        (
            "HELP",
            Text("Lost Then Found is a utility in which you can save the secret location of your most prized possessions, like your keys, your wallet, or your smartphone. If you ever get stuck and need to start over, say \"start over.\""),
        ),
        (
            "HELP_REPROMPT",
            Text("If you ever get stuck in Lost Then Found and need to start over, say \"start over.\""),
        ),
        ("FALLBACK", Text("Sorry, I didn't catch that. Say that again please.")),
        ("FALLBACK_REPROMPT", Text("Say that again please.")),
        (
            "ERROR",
            Text("Oh no! Looks like there was a problem. Please try again later."),
        ),
        ("EXIT", Text("Goodbye!")),
        ("DISJUNCTION", Text("or")),
    ]
    .into_iter()
    .collect()
}

fn en_us() -> HashMap<&'static str, Entry> {
    use Entry::Text;
    [
        (
            "GOTO_LOST_THEN_FOUND_PROMPT",
            Text("Hello! So happy to see you. A new digital lost and found shop opened up in town. It's called Lost Then Found. It helps you keep track of where you place or hide your valuable things. I promise to not tell anyone. Please ask me to either remember a thing at a location, or, find a thing. Go ahead."),
        ),
        (
            "GOTO_LOST_THEN_FOUND_REPROMPT",
            Text("Would you like me to remember or to find a thing of yours at the Lost Then Found?"),
        ),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_placeholders() {
        let resources = Resources::for_locale("en-US");
        let speech = resources
            .translate("FOUND_THING", &[("name", "KEYS"), ("location", "SOFA")])
            .unwrap();
        assert_eq!(speech, "KEYS is located at the SOFA.");
    }

    #[test]
    fn missing_key_is_an_error() {
        let resources = Resources::for_locale("en");
        assert!(matches!(
            resources.translate("NO_SUCH_KEY", &[]),
            Err(SkillError::MissingTranslation(_))
        ));
    }

    #[test]
    fn list_entries_resolve_to_one_variant() {
        let resources = Resources::for_locale("en");
        for _ in 0..20 {
            let speech = resources.translate("SHOP_KEEPER_GREETING", &[]).unwrap();
            assert!(speech.contains("Tim"));
        }
    }

    #[test]
    fn en_us_overrides_base_table() {
        let base = Resources::for_locale("en");
        let us = Resources::for_locale("en-US");
        let base_prompt = base.translate("GOTO_LOST_THEN_FOUND_PROMPT", &[]).unwrap();
        let us_prompt = us.translate("GOTO_LOST_THEN_FOUND_PROMPT", &[]).unwrap();
        assert_ne!(base_prompt, us_prompt);
        // Keys absent from the overlay fall through to the base table.
        assert_eq!(
            base.translate("EXIT", &[]).unwrap(),
            us.translate("EXIT", &[]).unwrap()
        );
    }

    #[test]
    fn disjunction_formats_for_speech() {
        let resources = Resources::for_locale("en");
        let joined = resources
            .disjunction(&["milk".to_string(), "cookies".to_string()])
            .unwrap();
        assert_eq!(joined, "milk, or, cookies");
        let single = resources.disjunction(&["milk".to_string()]).unwrap();
        assert_eq!(single, "milk");
    }
}
