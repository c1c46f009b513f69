//! Error taxonomy for handler execution.
//!
//! Anything a handler returns as `Err` is a handler fault: the router answers
//! with the fixed localized apology, ends the session, and skips the durable
//! write. Unmatched events and registry lookup misses are not errors and
//! never take this path.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkillError {
    /// The durable attribute store failed to load or save.
    #[error("storage unavailable: {0}")]
    Storage(String),

    /// A required slot was absent or empty on the incoming event.
    #[error("required slot '{0}' is missing or empty")]
    MissingSlot(&'static str),

    /// No entry for the key in the locale's string table.
    #[error("no translation for key '{0}'")]
    MissingTranslation(String),
}

impl From<sled::Error> for SkillError {
    fn from(err: sled::Error) -> Self {
        SkillError::Storage(err.to_string())
    }
}
