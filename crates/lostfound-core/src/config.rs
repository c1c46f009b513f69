//! Application configuration for the skill gateway. Load from TOML or env.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Display name reported by the status endpoint.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Base directory for the Sled attribute store.
    pub storage_path: String,
    /// Locale used when an envelope arrives without one the tables know.
    pub default_locale: String,
}

impl SkillConfig {
    /// Load config from file and environment. Precedence: env
    /// `LOSTFOUND_CONFIG` path > `config/gateway.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("LOSTFOUND_CONFIG").unwrap_or_else(|_| "config/gateway".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Lost Then Found")?
            .set_default("port", 8030_i64)?
            .set_default("storage_path", "./data")?
            .set_default("default_locale", "en-US")?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("LOSTFOUND").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}
