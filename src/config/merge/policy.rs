//! Merge policy: the lowest-precedence layer is the serialized default config.
//!
//! `config` merges tables key by key, so list-valued settings whose default
//! must be replaced rather than extended are left out of the seed; serde
//! fills them in when no source provides them.

use crate::config::ForgeConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use serde_json::Value;

/// Paths (section, key) left out of the default seed.
const UNSEEDED: &[(&str, &str)] = &[("logging", "channels")];

/// Builder seeded with [`ForgeConfig::default`] so partial sources deserialize.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&default_seed()?)?;
    Ok(Config::builder().add_source(defaults))
}

fn default_seed() -> Result<Value, ConfigError> {
    let mut seed = serde_json::to_value(ForgeConfig::default())
        .map_err(|e| ConfigError::Message(format!("Failed to serialize defaults: {}", e)))?;
    for (section, key) in UNSEEDED {
        if let Some(table) = seed.get_mut(*section).and_then(Value::as_object_mut) {
            table.remove(*key);
        }
    }
    Ok(seed)
}
