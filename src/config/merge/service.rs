//! MergeService: orchestrates sources, applies merge policy, deserializes to ForgeConfig.

use crate::config::sources::{environment, settings_file};
use crate::config::ForgeConfig;
use config::ConfigError;
use std::path::Path;

use super::policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from the project root and environment.
    /// Precedence: defaults (lowest) -> project settings file -> environment (highest).
    pub fn load(project_root: &Path) -> Result<ForgeConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = settings_file::add_to_builder(builder, project_root)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ForgeConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = builder.add_source(config::File::from(path));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
