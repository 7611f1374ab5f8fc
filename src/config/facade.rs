//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ForgeConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the project root settings file and environment.
    pub fn load(project_root: &Path) -> Result<ForgeConfig, ConfigError> {
        MergeService::load(project_root)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<ForgeConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> ForgeConfig {
        ForgeConfig::default()
    }
}
