//! Project settings file source: `{root}/agentforge.{toml,yaml,json}`, optional.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;

/// Base name of the project settings file; the extension picks the format.
pub const SETTINGS_FILE_STEM: &str = "agentforge";

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    project_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let stem = project_root.join(SETTINGS_FILE_STEM);
    let stem = stem.to_str().ok_or_else(|| {
        ConfigError::Message(format!("Project root is not valid UTF-8: {:?}", project_root))
    })?;
    Ok(builder.add_source(File::with_name(stem).required(false)))
}
