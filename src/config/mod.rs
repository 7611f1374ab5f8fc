//! Configuration
//!
//! Process-wide settings consumed by the logger multiplexer and the stored agent
//! provider. Loaded through [`ConfigLoader`], which layers defaults, an optional
//! settings file and an `AGENTFORGE_*` environment overlay.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::AgentPaths;

use crate::logging::diagnostics::DiagnosticsConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the channel used when a log call names no channel.
pub const DEFAULT_CHANNEL: &str = "AgentForge";
/// Channel receiving prompts and model responses.
pub const MODEL_IO_CHANNEL: &str = "ModelIO";
/// Channel receiving agent results; also the storage channel for saved results.
pub const RESULTS_CHANNEL: &str = "Results";

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub agents: AgentPaths,

    /// Diagnostics for the crate's own tracing output
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Logging channel settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Global switch; when false every channel is muted
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Folder holding one `{channel}.log` file per channel
    #[serde(default = "default_log_folder")]
    pub folder: PathBuf,

    /// Configured channels, in declaration order. A configured list replaces
    /// the default list as a whole.
    #[serde(default = "default_channels")]
    pub channels: Vec<ChannelSettings>,
}

/// One logging channel.
///
/// Channels are a list of entries rather than a name-keyed table so the name
/// survives config key normalization; it names the `{name}.log` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSettings {
    pub name: String,

    /// debug, info, warning, error or critical
    #[serde(default = "default_channel_level")]
    pub level: String,
}

impl ChannelSettings {
    pub fn new(name: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
        }
    }
}

fn default_channel_level() -> String {
    "error".to_string()
}

fn default_true() -> bool {
    true
}

/// Platform state directory when available, `./logs` otherwise.
pub fn default_log_folder() -> PathBuf {
    directories::ProjectDirs::from("", "agentforge", "agentforge")
        .and_then(|dirs| dirs.state_dir().map(|dir| dir.join("logs")))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn default_channels() -> Vec<ChannelSettings> {
    [DEFAULT_CHANNEL, MODEL_IO_CHANNEL, RESULTS_CHANNEL]
        .into_iter()
        .map(|name| ChannelSettings::new(name, default_channel_level()))
        .collect()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            folder: default_log_folder(),
            channels: default_channels(),
        }
    }
}

impl LoggingSettings {
    /// Settings writing into `folder` with the given channel levels.
    pub fn with_channels<I, K, V>(folder: impl Into<PathBuf>, channels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            enabled: true,
            folder: folder.into(),
            channels: channels
                .into_iter()
                .map(|(name, level)| ChannelSettings::new(name, level))
                .collect(),
        }
    }

    /// Settings entry for `name`, ignoring ASCII case.
    pub fn channel(&self, name: &str) -> Option<&ChannelSettings> {
        self.channels
            .iter()
            .find(|channel| channel.name.eq_ignore_ascii_case(name))
    }

    /// Same settings with logging switched off.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
