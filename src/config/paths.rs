//! Folder layout for stored agent and persona definitions.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_agents_folder() -> PathBuf {
    PathBuf::from("agents")
}

fn default_personas_folder() -> PathBuf {
    PathBuf::from("personas")
}

/// Agent definition folders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPaths {
    /// Folder holding `{agent_name}.yaml` files (relative to the project root)
    #[serde(default = "default_agents_folder")]
    pub folder: PathBuf,

    /// Folder holding `{persona}.yaml` files (relative to the project root)
    #[serde(default = "default_personas_folder")]
    pub personas_folder: PathBuf,
}

impl AgentPaths {
    /// Resolve both folders against the project root. Absolute paths are kept.
    pub fn resolve(&self, root: &Path) -> (PathBuf, PathBuf) {
        (root.join(&self.folder), root.join(&self.personas_folder))
    }
}

impl Default for AgentPaths {
    fn default() -> Self {
        Self {
            folder: default_agents_folder(),
            personas_folder: default_personas_folder(),
        }
    }
}
