//! On-disk agent definition.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shape of `{agents_folder}/{agent_name}.yaml`.
///
/// ```yaml
/// prompts:
///   system: You are {name}, a careful reviewer.
///   user: "Review this change:\n{diff}"
/// params:
///   temperature: 0.2
/// persona: reviewer
/// model: default
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentDefinition {
    #[serde(default)]
    pub prompts: Map<String, Value>,

    #[serde(default)]
    pub params: Map<String, Value>,

    /// Persona file stem inside the personas folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,

    /// Model name in the model catalog; the catalog default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}
