//! Agent definition validation owned by the agent domain.

use super::definition::AgentDefinition;
use serde_json::Value;

/// Validate a stored agent definition.
pub fn validate_agent_definition(agent_name: &str, definition: &AgentDefinition) -> Result<(), String> {
    if agent_name.trim().is_empty() {
        return Err("Agent name cannot be empty".to_string());
    }

    if definition.prompts.is_empty() {
        return Err(format!("Agent '{}' defines no prompts", agent_name));
    }

    for (name, template) in &definition.prompts {
        match template {
            Value::String(_) | Value::Object(_) => {}
            other => {
                return Err(format!(
                    "Prompt '{}' of agent '{}' must be text or a mapping of variants, got {}",
                    name, agent_name, other
                ))
            }
        }
    }

    if let Some(ref persona) = definition.persona {
        if persona.trim().is_empty() {
            return Err("persona cannot be empty if provided".to_string());
        }
    }

    if let Some(ref model) = definition.model {
        if model.trim().is_empty() {
            return Err("model cannot be empty if provided".to_string());
        }
    }

    Ok(())
}
