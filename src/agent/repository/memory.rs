//! In-memory agent configs.

use crate::agent::domain::AgentConfig;
use crate::agent::repository::AgentDataProvider;
use crate::error::AgentError;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Provider serving configs registered in code. Replacing a config takes
/// effect on the agent's next run.
#[derive(Debug, Default)]
pub struct StaticAgentProvider {
    configs: RwLock<HashMap<String, AgentConfig>>,
}

impl StaticAgentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(self, agent_name: impl Into<String>, config: AgentConfig) -> Self {
        self.insert(agent_name, config);
        self
    }

    pub fn insert(&self, agent_name: impl Into<String>, config: AgentConfig) {
        self.configs.write().insert(agent_name.into(), config);
    }

    pub fn remove(&self, agent_name: &str) -> Option<AgentConfig> {
        self.configs.write().remove(agent_name)
    }
}

impl AgentDataProvider for StaticAgentProvider {
    fn load_agent_data(&self, agent_name: &str) -> Result<AgentConfig, AgentError> {
        self.configs
            .read()
            .get(agent_name)
            .cloned()
            .ok_or_else(|| AgentError::DataUnavailable {
                agent: agent_name.to_string(),
                reason: "no configuration registered".to_string(),
            })
    }
}
