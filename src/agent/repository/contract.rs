use crate::agent::domain::AgentConfig;
use crate::error::AgentError;

/// Source of per-agent configuration, consulted at the start of every run.
///
/// A failure is reported as a whole `Err`; implementations never return a
/// partially populated config.
pub trait AgentDataProvider: Send + Sync {
    fn load_agent_data(&self, agent_name: &str) -> Result<AgentConfig, AgentError>;
}
