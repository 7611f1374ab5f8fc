pub mod config;
pub mod definition;
pub mod validation;

pub use config::AgentConfig;
pub use definition::AgentDefinition;
pub use validation::validate_agent_definition;
