//! Agent data provider port and adapters.

pub mod cache;
pub mod contract;
pub mod memory;
pub mod stored;

pub use cache::DefinitionCache;
pub use contract::AgentDataProvider;
pub use memory::StaticAgentProvider;
pub use stored::StoredAgentProvider;
