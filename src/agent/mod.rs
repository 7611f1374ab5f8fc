//! Agent Execution Pipeline
//!
//! Agents turn contextual data into rendered prompts, send them to a language
//! model, and persist and shape the response. The pipeline itself lives in
//! [`pipeline`] and [`stages`]; configuration, rendering, inference and storage
//! are collaborators reached through the traits re-exported here.

pub mod context;
pub mod domain;
pub mod model;
pub mod pipeline;
pub mod renderer;
pub mod repository;
pub mod stages;
pub mod storage;

pub use context::{RunContext, RunReport, RunState, Stage};
pub use domain::{AgentConfig, AgentDefinition};
pub use model::{LanguageModel, ModelCatalog};
pub use pipeline::Agent;
pub use renderer::{PlaceholderRenderer, PromptRenderer};
pub use repository::{AgentDataProvider, StaticAgentProvider, StoredAgentProvider};
pub use stages::{AgentScope, AgentStages, BaseStages, StageResult};
pub use storage::{MemoryStorage, StorageBackend};
