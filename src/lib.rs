//! AgentForge: overridable agent pipelines with multiplexed logging.
//!
//! - [`agent`] runs agents through a fixed, overridable stage sequence.
//! - [`logging`] routes caller-tagged messages to named, deduplicated channels.
//! - [`config`] loads the settings both of them consume.

pub mod agent;
pub mod config;
pub mod error;
pub mod logging;

pub use agent::{Agent, AgentConfig, AgentStages, RunContext, RunReport};
pub use error::{AgentError, LogError};
pub use logging::{Logger, SinkRegistry};
