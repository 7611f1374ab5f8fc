//! Error types for the agent pipeline and the logging subsystem.

use std::path::PathBuf;
use thiserror::Error;

/// Faults raised by pipeline stages and the collaborators they call.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Agent data unavailable for {agent}: {reason}")]
    DataUnavailable { agent: String, reason: String },

    #[error("Prompt rendering failed: {0}")]
    Render(String),

    #[error("Language model error: {0}")]
    Model(String),

    #[error("No language model bound to agent {0}")]
    MissingModel(String),

    #[error("No storage bound to agent {0}")]
    MissingStorage(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Failed to parse model response: {0}")]
    Parse(String),

    #[error("Run state missing: {0}")]
    MissingState(&'static str),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Logging(#[from] LogError),
}

/// Faults raised by the logger multiplexer.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Unknown log channel: {0}")]
    UnknownChannel(String),

    #[error("Failed to prepare log folder {path:?}: {source}")]
    Folder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open log file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write log record to {sink}: {source}")]
    Write {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Critical message logged without a fault to propagate")]
    CriticalWithoutFault,

    #[error("Diagnostics setup failed: {0}")]
    Diagnostics(String),
}
