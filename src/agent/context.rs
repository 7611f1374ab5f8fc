//! Run-scoped state.

use crate::agent::domain::AgentConfig;
use serde_json::{Map, Value};
use std::fmt;

/// Key under which the agent's parameters are placed in the working data.
pub const PARAMETERS_KEY: &str = "parameters";
/// Key under which the agent's prompt templates are placed in the working data.
pub const PROMPT_TEMPLATES_KEY: &str = "prompt_templates";
/// Parameter added to every model call, carrying the agent's name.
pub const AGENT_NAME_PARAM: &str = "agent_name";

/// One step of the fixed pipeline sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Processing,
    Rendering,
    Inferring,
    Parsing,
    Persisting,
    Building,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Loading => "Loading",
            Stage::Processing => "Processing",
            Stage::Rendering => "Rendering",
            Stage::Inferring => "Inferring",
            Stage::Parsing => "Parsing",
            Stage::Persisting => "Persisting",
            Stage::Building => "Building",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running(Stage),
    Done,
    /// A fault escaped the named stage
    Aborted(Stage),
}

/// Mutable working state of one pipeline execution.
///
/// Every field is optional: a stage that fails internally leaves its own field
/// absent and later stages must cope with that.
#[derive(Debug, Default)]
pub struct RunContext {
    /// Configuration loaded for this run
    pub config: Option<AgentConfig>,
    /// Working data; holds at least [`PARAMETERS_KEY`] and
    /// [`PROMPT_TEMPLATES_KEY`] once loading succeeded
    pub data: Option<Map<String, Value>>,
    pub rendered_prompts: Option<Vec<String>>,
    pub raw_result: Option<String>,
    pub output: Option<Value>,
    state: RunState,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: RunState) {
        self.state = state;
    }

    /// Working data value for `key`, if data is loaded.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.get(key))
    }
}

/// Final state of an execution.
#[derive(Debug)]
pub struct RunReport {
    /// `None` whenever the run aborted
    pub output: Option<Value>,
    pub context: RunContext,
}

impl RunReport {
    pub fn state(&self) -> RunState {
        self.context.state()
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.context.state(), RunState::Aborted(_))
    }
}
