//! Per-run agent configuration.

use crate::agent::model::LanguageModel;
use crate::agent::storage::StorageBackend;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Everything an agent needs for one run: parameters, prompt templates, an
/// optional persona and the bound model and storage handles.
///
/// Loaded fresh from the data provider at the start of every run.
#[derive(Clone, Default)]
pub struct AgentConfig {
    pub parameters: Map<String, Value>,
    /// Templates in declaration order
    pub prompt_templates: Map<String, Value>,
    pub persona: Option<Map<String, Value>>,
    pub model: Option<Arc<dyn LanguageModel>>,
    pub storage: Option<Arc<dyn StorageBackend>>,
}

impl AgentConfig {
    pub fn new(prompt_templates: Map<String, Value>) -> Self {
        Self {
            prompt_templates,
            ..Self::default()
        }
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_persona(mut self, persona: Map<String, Value>) -> Self {
        self.persona = Some(persona);
        self
    }

    pub fn with_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn StorageBackend>) -> Self {
        self.storage = Some(storage);
        self
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("parameters", &self.parameters)
            .field("prompt_templates", &self.prompt_templates)
            .field("persona", &self.persona)
            .field("model", &self.model.is_some())
            .field("storage", &self.storage.is_some())
            .finish()
    }
}
