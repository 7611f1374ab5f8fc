//! Language model client contract and a named model catalog.

use crate::error::AgentError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Stateless text generation.
///
/// Retries, timeouts and transport details belong to implementations; the
/// pipeline treats every `Err` as recoverable.
pub trait LanguageModel: Send + Sync {
    fn generate_text(
        &self,
        prompts: &[String],
        parameters: &Map<String, Value>,
    ) -> Result<String, AgentError>;
}

impl<F> LanguageModel for F
where
    F: Fn(&[String], &Map<String, Value>) -> Result<String, AgentError> + Send + Sync,
{
    fn generate_text(
        &self,
        prompts: &[String],
        parameters: &Map<String, Value>,
    ) -> Result<String, AgentError> {
        self(prompts, parameters)
    }
}

/// Models available to stored agent definitions, by name.
#[derive(Clone, Default)]
pub struct ModelCatalog {
    models: HashMap<String, Arc<dyn LanguageModel>>,
    default_model: Option<String>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `model` under `name`. The first registered model becomes the default.
    pub fn register(&mut self, name: impl Into<String>, model: Arc<dyn LanguageModel>) {
        let name = name.into();
        if self.default_model.is_none() {
            self.default_model = Some(name.clone());
        }
        self.models.insert(name, model);
    }

    pub fn set_default(&mut self, name: impl Into<String>) {
        self.default_model = Some(name.into());
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn LanguageModel>> {
        self.models.get(name).cloned()
    }

    pub fn default_model(&self) -> Option<Arc<dyn LanguageModel>> {
        self.default_model.as_deref().and_then(|name| self.get(name))
    }

    /// Model for an agent definition: the named one, or the default when unnamed.
    ///
    /// An unknown name is an error; no default is `Ok(None)`.
    pub fn resolve(&self, name: Option<&str>) -> Result<Option<Arc<dyn LanguageModel>>, AgentError> {
        match name {
            Some(name) => self
                .get(name)
                .map(Some)
                .ok_or_else(|| AgentError::ConfigError(format!("Model not found: {}", name))),
            None => Ok(self.default_model()),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
