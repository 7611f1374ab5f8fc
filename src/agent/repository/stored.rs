//! Agent definitions stored as YAML files.

use crate::agent::domain::{validate_agent_definition, AgentConfig, AgentDefinition};
use crate::agent::model::ModelCatalog;
use crate::agent::repository::{AgentDataProvider, DefinitionCache};
use crate::agent::storage::StorageBackend;
use crate::config::AgentPaths;
use crate::error::AgentError;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Provider reading `{agents_dir}/{agent_name}.yaml` and, when the definition
/// names one, `{personas_dir}/{persona}.yaml`.
///
/// Models are looked up in a [`ModelCatalog`]; every agent shares the same
/// storage handle.
pub struct StoredAgentProvider {
    agents_dir: PathBuf,
    personas_dir: PathBuf,
    models: ModelCatalog,
    storage: Option<Arc<dyn StorageBackend>>,
    definitions: Mutex<DefinitionCache<AgentDefinition>>,
    personas: Mutex<DefinitionCache<Map<String, Value>>>,
}

impl StoredAgentProvider {
    pub fn new(agents_dir: impl Into<PathBuf>, personas_dir: impl Into<PathBuf>, models: ModelCatalog) -> Self {
        Self {
            agents_dir: agents_dir.into(),
            personas_dir: personas_dir.into(),
            models,
            storage: None,
            definitions: Mutex::new(DefinitionCache::new()),
            personas: Mutex::new(DefinitionCache::new()),
        }
    }

    /// Provider for the configured folders, resolved against `project_root`.
    pub fn from_paths(project_root: &Path, paths: &AgentPaths, models: ModelCatalog) -> Self {
        let (agents_dir, personas_dir) = paths.resolve(project_root);
        Self::new(agents_dir, personas_dir, models)
    }

    pub fn with_storage(mut self, storage: Arc<dyn StorageBackend>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn agent_path(&self, agent_name: &str) -> PathBuf {
        self.agents_dir.join(format!("{}.yaml", agent_name))
    }

    pub fn persona_path(&self, persona: &str) -> PathBuf {
        self.personas_dir.join(format!("{}.yaml", persona))
    }

    /// Stems of all `*.yaml` definitions in the agents folder, sorted.
    pub fn list_agents(&self) -> Result<Vec<String>, AgentError> {
        if !self.agents_dir.exists() {
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&self.agents_dir).map_err(|e| {
            AgentError::ConfigError(format!(
                "Failed to read agents directory {}: {}",
                self.agents_dir.display(),
                e
            ))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        "Failed to read directory entry in {}: {}",
                        self.agents_dir.display(),
                        e
                    );
                    continue;
                }
            };
            let path = entry.path();
            if path.extension() != Some(std::ffi::OsStr::new("yaml")) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(name) => names.push(name.to_string()),
                None => tracing::warn!("Invalid agent filename non UTF8: {:?}", path),
            }
        }
        names.sort();
        Ok(names)
    }

    fn load_definition(&self, agent_name: &str) -> Result<AgentDefinition, AgentError> {
        let definition = self.definitions.lock().load(&self.agent_path(agent_name))?;
        validate_agent_definition(agent_name, &definition).map_err(AgentError::ConfigError)?;
        Ok(definition)
    }

    fn load_persona(&self, persona: &str) -> Result<Map<String, Value>, AgentError> {
        self.personas.lock().load(&self.persona_path(persona))
    }
}

impl AgentDataProvider for StoredAgentProvider {
    fn load_agent_data(&self, agent_name: &str) -> Result<AgentConfig, AgentError> {
        let unavailable = |e: AgentError| AgentError::DataUnavailable {
            agent: agent_name.to_string(),
            reason: e.to_string(),
        };

        let definition = self.load_definition(agent_name).map_err(unavailable)?;
        let persona = definition
            .persona
            .as_deref()
            .map(|persona| self.load_persona(persona))
            .transpose()
            .map_err(unavailable)?;
        let model = self
            .models
            .resolve(definition.model.as_deref())
            .map_err(unavailable)?;

        Ok(AgentConfig {
            parameters: definition.params,
            prompt_templates: definition.prompts,
            persona,
            model,
            storage: self.storage.clone(),
        })
    }
}
