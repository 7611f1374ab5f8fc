//! Parsed YAML documents, reused until their file changes.

use crate::error::AgentError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

struct Entry<T> {
    modified: SystemTime,
    value: T,
}

/// Keeps the parsed form of each YAML file keyed by path and stamped with the
/// file's modification time. A file is read and parsed again only when its
/// mtime differs from the stamp, so edits land on the next run.
pub struct DefinitionCache<T> {
    entries: HashMap<PathBuf, Entry<T>>,
}

impl<T: DeserializeOwned + Clone> DefinitionCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Parsed content of `path`.
    ///
    /// A file that fails to parse is not cached, and neither is an empty one.
    pub fn load(&mut self, path: &Path) -> Result<T, AgentError> {
        let modified = std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .map_err(|e| {
                AgentError::ConfigError(format!("Failed to stat {}: {}", path.display(), e))
            })?;
        if let Some(entry) = self.entries.get(path).filter(|e| e.modified == modified) {
            return Ok(entry.value.clone());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AgentError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Err(AgentError::ConfigError(format!("{} is empty", path.display())));
        }
        let value: T = serde_yaml::from_str(&content).map_err(|e| {
            AgentError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        self.entries.insert(
            path.to_path_buf(),
            Entry {
                modified,
                value: value.clone(),
            },
        );
        Ok(value)
    }

    /// Drop the entry for `path`; the next load reads the file again.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: DeserializeOwned + Clone> Default for DefinitionCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
