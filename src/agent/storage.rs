//! Storage backend contract and an in-memory backend.

use crate::error::AgentError;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// Durable append of named records.
pub trait StorageBackend: Send + Sync {
    fn save_record(&self, channel: &str, records: &[Value]) -> Result<(), AgentError>;
}

/// Records kept in process memory, grouped by channel.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    channels: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records appended to `channel`, oldest first.
    pub fn records(&self, channel: &str) -> Vec<Value> {
        self.channels.read().get(channel).cloned().unwrap_or_default()
    }

    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl StorageBackend for MemoryStorage {
    fn save_record(&self, channel: &str, records: &[Value]) -> Result<(), AgentError> {
        self.channels
            .write()
            .entry(channel.to_string())
            .or_default()
            .extend(records.iter().cloned());
        Ok(())
    }
}
