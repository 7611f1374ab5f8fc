use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use agentforge::agent::{AgentDataProvider, LanguageModel, StorageBackend};
use agentforge::config::LoggingSettings;
use agentforge::logging::{CaptureBuffer, SilentDisplay};
use agentforge::{Agent, AgentError, Logger, SinkRegistry};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tempfile::TempDir;

pub const CHANNELS: [&str; 3] = ["AgentForge", "ModelIO", "Results"];

/// Log folder in a temp dir plus a registry whose console sinks write to one buffer.
pub struct Harness {
    pub temp: TempDir,
    pub registry: Arc<SinkRegistry>,
    pub console: CaptureBuffer,
    pub settings: LoggingSettings,
}

impl Harness {
    pub fn new(level: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let console = CaptureBuffer::default();
        let writer = console.clone();
        let registry = Arc::new(SinkRegistry::with_console_writer(move || {
            Box::new(writer.clone()) as Box<dyn Write + Send>
        }));
        let settings = LoggingSettings::with_channels(
            temp.path().join("logs"),
            CHANNELS.iter().map(|name| (*name, level)),
        );
        Self {
            temp,
            registry,
            console,
            settings,
        }
    }

    pub fn disabled() -> Self {
        let mut harness = Self::new("debug");
        harness.settings = harness.settings.clone().disabled();
        harness
    }

    pub fn logger(&self, caller: &str) -> Arc<Logger> {
        Arc::new(
            Logger::new(caller, &self.settings, self.registry.clone())
                .unwrap()
                .with_display(Arc::new(SilentDisplay)),
        )
    }

    pub fn agent(&self, name: &str, provider: Arc<dyn AgentDataProvider>) -> Agent {
        Agent::new(name, provider, self.logger(name))
    }

    pub fn log_path(&self, channel: &str) -> PathBuf {
        self.settings.folder.join(format!("{}.log", channel))
    }

    /// Contents of a channel's log file; empty when it was never created.
    pub fn log_file(&self, channel: &str) -> String {
        std::fs::read_to_string(self.log_path(channel)).unwrap_or_default()
    }
}

pub fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

pub struct FailingStorage;

impl StorageBackend for FailingStorage {
    fn save_record(&self, _channel: &str, _records: &[Value]) -> Result<(), AgentError> {
        Err(AgentError::Storage("disk full".to_string()))
    }
}

pub fn model<F>(f: F) -> Arc<dyn LanguageModel>
where
    F: Fn(&[String], &Map<String, Value>) -> Result<String, AgentError> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub type ModelCall = (Vec<String>, Map<String, Value>);

/// Model stub that answers with a fixed reply and records every call.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<ModelCall>>>,
}

impl Recorder {
    pub fn replying(&self, reply: &str) -> Arc<dyn LanguageModel> {
        let calls = self.calls.clone();
        let reply = reply.to_string();
        model(move |prompts, parameters| {
            calls.lock().push((prompts.to_vec(), parameters.clone()));
            Ok(reply.clone())
        })
    }

    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.lock().clone()
    }
}

/// Model that answers with its prompts joined by newlines.
pub fn echo_model() -> Arc<dyn LanguageModel> {
    model(|prompts, _| Ok(prompts.join("\n")))
}
