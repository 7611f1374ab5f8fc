//! Shared sink registry
//!
//! Every channel obtains its sinks here. File sinks are keyed by file name and
//! console sinks by channel name; a second request for the same key returns the
//! sink created by the first, so loggers built for the same channel never open a
//! second file handle or console stream. Lookup-or-create runs under one mutex.
//!
//! The registry is an explicit value: share it with `Arc` between the loggers
//! that should deduplicate against each other.

use crate::error::LogError;
use crate::logging::level::Threshold;
use crate::logging::sink::Sink;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Produces the writer behind each new console sink.
pub type ConsoleWriterFactory = Arc<dyn Fn() -> Box<dyn Write + Send> + Send + Sync>;

#[derive(Default)]
struct SinkMaps {
    file_sinks: HashMap<String, Arc<Sink>>,
    console_sinks: HashMap<String, Arc<Sink>>,
}

pub struct SinkRegistry {
    sinks: Mutex<SinkMaps>,
    console_writer: ConsoleWriterFactory,
}

impl SinkRegistry {
    /// Registry whose console sinks write to stderr.
    pub fn new() -> Self {
        Self::with_console_writer(|| Box::new(std::io::stderr()) as Box<dyn Write + Send>)
    }

    /// Registry whose console sinks write to writers produced by `factory`.
    pub fn with_console_writer<F>(factory: F) -> Self
    where
        F: Fn() -> Box<dyn Write + Send> + Send + Sync + 'static,
    {
        Self {
            sinks: Mutex::new(SinkMaps::default()),
            console_writer: Arc::new(factory),
        }
    }

    /// Shared file sink for `file_name`, creating `folder` and the file on first use.
    ///
    /// `threshold` only applies when the sink is created by this call.
    pub fn file_sink(
        &self,
        folder: &Path,
        file_name: &str,
        threshold: Threshold,
    ) -> Result<Arc<Sink>, LogError> {
        let mut sinks = self.sinks.lock();
        if let Some(existing) = sinks.file_sinks.get(file_name) {
            return Ok(existing.clone());
        }

        std::fs::create_dir_all(folder).map_err(|source| LogError::Folder {
            path: folder.to_path_buf(),
            source,
        })?;
        let path = folder.join(file_name);
        let sink = Arc::new(Sink::file(&path, threshold)?);
        tracing::debug!(path = %path.display(), "Created file sink");
        sinks
            .file_sinks
            .insert(file_name.to_string(), sink.clone());
        Ok(sink)
    }

    /// Shared console sink for `channel`.
    ///
    /// `threshold` only applies when the sink is created by this call.
    pub fn console_sink(&self, channel: &str, threshold: Threshold) -> Arc<Sink> {
        let mut sinks = self.sinks.lock();
        let console_writer = &self.console_writer;
        sinks
            .console_sinks
            .entry(channel.to_string())
            .or_insert_with(|| {
                tracing::debug!(channel, "Created console sink");
                Arc::new(Sink::console(channel, console_writer(), threshold))
            })
            .clone()
    }

    pub fn file_sink_count(&self) -> usize {
        self.sinks.lock().file_sinks.len()
    }

    pub fn console_sink_count(&self) -> usize {
        self.sinks.lock().console_sinks.len()
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}
