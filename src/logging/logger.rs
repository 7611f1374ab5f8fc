//! Channel registrar
//!
//! A [`Logger`] is what agents and other components hold. It owns one
//! [`BaseLogger`] per configured channel, prefixes every message with the
//! caller's identity, and routes to one channel or broadcasts to all of them.

use crate::config::{LoggingSettings, DEFAULT_CHANNEL, MODEL_IO_CHANNEL, RESULTS_CHANNEL};
use crate::error::LogError;
use crate::logging::channel::BaseLogger;
use crate::logging::display::{ConsoleDisplay, ResultDisplay};
use crate::logging::level::Level;
use crate::logging::registry::SinkRegistry;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Which channels a log call reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// The `AgentForge` channel
    Default,
    Channel(&'a str),
    /// Every configured channel
    All,
}

impl<'a> From<&'a str> for Target<'a> {
    /// `"all"` (any case) broadcasts; anything else names a channel.
    fn from(name: &'a str) -> Self {
        if name.eq_ignore_ascii_case("all") {
            Target::All
        } else {
            Target::Channel(name)
        }
    }
}

pub struct Logger {
    caller: String,
    channels: Vec<BaseLogger>,
    display: Arc<dyn ResultDisplay>,
}

impl Logger {
    /// Build a logger for `caller` with one channel per configured entry,
    /// writing to `{folder}/{name}.log`.
    ///
    /// Sinks come from `registry`; loggers sharing a registry share sinks.
    /// Fails on an unknown level name or an unusable log folder.
    pub fn new(
        caller: impl Into<String>,
        settings: &LoggingSettings,
        registry: Arc<SinkRegistry>,
    ) -> Result<Self, LogError> {
        let mut channels: Vec<BaseLogger> = Vec::with_capacity(settings.channels.len());
        for entry in &settings.channels {
            let level: Level = entry.level.parse()?;
            // A repeated name keeps its first position and its last level.
            if let Some(existing) = channels
                .iter()
                .find(|existing| existing.name().eq_ignore_ascii_case(&entry.name))
            {
                existing.set_severity(level.as_str())?;
                continue;
            }
            let file_name = format!("{}.log", entry.name);
            channels.push(BaseLogger::new(&registry, settings, &entry.name, &file_name, level)?);
        }
        Ok(Self {
            caller: caller.into(),
            channels,
            display: Arc::new(ConsoleDisplay),
        })
    }

    /// Replace the result display surface.
    pub fn with_display(mut self, display: Arc<dyn ResultDisplay>) -> Self {
        self.display = display;
        self
    }

    pub fn caller(&self) -> &str {
        &self.caller
    }

    /// Channel by name, ignoring ASCII case.
    pub fn channel(&self, name: &str) -> Option<&BaseLogger> {
        self.channels
            .iter()
            .find(|channel| channel.name().eq_ignore_ascii_case(name))
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(BaseLogger::name)
    }

    /// Log `msg` at the level named `level`.
    pub fn log<'t>(
        &self,
        msg: &str,
        level: &str,
        target: impl Into<Target<'t>>,
    ) -> Result<(), LogError> {
        let level: Level = level.parse()?;
        self.log_at(msg, level, target)
    }

    /// Log `msg` at `level`. Broadcasts visit every channel before reporting
    /// the first failure.
    pub fn log_at<'t>(
        &self,
        msg: &str,
        level: Level,
        target: impl Into<Target<'t>>,
    ) -> Result<(), LogError> {
        let msg = format!("[{}] {}", self.caller, msg);
        match target.into() {
            Target::All => {
                let mut first_error = None;
                for channel in &self.channels {
                    if let Err(e) = channel.log_at(&msg, level) {
                        first_error.get_or_insert(e);
                    }
                }
                first_error.map_or(Ok(()), Err)
            }
            Target::Default => self.resolve(DEFAULT_CHANNEL)?.log_at(&msg, level),
            Target::Channel(name) => self.resolve(name)?.log_at(&msg, level),
        }
    }

    /// Log `msg` with a context record describing `fault`.
    pub fn log_fault<'t>(
        &self,
        msg: &str,
        level: Level,
        target: impl Into<Target<'t>>,
        fault: &dyn Error,
    ) -> Result<(), LogError> {
        let msg = format!("[{}] {}", self.caller, msg);
        match target.into() {
            Target::All => {
                let mut first_error = None;
                for channel in &self.channels {
                    if let Err(e) = channel.log_fault(&msg, level, fault) {
                        first_error.get_or_insert(e);
                    }
                }
                first_error.map_or(Ok(()), Err)
            }
            Target::Default => self.resolve(DEFAULT_CHANNEL)?.log_fault(&msg, level, fault),
            Target::Channel(name) => self.resolve(name)?.log_fault(&msg, level, fault),
        }
    }

    /// Critical record plus fault context on the default channel; the fault is
    /// returned for the caller to propagate.
    pub fn log_critical<E: Error>(&self, msg: &str, fault: E) -> E {
        if let Err(e) = self.log_fault(msg, Level::Critical, Target::Default, &fault) {
            tracing::warn!(caller = %self.caller, error = %e, "Failed to write critical record");
        }
        fault
    }

    pub fn log_prompt(&self, prompt: &str) -> Result<(), LogError> {
        self.log_at(&format!("Prompt:\n{}", prompt), Level::Debug, MODEL_IO_CHANNEL)
    }

    pub fn log_response(&self, response: &str) -> Result<(), LogError> {
        self.log_at(
            &format!("Model Response:\n{}", response),
            Level::Debug,
            MODEL_IO_CHANNEL,
        )
    }

    /// Record a model response that could not be parsed into the expected shape.
    pub fn log_parsing_error(
        &self,
        model_response: &str,
        error: &dyn fmt::Display,
    ) -> Result<(), LogError> {
        self.log_at(
            &format!(
                "Parsing Error - It is very likely the model did not respond in the required \
                 format\n\nModel Response:\n{}\n\nError: {}",
                model_response, error
            ),
            Level::Error,
            Target::Default,
        )
    }

    /// Show `result` on the display surface and record it on the `Results` channel.
    ///
    /// Display or logging failures are written to the default channel instead.
    pub fn log_result(&self, result: &str, description: &str) -> Result<(), LogError> {
        let outcome = match self.display.show_result(description, result) {
            Err(e) => Err(format!("File operation error: {}", e)),
            Ok(()) => self
                .log_at(&format!("\n{}", result), Level::Info, RESULTS_CHANNEL)
                .map_err(|e| format!("Error logging result: {}", e)),
        };
        match outcome {
            Ok(()) => Ok(()),
            Err(msg) => self.log_at(&msg, Level::Error, Target::Default),
        }
    }

    /// Show a highlighted message and record it on the `Results` channel.
    pub fn log_info(&self, msg: &str) -> Result<(), LogError> {
        let outcome = self
            .display
            .show_info(msg)
            .map_err(|e| format!("Error logging message: {}", e))
            .and_then(|()| {
                self.log_at(&format!("\n{}", msg), Level::Info, RESULTS_CHANNEL)
                    .map_err(|e| format!("Error logging message: {}", e))
            });
        match outcome {
            Ok(()) => Ok(()),
            Err(msg) => self.log_at(&msg, Level::Error, Target::Default),
        }
    }

    /// Change the threshold of one channel, or of all of them.
    pub fn set_severity<'t>(&self, target: impl Into<Target<'t>>, level: &str) -> Result<(), LogError> {
        match target.into() {
            Target::All => {
                for channel in &self.channels {
                    channel.set_severity(level)?;
                }
                Ok(())
            }
            Target::Default => self.resolve(DEFAULT_CHANNEL)?.set_severity(level),
            Target::Channel(name) => self.resolve(name)?.set_severity(level),
        }
    }

    fn resolve(&self, name: &str) -> Result<&BaseLogger, LogError> {
        self.channel(name)
            .ok_or_else(|| LogError::UnknownChannel(name.to_string()))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("caller", &self.caller)
            .field("channels", &self.channels)
            .finish()
    }
}
