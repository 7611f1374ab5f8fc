//! Channel sink manager
//!
//! A [`BaseLogger`] is one named channel: a threshold plus the file and console
//! sinks obtained from the [`SinkRegistry`]. When logging is globally disabled the
//! channel opens no sinks and its threshold sits above every level.

use crate::config::LoggingSettings;
use crate::error::LogError;
use crate::logging::level::{Level, Threshold};
use crate::logging::registry::SinkRegistry;
use crate::logging::sink::Sink;
use std::error::Error;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const ERROR_CONTEXT: &str = "Exception Error Occurred!";
const CRITICAL_CONTEXT: &str = "Critical Exception Occurred!";

#[derive(Debug)]
pub struct BaseLogger {
    name: String,
    enabled: bool,
    threshold: AtomicU8,
    sinks: Vec<Arc<Sink>>,
}

impl BaseLogger {
    /// Build the channel `name` writing to `file_name` inside the configured folder.
    pub fn new(
        registry: &SinkRegistry,
        settings: &LoggingSettings,
        name: &str,
        file_name: &str,
        level: Level,
    ) -> Result<Self, LogError> {
        if !settings.enabled {
            return Ok(Self {
                name: name.to_string(),
                enabled: false,
                threshold: AtomicU8::new(Threshold::DISABLED.rank()),
                sinks: Vec::new(),
            });
        }

        let threshold = Threshold::at(level);
        let file = registry.file_sink(&settings.folder, file_name, threshold)?;
        let console = registry.console_sink(name, threshold);
        Ok(Self {
            name: name.to_string(),
            enabled: true,
            threshold: AtomicU8::new(threshold.rank()),
            sinks: vec![file, console],
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> Threshold {
        Threshold::from_rank(self.threshold.load(Ordering::Acquire))
    }

    pub fn sinks(&self) -> &[Arc<Sink>] {
        &self.sinks
    }

    /// Log `msg` at the level named `level`.
    ///
    /// Error messages are followed by an exception-context record. Critical
    /// messages are written with their context record and then reported as
    /// [`LogError::CriticalWithoutFault`]; use [`BaseLogger::log_critical`] to
    /// propagate an actual fault. Nothing happens below the threshold.
    pub fn log_message(&self, msg: &str, level: &str) -> Result<(), LogError> {
        self.log_at(msg, level.parse()?)
    }

    /// [`BaseLogger::log_message`] with an already parsed level.
    pub fn log_at(&self, msg: &str, level: Level) -> Result<(), LogError> {
        if !self.threshold().admits(level) {
            return Ok(());
        }
        match level {
            Level::Debug | Level::Info | Level::Warning => self.emit(level, msg),
            Level::Error => {
                self.emit(level, msg)?;
                self.emit(level, ERROR_CONTEXT)
            }
            Level::Critical => {
                self.emit(level, msg)?;
                self.emit(Level::Error, CRITICAL_CONTEXT)?;
                Err(LogError::CriticalWithoutFault)
            }
        }
    }

    /// Log `msg` and a context record describing `fault` and its sources.
    pub fn log_fault(&self, msg: &str, level: Level, fault: &dyn Error) -> Result<(), LogError> {
        self.emit(level, msg)?;
        let context = match level {
            Level::Critical => CRITICAL_CONTEXT,
            _ => ERROR_CONTEXT,
        };
        self.emit(Level::Error, &describe_fault(context, fault))
    }

    /// Log `msg` at critical severity with the fault's context, then hand the
    /// fault back so the caller re-raises it.
    pub fn log_critical<E: Error>(&self, msg: &str, fault: E) -> E {
        if let Err(e) = self.log_fault(msg, Level::Critical, &fault) {
            tracing::warn!(channel = %self.name, error = %e, "Failed to write critical record");
        }
        fault
    }

    /// Write one record to every sink if the channel admits it.
    pub fn emit(&self, level: Level, msg: &str) -> Result<(), LogError> {
        if !self.threshold().admits(level) {
            return Ok(());
        }
        for sink in &self.sinks {
            sink.write_record(level, msg)?;
        }
        Ok(())
    }

    /// Set the threshold of the channel and of every attached sink.
    ///
    /// A disabled channel only validates `level`.
    pub fn set_severity(&self, level: &str) -> Result<(), LogError> {
        let threshold = Threshold::at(level.parse()?);
        if !self.enabled {
            return Ok(());
        }
        self.threshold.store(threshold.rank(), Ordering::Release);
        for sink in &self.sinks {
            sink.set_threshold(threshold);
        }
        Ok(())
    }
}

fn describe_fault(context: &str, fault: &dyn Error) -> String {
    let mut text = format!("{}\n{}", context, fault);
    let mut source = fault.source();
    while let Some(cause) = source {
        text.push_str(&format!("\nCaused by: {}", cause));
        source = cause.source();
    }
    text
}
