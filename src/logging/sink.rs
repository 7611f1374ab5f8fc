//! Physical log destinations.
//!
//! A [`Sink`] owns one writer (an append-mode file or a console stream) behind its
//! own mutex, so concurrent channels sharing it never interleave partial records.

use crate::error::LogError;
use crate::logging::level::{Level, Threshold};
use chrono::Local;
use parking_lot::Mutex;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};

/// Line written after every file record.
pub const RECORD_SEPARATOR: &str = "-------------------------------------------------------------";

/// What a sink writes to; also selects the record layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkKind {
    File { path: PathBuf },
    Console { channel: String },
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::File { path } => write!(f, "file {}", path.display()),
            SinkKind::Console { channel } => write!(f, "console [{}]", channel),
        }
    }
}

pub struct Sink {
    kind: SinkKind,
    threshold: AtomicU8,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Sink {
    /// Open (or create) `path` in append mode.
    pub fn file(path: &Path, threshold: Threshold) -> Result<Self, LogError> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            kind: SinkKind::File {
                path: path.to_path_buf(),
            },
            threshold: AtomicU8::new(threshold.rank()),
            writer: Mutex::new(Box::new(file)),
        })
    }

    pub fn console(channel: &str, writer: Box<dyn Write + Send>, threshold: Threshold) -> Self {
        Self {
            kind: SinkKind::Console {
                channel: channel.to_string(),
            },
            threshold: AtomicU8::new(threshold.rank()),
            writer: Mutex::new(writer),
        }
    }

    pub fn kind(&self) -> &SinkKind {
        &self.kind
    }

    pub fn threshold(&self) -> Threshold {
        Threshold::from_rank(self.threshold.load(Ordering::Acquire))
    }

    pub fn set_threshold(&self, threshold: Threshold) {
        self.threshold.store(threshold.rank(), Ordering::Release);
    }

    /// Write one record if the sink's own threshold admits `level`.
    pub fn write_record(&self, level: Level, message: &str) -> Result<(), LogError> {
        if !self.threshold().admits(level) {
            return Ok(());
        }
        let record = self.format_record(level, message);
        let mut writer = self.writer.lock();
        writer
            .write_all(record.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|source| LogError::Write {
                sink: self.kind.to_string(),
                source,
            })
    }

    fn format_record(&self, level: Level, message: &str) -> String {
        match self.kind {
            SinkKind::File { .. } => format!(
                "{} - {} - {}\n{}\n",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                level,
                message,
                RECORD_SEPARATOR
            ),
            SinkKind::Console { .. } => format!("{}: {}\n\n", level, message),
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("kind", &self.kind)
            .field("threshold", &self.threshold())
            .finish()
    }
}
