//! Severity levels and channel thresholds.

use crate::error::LogError;
use std::fmt;
use std::str::FromStr;

/// Message severity, ordered `Debug < Info < Warning < Error < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Numeric rank; thresholds compare against it.
    pub const fn rank(self) -> u8 {
        match self {
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warning => 30,
            Level::Error => 40,
            Level::Critical => 50,
        }
    }

    /// Upper-case name used in formatted records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            _ => Err(LogError::InvalidLevel(name.to_string())),
        }
    }
}

/// Minimum rank a record needs to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(u8);

impl Threshold {
    /// One above [`Level::Critical`]; nothing passes.
    pub const DISABLED: Threshold = Threshold(Level::Critical.rank() + 1);

    pub const fn at(level: Level) -> Self {
        Threshold(level.rank())
    }

    pub const fn rank(self) -> u8 {
        self.0
    }

    pub const fn from_rank(rank: u8) -> Self {
        Threshold(rank)
    }

    pub fn admits(self, level: Level) -> bool {
        level.rank() >= self.0
    }
}

impl From<Level> for Threshold {
    fn from(level: Level) -> Self {
        Threshold::at(level)
    }
}
