//! Logger Multiplexer
//!
//! Named logging channels with per-channel severity, backed by file and console
//! sinks that are deduplicated through a shared [`SinkRegistry`].
//!
//! - [`Logger`] routes caller-prefixed messages to one channel or all of them.
//! - [`BaseLogger`] is a single channel and its sinks.
//! - [`diagnostics`] wires the crate's own `tracing` output.

pub mod capture;
pub mod channel;
pub mod diagnostics;
pub mod display;
pub mod level;
pub mod logger;
pub mod registry;
pub mod sink;

pub use capture::CaptureBuffer;
pub use channel::BaseLogger;
pub use diagnostics::{init_diagnostics, DiagnosticsConfig};
pub use display::{ConsoleDisplay, ResultDisplay, SilentDisplay};
pub use level::{Level, Threshold};
pub use logger::{Logger, Target};
pub use registry::{ConsoleWriterFactory, SinkRegistry};
pub use sink::{Sink, SinkKind, RECORD_SEPARATOR};
