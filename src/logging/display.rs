//! Interactive display surface for results.

use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Where [`Logger::log_result`](crate::logging::Logger::log_result) and
/// [`Logger::log_info`](crate::logging::Logger::log_info) show their text.
pub trait ResultDisplay: Send + Sync {
    fn show_result(&self, description: &str, result: &str) -> io::Result<()>;
    fn show_info(&self, message: &str) -> io::Result<()>;
}

/// Coloured stdout display.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDisplay;

impl ResultDisplay for ConsoleDisplay {
    fn show_result(&self, description: &str, result: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", format!("***** {} *****", description).green().bold())?;
        writeln!(out, "{}", result.white())?;
        writeln!(out, "{}", "*****".green().bold())?;
        out.flush()
    }

    fn show_info(&self, message: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", message.red().bold())?;
        out.flush()
    }
}

/// Display that shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentDisplay;

impl ResultDisplay for SilentDisplay {
    fn show_result(&self, _description: &str, _result: &str) -> io::Result<()> {
        Ok(())
    }

    fn show_info(&self, _message: &str) -> io::Result<()> {
        Ok(())
    }
}
