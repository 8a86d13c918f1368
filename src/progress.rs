//! Progress reporting for long-running research
//!
//! Background research takes minutes; the poller pushes percent/message
//! updates through a [`ProgressSink`] so callers choose how to surface
//! them. The CLI prints to the terminal; tests record the calls.

use colored::Colorize;

/// Observer for polling progress
pub trait ProgressSink: Send {
    /// Percent complete (0-100) plus a short human-readable message
    fn update(&mut self, percent: u8, message: &str);

    /// A non-fatal problem worth surfacing without stopping the caller
    fn error(&mut self, message: &str);
}

/// Sink that prints progress lines to the terminal
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ConsoleProgress {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressSink for ConsoleProgress {
    fn update(&mut self, percent: u8, message: &str) {
        println!("{} {}", format!("[{:>3}%]", percent).cyan(), message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("{} {}", "Error:".red(), message);
    }
}

/// Sink that discards all updates
#[derive(Debug, Default)]
pub struct NullProgress;

impl NullProgress {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressSink for NullProgress {
    fn update(&mut self, _percent: u8, _message: &str) {}

    fn error(&mut self, _message: &str) {}
}
