// src/cli/terminal_logger.rs

use crate::core::context::{ConsoleLogger, Severity};
use colored::Colorize;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Prints operator-facing messages to the terminal.
///
/// Messages below the minimum severity, or any message while the logger is
/// disabled, are dropped. Both settings change at runtime through the
/// `logger` built-in commands.
#[derive(Debug)]
pub struct TerminalLogger {
    enabled: AtomicBool,
    min_severity: AtomicU8,
}

impl TerminalLogger {
    pub fn new(min_severity: Severity, enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            min_severity: AtomicU8::new(min_severity.as_u8()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn min_severity(&self) -> Severity {
        Severity::from_u8(self.min_severity.load(Ordering::Relaxed))
    }

    pub fn set_min_severity(&self, severity: Severity) {
        self.min_severity.store(severity.as_u8(), Ordering::Relaxed);
    }

    /// Whether a message of `severity` would be printed right now.
    pub fn accepts(&self, severity: Severity) -> bool {
        self.is_enabled() && severity >= self.min_severity()
    }
}

impl Default for TerminalLogger {
    fn default() -> Self {
        Self::new(Severity::Info, true)
    }
}

impl ConsoleLogger for TerminalLogger {
    fn log(&self, message: &str, severity: Severity) {
        if !self.accepts(severity) {
            return;
        }
        match severity {
            Severity::Debug => println!("{}", message.dimmed()),
            Severity::Info => println!("{}", message),
            Severity::Warning => println!("{}", message.yellow()),
            Severity::Error => eprintln!("{}", message.red().bold()),
        }
    }
}
