// ABOUTME: Centralized CLI output utilities for consistent user-facing messages
// ABOUTME: Provides standardized formatting for errors, warnings, info and success messages

use owo_colors::OwoColorize;
use std::cell::RefCell;
use std::fmt;
use std::io::{IsTerminal, Write};
use std::rc::Rc;

/// Centralized CLI output utilities for consistent formatting.
///
/// Lines go to stderr unless a writer was supplied with [`CliOutput::with_writer`].
#[derive(Clone)]
pub struct CliOutput {
    use_color: bool,
    writer: Option<Rc<RefCell<dyn Write>>>,
}

impl CliOutput {
    /// Create new CLI output utility with TTY detection
    pub fn new() -> Self {
        Self {
            use_color: std::io::stderr().is_terminal(),
            writer: None,
        }
    }

    /// Create CLI output utility with explicit color setting
    pub fn with_color(use_color: bool) -> Self {
        Self {
            use_color,
            writer: None,
        }
    }

    /// Send every line to `writer` instead of stderr
    pub fn with_writer(use_color: bool, writer: Rc<RefCell<dyn Write>>) -> Self {
        Self {
            use_color,
            writer: Some(writer),
        }
    }

    /// Display an error message
    pub fn error(&self, message: &str) {
        self.emit(self.format("error:", message, Level::Error));
    }

    /// Display a warning message
    pub fn warning(&self, message: &str) {
        self.emit(self.format("warning:", message, Level::Warning));
    }

    /// Display an informational message
    pub fn info(&self, message: &str) {
        self.emit(self.format("info:", message, Level::Info));
    }

    /// Display a success message
    pub fn success(&self, message: &str) {
        self.emit(self.format("success:", message, Level::Success));
    }

    fn emit(&self, line: String) {
        match &self.writer {
            Some(writer) => {
                // Diagnostics are best effort
                let _ = writeln!(writer.borrow_mut(), "{}", line);
            }
            None => eprintln!("{}", line),
        }
    }

    fn format(&self, label: &str, message: &str, level: Level) -> String {
        if !self.use_color {
            return format!("{} {}", label, message);
        }

        let label = match level {
            Level::Error => label.red().bold().to_string(),
            Level::Warning => label.yellow().bold().to_string(),
            Level::Info => label.blue().bold().to_string(),
            Level::Success => label.green().bold().to_string(),
        };
        format!("{} {}", label, message)
    }
}

#[derive(Clone, Copy)]
enum Level {
    Error,
    Warning,
    Info,
    Success,
}

impl fmt::Debug for CliOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliOutput")
            .field("use_color", &self.use_color)
            .field("captured", &self.writer.is_some())
            .finish()
    }
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new()
    }
}
