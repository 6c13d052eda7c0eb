//! Recording diagnostic logger.

use std::cell::RefCell;

use ctx_core::DiagnosticLogger;

/// Keeps every line written to it.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: RefCell<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl DiagnosticLogger for RecordingLogger {
    fn write_line(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}
