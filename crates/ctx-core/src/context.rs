//! Collaborators the core drives: the target context and the diagnostics logger

use ctx_fs::NormalizedPath;

use crate::error::ContextError;
use crate::metadata::ItemMetadata;

/// Side channel for diagnostics, handed through to the target context untouched.
pub trait DiagnosticLogger {
    fn write_line(&self, message: &str);
}

/// Forwards diagnostic lines to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl DiagnosticLogger for TracingLogger {
    fn write_line(&self, message: &str) {
        tracing::info!(target: "ctx_core::diagnostics", "{message}");
    }
}

/// Discards every diagnostic line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl DiagnosticLogger for NullLogger {
    fn write_line(&self, _message: &str) {}
}

/// The sink that durably records compiler inputs.
///
/// The core never queries it. A call that returns `Err` is treated as not
/// having happened, so the core's belief about the sink stays at the last
/// accepted operation.
pub trait WorkspaceContext {
    fn add_item(
        &mut self,
        full_path: &NormalizedPath,
        metadata: &ItemMetadata,
        is_active_context: bool,
        logger: &dyn DiagnosticLogger,
    ) -> Result<(), ContextError>;

    fn remove_item(
        &mut self,
        full_path: &NormalizedPath,
        logger: &dyn DiagnosticLogger,
    ) -> Result<(), ContextError>;

    fn update_item(
        &mut self,
        full_path: &NormalizedPath,
        previous_metadata: &ItemMetadata,
        current_metadata: &ItemMetadata,
        is_active_context: bool,
        logger: &dyn DiagnosticLogger,
    ) -> Result<(), ContextError>;
}
