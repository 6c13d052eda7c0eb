//! Recording target context.

use std::collections::HashSet;

use ctx_core::{ContextError, DiagnosticLogger, ItemMetadata, WorkspaceContext};
use ctx_fs::NormalizedPath;

/// One call the context accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextCall {
    Add {
        path: String,
        metadata: ItemMetadata,
        is_active_context: bool,
    },
    Remove {
        path: String,
    },
    Update {
        path: String,
        previous: ItemMetadata,
        current: ItemMetadata,
        is_active_context: bool,
    },
}

impl ContextCall {
    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. } | Self::Remove { path } | Self::Update { path, .. } => path,
        }
    }
}

/// Target context that keeps a log of every accepted call.
///
/// Calls for paths registered with [`RecordingContext::fail_on`] are
/// rejected and not recorded. Each accepted call also writes one line to the
/// logger it was handed.
#[derive(Debug, Default)]
pub struct RecordingContext {
    calls: Vec<ContextCall>,
    failing: HashSet<String>,
    rejected: usize,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every call for `full_path`.
    pub fn fail_on(mut self, full_path: &str) -> Self {
        self.failing.insert(full_path.to_string());
        self
    }

    /// Stop rejecting calls for `full_path`.
    pub fn heal(&mut self, full_path: &str) {
        self.failing.remove(full_path);
    }

    pub fn calls(&self) -> &[ContextCall] {
        &self.calls
    }

    /// Number of calls rejected so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Every accepted call touching `path`, in call order.
    pub fn calls_for(&self, path: &str) -> Vec<&ContextCall> {
        self.calls.iter().filter(|call| call.path() == path).collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    fn check(&mut self, full_path: &NormalizedPath) -> Result<(), ContextError> {
        if self.failing.contains(full_path.as_str()) {
            self.rejected += 1;
            return Err(ContextError::new(format!("rejected {full_path}")));
        }
        Ok(())
    }
}

impl WorkspaceContext for RecordingContext {
    fn add_item(
        &mut self,
        full_path: &NormalizedPath,
        metadata: &ItemMetadata,
        is_active_context: bool,
        logger: &dyn DiagnosticLogger,
    ) -> Result<(), ContextError> {
        self.check(full_path)?;
        logger.write_line(&format!("Adding {full_path}"));
        self.calls.push(ContextCall::Add {
            path: full_path.to_string(),
            metadata: metadata.clone(),
            is_active_context,
        });
        Ok(())
    }

    fn remove_item(
        &mut self,
        full_path: &NormalizedPath,
        logger: &dyn DiagnosticLogger,
    ) -> Result<(), ContextError> {
        self.check(full_path)?;
        logger.write_line(&format!("Removing {full_path}"));
        self.calls.push(ContextCall::Remove {
            path: full_path.to_string(),
        });
        Ok(())
    }

    fn update_item(
        &mut self,
        full_path: &NormalizedPath,
        previous_metadata: &ItemMetadata,
        current_metadata: &ItemMetadata,
        is_active_context: bool,
        logger: &dyn DiagnosticLogger,
    ) -> Result<(), ContextError> {
        self.check(full_path)?;
        logger.write_line(&format!("Updating {full_path}"));
        self.calls.push(ContextCall::Update {
            path: full_path.to_string(),
            previous: previous_metadata.clone(),
            current: current_metadata.clone(),
            is_active_context,
        });
        Ok(())
    }
}
