//! Error types for ctx-core

use std::fmt;

use ctx_fs::NormalizedPath;

/// Result type for ctx-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while applying diffs
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller or producer broke an ordering or bookkeeping invariant.
    ///
    /// State after one of these is untrustworthy; callers must not swallow it.
    #[error("Contract violation: {0}")]
    Contract(#[from] ContractViolation),

    /// The target context failed an add, remove or update
    #[error("Target context rejected {operation} of {path}: {source}")]
    ContextRejected {
        operation: ContextOperation,
        path: NormalizedPath,
        #[source]
        source: ContextError,
    },

    /// A constructor argument was empty or malformed
    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Filesystem or config error from ctx-fs
    #[error(transparent)]
    Fs(#[from] ctx_fs::Error),
}

impl Error {
    /// Whether this error signals a broken invariant rather than a sink failure.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract(_))
    }
}

/// Invariants whose violation indicates a caller bug
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    #[error("evaluation version {version} regressed behind {latest}")]
    VersionRegressed { version: String, latest: String },

    #[error("evaluation version {evaluation} is not later than build version {build}")]
    StaleEvaluation { evaluation: String, build: String },

    #[error("build diff carries {count} changed item(s); builds never report changes")]
    ChangedItemsInBuild { count: usize },

    #[error("{path} is already tracked")]
    PathAlreadyPresent { path: NormalizedPath },

    #[error("{path} is not tracked")]
    PathNotPresent { path: NormalizedPath },
}

/// Which target context operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextOperation {
    Add,
    Remove,
    Update,
}

impl fmt::Display for ContextOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Update => "update",
        };
        f.write_str(name)
    }
}

/// Error raised by a [`WorkspaceContext`](crate::WorkspaceContext) implementation
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ContextError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ContextError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
