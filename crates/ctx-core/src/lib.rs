//! Reconciliation core for context-sync
//!
//! Keeps a target compiler context in step with two producers of change:
//!
//! - **Evaluation**: fast and authoritative, reports project items with
//!   metadata
//! - **Design-time build**: slow, reports argument-shaped items against a
//!   snapshot that may already be stale
//!
//! # Architecture
//!
//! ```text
//!   apply_project_evaluation        apply_project_build
//!            |                              |
//!       normalize                      normalize
//!            |                              |
//!     EvaluationQueue  <--prune/read--  resolve_build_conflicts
//!            |                              |
//!            +------> ContextSynchronizer <-+
//!                        |          |
//!                     PathSet   WorkspaceContext
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ctx_core::{ChangeDiff, CommandLineHandler, NullLogger, ProjectMetadata};
//! use ctx_fs::ProjectRoot;
//!
//! let mut handler = CommandLineHandler::new(ProjectRoot::new("/repo")?, my_context);
//! let none = ProjectMetadata::new();
//! handler.apply_project_evaluation(1u64, ChangeDiff::new().with_added(["a.cs"]), &none, &none, true, &NullLogger)?;
//! handler.apply_project_build(1u64, ChangeDiff::new().with_added(["a.cs"]), true, &NullLogger)?;
//! ```

pub mod config;
pub mod context;
pub mod diff;
pub mod error;
pub mod handler;
pub mod metadata;
pub mod output_group;
pub mod paths;
pub mod sync;
pub mod version;

pub use config::{HandlerConfig, PathComparison};
pub use context::{DiagnosticLogger, NullLogger, TracingLogger, WorkspaceContext};
pub use diff::{ChangeDiff, NormalizedDiff};
pub use error::{ContextError, ContextOperation, ContractViolation, Error, Result};
pub use handler::CommandLineHandler;
pub use metadata::{EXCLUDE_FROM_CURRENT_CONFIGURATION, ItemMetadata, ProjectMetadata};
pub use output_group::OutputGroup;
pub use paths::PathSet;
pub use sync::{
    ApplySummary, ContextSynchronizer, EvaluationQueue, VersionedDiff, resolve_build_conflicts,
};
pub use version::Version;
