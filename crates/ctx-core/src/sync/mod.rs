//! Reconciliation of evaluation and build diffs
//!
//! This module provides:
//! - **queue**: evaluations not yet superseded by a build
//! - **resolver**: drops build changes contradicted by later evaluations
//! - **synchronizer**: pushes a resolved diff into the target context

mod queue;
mod resolver;
mod synchronizer;

pub use queue::{EvaluationQueue, VersionedDiff};
pub use resolver::resolve_build_conflicts;
pub use synchronizer::{ApplySummary, ContextSynchronizer};
