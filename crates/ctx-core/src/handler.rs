//! Per-project handler coordinating evaluations and builds
//!
//! Evaluations are fast and authoritative; design-time builds are slow and
//! may report changes computed against a snapshot several evaluations old.
//! Both are pushed into the target context: evaluations so new files show up
//! immediately, builds so generated files and argument-derived inputs show
//! up at all. The handler remembers what it already sent so a change
//! reported by both producers reaches the context once, and it drops build
//! changes that a later evaluation has already contradicted.
//!
//! Known gaps, kept as-is:
//!
//! - Changed items are not re-checked against the exclusion property.
//! - A build diff is relative to the previous build, not to evaluation, so
//!   an item the very first build implicitly drops stays in the context.
//!
//! The handler is not thread-safe; every call takes `&mut self`, so calls
//! for one project are serialized by construction.

use std::path::Path;

use ctx_fs::{NormalizedPath, ProjectRoot};

use crate::Result;
use crate::config::HandlerConfig;
use crate::context::{DiagnosticLogger, WorkspaceContext};
use crate::diff::ChangeDiff;
use crate::metadata::ProjectMetadata;
use crate::sync::{ApplySummary, ContextSynchronizer, EvaluationQueue, resolve_build_conflicts};
use crate::version::Version;

/// Reconciles evaluation and build diffs for one project into its target context.
#[derive(Debug)]
pub struct CommandLineHandler<V, C> {
    config: HandlerConfig,
    evaluations: EvaluationQueue<V>,
    synchronizer: ContextSynchronizer,
    context: C,
}

impl<V: Version, C: WorkspaceContext> CommandLineHandler<V, C> {
    /// Create a handler with the default configuration.
    pub fn new(root: ProjectRoot, context: C) -> Self {
        Self::with_config(root, context, HandlerConfig::default())
    }

    pub fn with_config(root: ProjectRoot, context: C, config: HandlerConfig) -> Self {
        let synchronizer = ContextSynchronizer::new(root, &config);
        Self {
            config,
            evaluations: EvaluationQueue::new(),
            synchronizer,
            context,
        }
    }

    /// Create a handler for the project rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not an absolute path.
    pub fn for_project(root: impl AsRef<Path>, context: C, config: HandlerConfig) -> Result<Self> {
        let root = ProjectRoot::new(root)?;
        Ok(Self::with_config(root, context, config))
    }

    /// Apply an evaluation diff and its metadata to the target context.
    ///
    /// A diff without changes is ignored. Otherwise the diff is normalized,
    /// remembered for conflict resolution against later builds, and applied.
    ///
    /// # Errors
    ///
    /// - A contract violation if `version` is earlier than the previous
    ///   evaluation; nothing is applied.
    /// - The first target context failure; earlier items stay applied.
    pub fn apply_project_evaluation(
        &mut self,
        version: V,
        diff: ChangeDiff,
        previous_metadata: &ProjectMetadata,
        current_metadata: &ProjectMetadata,
        is_active_context: bool,
        logger: &dyn DiagnosticLogger,
    ) -> Result<ApplySummary> {
        if !diff.any_changes() {
            tracing::trace!(?version, "Evaluation reported no changes");
            return Ok(ApplySummary::default());
        }

        let diff = diff.normalize();
        self.evaluations.enqueue(version.clone(), diff.clone())?;

        let summary = self.synchronizer.apply_evaluation(
            &mut self.context,
            &diff,
            previous_metadata,
            current_metadata,
            is_active_context,
            logger,
        )?;
        tracing::debug!(?version, ?summary, "Applied project evaluation");
        Ok(summary)
    }

    /// Apply a design-time build diff to the target context.
    ///
    /// Build changes contradicted by evaluations later than `version` are
    /// dropped before anything is applied.
    ///
    /// # Errors
    ///
    /// - A contract violation if the diff reports changed items; nothing is
    ///   applied.
    /// - The first target context failure; earlier items stay applied.
    pub fn apply_project_build(
        &mut self,
        version: V,
        diff: ChangeDiff,
        is_active_context: bool,
        logger: &dyn DiagnosticLogger,
    ) -> Result<ApplySummary> {
        if !diff.any_changes() {
            tracing::trace!(?version, "Build reported no changes");
            return Ok(ApplySummary::default());
        }

        let synchronizer = &self.synchronizer;
        let diff = resolve_build_conflicts(
            &mut self.evaluations,
            &version,
            diff.normalize(),
            |item| synchronizer.identity(item),
        )?;
        if diff.is_empty() {
            tracing::debug!(?version, "Build changes fully superseded by later evaluations");
            return Ok(ApplySummary::default());
        }

        let summary =
            self.synchronizer
                .apply_build(&mut self.context, &diff, is_active_context, logger)?;
        tracing::debug!(?version, ?summary, "Applied project build");
        Ok(summary)
    }

    /// Whether `include_path` is believed present in the target context.
    pub fn is_tracked(&self, include_path: &str) -> bool {
        let full_path = self.synchronizer.root().make_rooted(include_path);
        self.synchronizer.paths().contains_path(&full_path)
    }

    /// Full paths believed present in the target context, sorted.
    pub fn tracked_paths(&self) -> Vec<&NormalizedPath> {
        self.synchronizer.paths().sorted()
    }

    /// Number of evaluations still held for conflict resolution.
    pub fn pending_evaluations(&self) -> usize {
        self.evaluations.len()
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn root(&self) -> &ProjectRoot {
        self.synchronizer.root()
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }
}
