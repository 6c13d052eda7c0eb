//! Pushes resolved diffs into the target context
//!
//! Each diff is applied removals first, then additions, then (evaluations
//! only) changes. For every item the target context is called first and the
//! path set is updated only once that call succeeded, so a failure leaves
//! the path set matching what the context last accepted.

use ctx_fs::{NormalizedPath, ProjectRoot};
use serde::Serialize;

use crate::Result;
use crate::config::HandlerConfig;
use crate::context::{DiagnosticLogger, WorkspaceContext};
use crate::diff::NormalizedDiff;
use crate::error::{ContextOperation, Error};
use crate::metadata::{ProjectMetadata, is_item_in_current_configuration, item_metadata};
use crate::paths::PathSet;

static NO_METADATA: ProjectMetadata = ProjectMetadata::new();

/// Counts of target context calls made for one diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub added: usize,
    pub removed: usize,
    pub updated: usize,
    /// Evaluated additions skipped because the item is excluded from the
    /// current configuration
    pub excluded: usize,
}

impl ApplySummary {
    /// Whether the target context was called at all.
    pub fn touched_context(&self) -> bool {
        self.added + self.removed + self.updated > 0
    }
}

/// Applies diffs to a target context, keeping the path set in step with it
#[derive(Debug, Clone)]
pub struct ContextSynchronizer {
    root: ProjectRoot,
    paths: PathSet,
    exclusion_property: String,
}

impl ContextSynchronizer {
    pub fn new(root: ProjectRoot, config: &HandlerConfig) -> Self {
        Self {
            root,
            paths: PathSet::new(config.path_comparison),
            exclusion_property: config.exclusion_property.clone(),
        }
    }

    pub fn root(&self) -> &ProjectRoot {
        &self.root
    }

    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// The path set key for `include_path` once rooted under the project.
    ///
    /// Include paths with the same identity name one item in the context.
    pub fn identity(&self, include_path: &str) -> String {
        self.paths.key(&self.root.make_rooted(include_path))
    }

    /// Apply an evaluation diff.
    ///
    /// Additions whose current metadata excludes them from the active
    /// configuration are skipped entirely.
    ///
    /// # Errors
    ///
    /// Stops at the first target context failure and returns it; items
    /// applied before it stay applied.
    pub fn apply_evaluation<C: WorkspaceContext + ?Sized>(
        &mut self,
        context: &mut C,
        diff: &NormalizedDiff,
        previous_metadata: &ProjectMetadata,
        current_metadata: &ProjectMetadata,
        is_active_context: bool,
        logger: &dyn DiagnosticLogger,
    ) -> Result<ApplySummary> {
        let mut summary = ApplySummary::default();

        for include_path in diff.removed() {
            if self.remove_if_present(context, include_path, logger)? {
                summary.removed += 1;
            }
        }

        for include_path in diff.added() {
            if !is_item_in_current_configuration(
                include_path,
                current_metadata,
                &self.exclusion_property,
            ) {
                tracing::debug!(
                    item = %include_path,
                    "Skipping item excluded from current configuration"
                );
                summary.excluded += 1;
                continue;
            }

            if self.add_if_not_present(
                context,
                include_path,
                current_metadata,
                is_active_context,
                logger,
            )? {
                summary.added += 1;
            }
        }

        // TODO: re-check the exclusion property on changed items so a newly
        // excluded item is removed from the context.
        for include_path in diff.changed() {
            if self.update_if_present(
                context,
                include_path,
                previous_metadata,
                current_metadata,
                is_active_context,
                logger,
            )? {
                summary.updated += 1;
            }
        }

        Ok(summary)
    }

    /// Apply an already conflict-resolved build diff.
    ///
    /// Build items carry no metadata, so additions are sent with empty
    /// metadata and changed items are ignored.
    ///
    /// # Errors
    ///
    /// Stops at the first target context failure and returns it.
    pub fn apply_build<C: WorkspaceContext + ?Sized>(
        &mut self,
        context: &mut C,
        diff: &NormalizedDiff,
        is_active_context: bool,
        logger: &dyn DiagnosticLogger,
    ) -> Result<ApplySummary> {
        let mut summary = ApplySummary::default();

        for include_path in diff.removed() {
            if self.remove_if_present(context, include_path, logger)? {
                summary.removed += 1;
            }
        }

        for include_path in diff.added() {
            if self.add_if_not_present(
                context,
                include_path,
                &NO_METADATA,
                is_active_context,
                logger,
            )? {
                summary.added += 1;
            }
        }

        Ok(summary)
    }

    fn remove_if_present<C: WorkspaceContext + ?Sized>(
        &mut self,
        context: &mut C,
        include_path: &str,
        logger: &dyn DiagnosticLogger,
    ) -> Result<bool> {
        let full_path = self.root.make_rooted(include_path);
        if !self.paths.contains_path(&full_path) {
            tracing::trace!(path = %full_path, "Not tracked, skipping removal");
            return Ok(false);
        }

        context
            .remove_item(&full_path, logger)
            .map_err(|source| rejected(ContextOperation::Remove, &full_path, source))?;
        self.paths.mark_removed(&full_path)?;

        tracing::debug!(path = %full_path, "Removed from context");
        Ok(true)
    }

    fn add_if_not_present<C: WorkspaceContext + ?Sized>(
        &mut self,
        context: &mut C,
        include_path: &str,
        metadata: &ProjectMetadata,
        is_active_context: bool,
        logger: &dyn DiagnosticLogger,
    ) -> Result<bool> {
        let full_path = self.root.make_rooted(include_path);
        if self.paths.contains_path(&full_path) {
            tracing::trace!(path = %full_path, "Already tracked, skipping addition");
            return Ok(false);
        }

        context
            .add_item(
                &full_path,
                item_metadata(metadata, include_path),
                is_active_context,
                logger,
            )
            .map_err(|source| rejected(ContextOperation::Add, &full_path, source))?;

        tracing::debug!(path = %full_path, "Added to context");
        self.paths.mark_added(full_path)?;
        Ok(true)
    }

    fn update_if_present<C: WorkspaceContext + ?Sized>(
        &mut self,
        context: &mut C,
        include_path: &str,
        previous_metadata: &ProjectMetadata,
        current_metadata: &ProjectMetadata,
        is_active_context: bool,
        logger: &dyn DiagnosticLogger,
    ) -> Result<bool> {
        let full_path = self.root.make_rooted(include_path);
        if !self.paths.contains_path(&full_path) {
            tracing::trace!(path = %full_path, "Not tracked, skipping update");
            return Ok(false);
        }

        context
            .update_item(
                &full_path,
                item_metadata(previous_metadata, include_path),
                item_metadata(current_metadata, include_path),
                is_active_context,
                logger,
            )
            .map_err(|source| rejected(ContextOperation::Update, &full_path, source))?;

        tracing::debug!(path = %full_path, "Updated in context");
        Ok(true)
    }
}

fn rejected(
    operation: ContextOperation,
    path: &NormalizedPath,
    source: crate::error::ContextError,
) -> Error {
    Error::ContextRejected {
        operation,
        path: path.clone(),
        source,
    }
}
