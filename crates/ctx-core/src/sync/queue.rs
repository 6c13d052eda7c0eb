//! Pending evaluation queue

use std::collections::VecDeque;

use crate::Result;
use crate::diff::NormalizedDiff;
use crate::error::ContractViolation;
use crate::version::Version;

/// An evaluation diff tagged with the version it was computed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedDiff<V> {
    version: V,
    diff: NormalizedDiff,
}

impl<V> VersionedDiff<V> {
    pub fn version(&self) -> &V {
        &self.version
    }

    pub fn diff(&self) -> &NormalizedDiff {
        &self.diff
    }
}

/// Evaluations in arrival order, which is also version order.
///
/// Entries are appended by evaluations and dropped from the front by builds;
/// they are never reordered.
#[derive(Debug, Clone)]
pub struct EvaluationQueue<V> {
    entries: VecDeque<VersionedDiff<V>>,
}

impl<V> Default for EvaluationQueue<V> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }
}

impl<V: Version> EvaluationQueue<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an evaluation.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::VersionRegressed`] if `version` is earlier than the
    /// most recently enqueued version. The queue is left unchanged.
    pub fn enqueue(&mut self, version: V, diff: NormalizedDiff) -> Result<()> {
        if let Some(latest) = self.entries.back()
            && version.is_earlier_than(&latest.version)
        {
            return Err(ContractViolation::VersionRegressed {
                version: format!("{version:?}"),
                latest: format!("{:?}", latest.version),
            }
            .into());
        }

        self.entries.push_back(VersionedDiff { version, diff });
        Ok(())
    }

    /// Drop every leading entry at or before `build_version`.
    ///
    /// A build computed at `build_version` already reflects those
    /// evaluations. Returns how many entries were dropped.
    pub fn discard_stale_up_to(&mut self, build_version: &V) -> usize {
        let mut discarded = 0;
        while let Some(front) = self.entries.front() {
            if !front.version.is_earlier_than_or_equal_to(build_version) {
                break;
            }
            self.entries.pop_front();
            discarded += 1;
        }
        discarded
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionedDiff<V>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
