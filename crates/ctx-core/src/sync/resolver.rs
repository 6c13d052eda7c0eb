//! Conflict resolution between a build diff and later evaluations
//!
//! A build is computed against a snapshot that may be several evaluations
//! old. Anything an evaluation reported after that snapshot is newer and
//! wins:
//!
//! - a build addition of an item a later evaluation removed is dropped
//! - a build removal of an item a later evaluation added is dropped
//!
//! Items are matched by the identity the caller supplies, normally the same
//! key the path set tracks them under, so `Src\A.cs` in a build and `src/a.cs`
//! in an evaluation are the same item when paths compare case-insensitively.
//!
//! Build changes that no later evaluation contradicts pass through. Changed
//! items are never resolved because builds only ever report argument-shaped
//! items, which carry no metadata.

use std::collections::{BTreeSet, HashSet};

use crate::Result;
use crate::diff::NormalizedDiff;
use crate::error::ContractViolation;
use crate::version::Version;

use super::queue::EvaluationQueue;

/// Compute the part of `build_diff` that is still valid to apply.
///
/// Evaluations at or before `build_version` are discarded from `queue`
/// first; the rest are folded into the build diff in queue order. Two items
/// conflict when `identity` maps them to the same key.
///
/// # Errors
///
/// - [`ContractViolation::ChangedItemsInBuild`] if the build reports changed
///   items. The queue is not touched.
/// - [`ContractViolation::StaleEvaluation`] if a remaining evaluation is not
///   strictly later than the build.
pub fn resolve_build_conflicts<V, F>(
    queue: &mut EvaluationQueue<V>,
    build_version: &V,
    build_diff: NormalizedDiff,
    identity: F,
) -> Result<NormalizedDiff>
where
    V: Version,
    F: Fn(&str) -> String,
{
    if !build_diff.changed().is_empty() {
        return Err(ContractViolation::ChangedItemsInBuild {
            count: build_diff.changed().len(),
        }
        .into());
    }

    let discarded = queue.discard_stale_up_to(build_version);
    if discarded > 0 {
        tracing::debug!(discarded, ?build_version, "Discarded evaluations superseded by build");
    }

    let (mut added, mut removed, _) = build_diff.into_parts();

    for evaluation in queue.iter() {
        let evaluation_version = evaluation.version();
        if !evaluation_version.is_later_than(build_version) {
            return Err(ContractViolation::StaleEvaluation {
                evaluation: format!("{evaluation_version:?}"),
                build: format!("{build_version:?}"),
            }
            .into());
        }

        let later_removed: HashSet<String> =
            evaluation.diff().removed().iter().map(|item| identity(item.as_str())).collect();
        added.retain(|item| {
            let superseded = later_removed.contains(&identity(item.as_str()));
            if superseded {
                tracing::debug!(
                    item = %item,
                    ?evaluation_version,
                    ?build_version,
                    "Dropped build addition removed by a later evaluation"
                );
            }
            !superseded
        });

        let later_added: HashSet<String> =
            evaluation.diff().added().iter().map(|item| identity(item.as_str())).collect();
        removed.retain(|item| {
            let superseded = later_added.contains(&identity(item.as_str()));
            if superseded {
                tracing::debug!(
                    item = %item,
                    ?evaluation_version,
                    ?build_version,
                    "Dropped build removal added by a later evaluation"
                );
            }
            !superseded
        });
    }

    Ok(NormalizedDiff::from_parts(added, removed, BTreeSet::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::diff::ChangeDiff;

    fn exact(item: &str) -> String {
        item.to_string()
    }

    fn queue_of(entries: Vec<(u64, ChangeDiff)>) -> EvaluationQueue<u64> {
        let mut queue = EvaluationQueue::new();
        for (version, diff) in entries {
            queue.enqueue(version, diff.normalize()).unwrap();
        }
        queue
    }

    #[test]
    fn empty_queue_passes_build_through() {
        let mut queue = EvaluationQueue::new();
        let build = ChangeDiff::new().with_added(["a.cs"]).with_removed(["b.cs"]).normalize();

        let resolved = resolve_build_conflicts(&mut queue, &1u64, build.clone(), exact).unwrap();
        assert_eq!(resolved, build);
    }

    #[test]
    fn later_removal_suppresses_build_addition() {
        let mut queue = queue_of(vec![
            (1, ChangeDiff::new().with_added(["a.cs", "b.cs"])),
            (2, ChangeDiff::new().with_removed(["b.cs"])),
        ]);
        let build = ChangeDiff::new().with_added(["b.cs"]).normalize();

        let resolved = resolve_build_conflicts(&mut queue, &1, build, exact).unwrap();
        assert!(resolved.is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn later_addition_suppresses_build_removal() {
        let mut queue = queue_of(vec![(5, ChangeDiff::new().with_added(["gen.cs"]))]);
        let build = ChangeDiff::new()
            .with_removed(["gen.cs", "old.cs"])
            .normalize();

        let resolved = resolve_build_conflicts(&mut queue, &4, build, exact).unwrap();
        assert!(resolved.added().is_empty());
        assert_eq!(resolved.removed().iter().collect::<Vec<_>>(), ["old.cs"]);
    }

    #[test]
    fn evaluations_at_build_version_do_not_conflict() {
        let mut queue = queue_of(vec![(3, ChangeDiff::new().with_removed(["a.cs"]))]);
        let build = ChangeDiff::new().with_added(["a.cs"]).normalize();

        let resolved = resolve_build_conflicts(&mut queue, &3, build.clone(), exact).unwrap();
        assert_eq!(resolved, build);
        assert!(queue.is_empty());
    }

    #[test]
    fn items_are_matched_by_identity() {
        let mut queue = queue_of(vec![
            (2, ChangeDiff::new().with_removed(["Src/B.cs"])),
            (3, ChangeDiff::new().with_added(["Gen/G.cs"])),
        ]);
        let build = ChangeDiff::new()
            .with_added(["src\\b.cs", "src/c.cs"])
            .with_removed(["gen/g.cs"])
            .normalize();

        let lowered = |item: &str| item.replace('\\', "/").to_lowercase();
        let resolved = resolve_build_conflicts(&mut queue, &1, build, lowered).unwrap();
        assert_eq!(resolved.added().iter().collect::<Vec<_>>(), ["src/c.cs"]);
        assert!(resolved.removed().is_empty());
    }

    #[test]
    fn changed_items_in_build_are_rejected_before_pruning() {
        let mut queue = queue_of(vec![(1, ChangeDiff::new().with_added(["a.cs"]))]);
        let build = ChangeDiff::new().with_changed(["a.cs"]).normalize();

        let err = resolve_build_conflicts(&mut queue, &2, build, exact).unwrap_err();
        assert!(matches!(
            err,
            Error::Contract(ContractViolation::ChangedItemsInBuild { count: 1 })
        ));
        assert_eq!(queue.len(), 1);
    }
}
