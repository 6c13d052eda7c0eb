//! Change diffs reported by evaluations and builds
//!
//! A [`ChangeDiff`] is what a producer reports. Before anything else looks
//! at it, it is folded into a [`NormalizedDiff`], which cannot carry renames.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Items added, removed, changed and renamed since the previous snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDiff {
    #[serde(default)]
    pub added: BTreeSet<String>,
    #[serde(default)]
    pub removed: BTreeSet<String>,
    #[serde(default)]
    pub changed: BTreeSet<String>,
    /// Old include path to new include path
    #[serde(default)]
    pub renamed: BTreeMap<String, String>,
}

impl ChangeDiff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_added<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.added.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn with_removed<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.removed.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn with_changed<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changed.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn with_renamed(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.renamed.insert(old.into(), new.into());
        self
    }

    /// False when every set is empty; such a diff is skipped outright.
    pub fn any_changes(&self) -> bool {
        !(self.added.is_empty()
            && self.removed.is_empty()
            && self.changed.is_empty()
            && self.renamed.is_empty())
    }

    /// Fold every rename `old -> new` into a removal of `old` and an addition
    /// of `new`, leaving the other sets untouched.
    pub fn normalize(self) -> NormalizedDiff {
        let Self {
            mut added,
            mut removed,
            changed,
            renamed,
        } = self;

        for (old, new) in renamed {
            removed.insert(old);
            added.insert(new);
        }

        NormalizedDiff {
            added,
            removed,
            changed,
        }
    }
}

/// A diff with renames folded away
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedDiff {
    added: BTreeSet<String>,
    removed: BTreeSet<String>,
    changed: BTreeSet<String>,
}

impl NormalizedDiff {
    pub(crate) fn from_parts(
        added: BTreeSet<String>,
        removed: BTreeSet<String>,
        changed: BTreeSet<String>,
    ) -> Self {
        Self {
            added,
            removed,
            changed,
        }
    }

    pub(crate) fn into_parts(self) -> (BTreeSet<String>, BTreeSet<String>, BTreeSet<String>) {
        (self.added, self.removed, self.changed)
    }

    pub fn added(&self) -> &BTreeSet<String> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn changed(&self) -> &BTreeSet<String> {
        &self.changed
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

impl From<ChangeDiff> for NormalizedDiff {
    fn from(diff: ChangeDiff) -> Self {
        diff.normalize()
    }
}
