//! The set of full paths believed to be present in the target context

use std::collections::HashMap;

use ctx_fs::NormalizedPath;

use crate::Result;
use crate::config::PathComparison;
use crate::error::ContractViolation;

/// Local mirror of what the target context contains.
///
/// Every add or remove the target context accepted is reflected here, and
/// nothing else. This is what makes re-reported changes free.
#[derive(Debug, Clone, Default)]
pub struct PathSet {
    comparison: PathComparison,
    /// Comparison key to the path as first added
    paths: HashMap<String, NormalizedPath>,
}

impl PathSet {
    pub fn new(comparison: PathComparison) -> Self {
        Self {
            comparison,
            paths: HashMap::new(),
        }
    }

    /// The key `path` is tracked under; paths with equal keys are one entry.
    pub fn key(&self, path: &NormalizedPath) -> String {
        match self.comparison {
            PathComparison::CaseSensitive => path.as_str().to_string(),
            PathComparison::CaseInsensitive => path.as_str().to_lowercase(),
        }
    }

    pub fn contains_path(&self, path: &NormalizedPath) -> bool {
        self.paths.contains_key(&self.key(path))
    }

    /// Record that the target context accepted `path`.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::PathAlreadyPresent`] if `path` is already tracked.
    pub fn mark_added(&mut self, path: NormalizedPath) -> Result<()> {
        let key = self.key(&path);
        if self.paths.contains_key(&key) {
            return Err(ContractViolation::PathAlreadyPresent { path }.into());
        }
        self.paths.insert(key, path);
        Ok(())
    }

    /// Record that the target context dropped `path`.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::PathNotPresent`] if `path` is not tracked.
    pub fn mark_removed(&mut self, path: &NormalizedPath) -> Result<()> {
        match self.paths.remove(&self.key(path)) {
            Some(_) => Ok(()),
            None => Err(ContractViolation::PathNotPresent { path: path.clone() }.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Tracked paths in sorted order.
    pub fn sorted(&self) -> Vec<&NormalizedPath> {
        let mut paths: Vec<_> = self.paths.values().collect();
        paths.sort();
        paths
    }
}
