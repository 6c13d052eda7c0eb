//! Project rooting: turning include paths into full paths

use std::path::Path;

use crate::{Error, NormalizedPath, Result};

/// The directory a project's include paths are relative to.
///
/// `make_rooted` is a pure function of the root, so the same include path
/// always maps to the same full path for the lifetime of the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    root: NormalizedPath,
}

impl ProjectRoot {
    /// Create a project root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProjectRoot`] if `root` is not rooted.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = NormalizedPath::new(root);
        if !root.is_rooted() {
            return Err(Error::InvalidProjectRoot {
                root: root.to_string(),
            });
        }
        Ok(Self { root })
    }

    /// The normalized root directory.
    pub fn path(&self) -> &NormalizedPath {
        &self.root
    }

    /// Resolve an include path against the project root.
    ///
    /// Already-rooted include paths are only normalized.
    pub fn make_rooted(&self, include_path: &str) -> NormalizedPath {
        let include = NormalizedPath::new(include_path);
        if include.is_rooted() {
            include
        } else {
            self.root.join(include.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_root_is_rejected() {
        let err = ProjectRoot::new("src/project").unwrap_err();
        assert!(matches!(err, Error::InvalidProjectRoot { .. }));
    }

    #[test]
    fn include_paths_are_joined_to_root() {
        let root = ProjectRoot::new("/repo/app").unwrap();
        assert_eq!(root.make_rooted("src\\Program.cs").as_str(), "/repo/app/src/Program.cs");
    }
}
