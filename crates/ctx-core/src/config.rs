//! Handler configuration

use ctx_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::metadata::EXCLUDE_FROM_CURRENT_CONFIGURATION;

/// How tracked paths are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathComparison {
    CaseSensitive,
    /// Project systems treat `Src/A.cs` and `src/a.cs` as one file
    #[default]
    CaseInsensitive,
}

/// Settings for a [`CommandLineHandler`](crate::CommandLineHandler)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    pub path_comparison: PathComparison,
    /// Boolean metadata property that keeps an evaluated item out of the context
    pub exclusion_property: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            path_comparison: PathComparison::default(),
            exclusion_property: EXCLUDE_FROM_CURRENT_CONFIGURATION.to_string(),
        }
    }
}

impl HandlerConfig {
    /// Load a config file (`.toml`, `.json`, `.yaml`); missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_case_insensitive() {
        let config = HandlerConfig::default();
        assert_eq!(config.path_comparison, PathComparison::CaseInsensitive);
        assert_eq!(config.exclusion_property, "ExcludeFromCurrentConfiguration");
    }

    #[test]
    fn load_fills_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handler.toml");
        std::fs::write(&path, "path_comparison = \"case-sensitive\"\n").unwrap();

        let config = HandlerConfig::load(&NormalizedPath::new(&path)).unwrap();
        assert_eq!(config.path_comparison, PathComparison::CaseSensitive);
        assert_eq!(config.exclusion_property, EXCLUDE_FROM_CURRENT_CONFIGURATION);
    }
}
