//! Named groups of build outputs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metadata::ItemMetadata;
use crate::{Error, Result};

/// A set of outputs generated by a project that fit under a common category,
/// such as built binaries or debug symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputGroup {
    name: String,
    target_name: String,
    display_name: String,
    description: Option<String>,
    outputs: Vec<(String, ItemMetadata)>,
    is_successful: bool,
}

impl OutputGroup {
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `name`, `target_name` or `display_name`
    /// is empty.
    pub fn new(
        name: impl Into<String>,
        target_name: impl Into<String>,
        display_name: impl Into<String>,
        description: Option<String>,
        outputs: Vec<(String, ItemMetadata)>,
        is_successful: bool,
    ) -> Result<Self> {
        let name = require_non_empty("name", name.into())?;
        let target_name = require_non_empty("target_name", target_name.into())?;
        let display_name = require_non_empty("display_name", display_name.into())?;

        Ok(Self {
            name,
            target_name,
            display_name,
            description,
            outputs,
            is_successful,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The build target that produces this group.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Output paths and their metadata, in the order the target produced them.
    pub fn outputs(&self) -> &[(String, ItemMetadata)] {
        &self.outputs
    }

    pub fn is_successful(&self) -> bool {
        self.is_successful
    }
}

impl fmt::Display for OutputGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Output Group {} ({})", self.name, self.target_name)
    }
}

fn require_non_empty(name: &'static str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(Error::InvalidArgument {
            name,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built() -> OutputGroup {
        let mut metadata = ItemMetadata::new();
        metadata.insert("TargetPath".to_string(), "bin/App.dll".to_string());
        OutputGroup::new(
            "Built",
            "BuiltProjectOutputGroup",
            "Primary output",
            None,
            vec![("obj/App.dll".to_string(), metadata)],
            true,
        )
        .unwrap()
    }

    #[test]
    fn display_names_group_and_target() {
        assert_eq!(built().to_string(), "Output Group Built (BuiltProjectOutputGroup)");
    }

    #[test]
    fn accessors_return_constructor_values() {
        let group = built();
        assert_eq!(group.name(), "Built");
        assert_eq!(group.display_name(), "Primary output");
        assert_eq!(group.description(), None);
        assert!(group.is_successful());
        assert_eq!(group.outputs()[0].0, "obj/App.dll");
        assert_eq!(group.outputs()[0].1["TargetPath"], "bin/App.dll");
    }

    #[test]
    fn empty_target_name_is_rejected() {
        let err = OutputGroup::new("Built", "", "Primary output", None, Vec::new(), true).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "target_name", .. }));
    }

    #[test]
    fn description_is_optional() {
        let group = OutputGroup::new(
            "Symbols",
            "DebugSymbolsProjectOutputGroup",
            "Debug symbols",
            Some("PDB files".to_string()),
            Vec::new(),
            false,
        )
        .unwrap();
        assert_eq!(group.description(), Some("PDB files"));
        assert!(!group.is_successful());
    }
}
