//! Test doubles for the collaborators `ctx-core` drives.
//!
//! - [`RecordingContext`]: a target context that records every accepted call
//!   and can be primed to reject calls for chosen paths
//! - [`RecordingLogger`]: a diagnostic logger that keeps every line

pub mod context;
pub mod logger;

pub use context::{ContextCall, RecordingContext};
pub use logger::RecordingLogger;

use ctx_core::{ItemMetadata, ProjectMetadata};

/// Build a [`ProjectMetadata`] from `(include path, [(property, value)])` pairs.
pub fn metadata(items: &[(&str, &[(&str, &str)])]) -> ProjectMetadata {
    items
        .iter()
        .map(|(include, properties)| {
            let item: ItemMetadata = properties
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            (include.to_string(), item)
        })
        .collect()
}
