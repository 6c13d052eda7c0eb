//! Filesystem-facing helpers for context-sync
//!
//! Provides forward-slash path normalization, the project-rooting service
//! that turns include paths into full paths, and format-agnostic config
//! loading.

pub mod config;
pub mod error;
pub mod path;
pub mod root;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use root::ProjectRoot;
