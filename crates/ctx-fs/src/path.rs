//! Normalized path handling for cross-platform compatibility

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Backslashes become forward slashes, repeated separators collapse, `.`
/// segments disappear and `..` segments are resolved lexically. A leading
/// `//` (UNC share) is preserved; `..` never climbs above a rooted prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    ///
    /// Joining an empty segment or `.` returns the path unchanged.
    pub fn join(&self, segment: &str) -> Self {
        let segment = clean(segment);
        if segment.is_empty() || segment == "." {
            return self.clone();
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Whether the path is anchored: `/x`, `//server/share` or `C:/x`.
    pub fn is_rooted(&self) -> bool {
        !split_prefix(&self.inner).0.is_empty()
    }

    /// Check if this appears to be a network path.
    pub fn is_network_path(&self) -> bool {
        self.inner.starts_with("//")
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let (prefix, rest) = split_prefix(&self.inner);
        if rest.is_empty() && !prefix.is_empty() {
            return None;
        }
        rest.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

/// Splits off the rooted prefix (`//`, `/` or `X:/`), returning it and the rest.
fn split_prefix(path: &str) -> (String, &str) {
    if path.starts_with("//") && !path.starts_with("///") {
        return ("//".to_string(), &path[2..]);
    }
    if path.starts_with('/') {
        return ("/".to_string(), path.trim_start_matches('/'));
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/' {
        return (format!("{}:/", bytes[0] as char), &path[3..]);
    }
    (String::new(), path)
}

fn clean(raw: &str) -> String {
    let unified = raw.replace('\\', "/");
    let (prefix, rest) = split_prefix(&unified);
    let rooted = !prefix.is_empty();

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                // `..` directly under a root stays at the root
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    if !rooted && segments.is_empty() {
        return if unified.is_empty() {
            String::new()
        } else {
            ".".to_string()
        };
    }
    let cleaned = format!("{}{}", prefix, segments.join("/"));
    // `a/../C:/x` only becomes drive-rooted once `a/..` is gone
    if !rooted && !split_prefix(&cleaned).0.is_empty() {
        return clean(&cleaned);
    }
    cleaned
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
