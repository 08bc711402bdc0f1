//! # Field Paths
//!
//! Dotted paths identifying a declared field inside a (possibly nested)
//! model, e.g. `sub.x`. Errors raised deep inside a nested instantiation are
//! re-rooted with [`FieldPath::under`] as they propagate outwards, so the
//! caller always sees the full path from the model it invoked.

use serde::{Serialize, Serializer};

/// A dotted path of field names. The empty path denotes the model itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// The path of the model itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A single-segment path.
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Extend this path with a child segment.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    /// Re-root this path under a parent field.
    pub fn under(mut self, parent: &str) -> Self {
        self.0.insert(0, parent.to_string());
        self
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The individual path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The innermost segment, if any.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.0.join("."))
        }
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            return Self::root();
        }
        Self(s.split('.').map(str::to_string).collect())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
