//! # Untyped Value Helpers
//!
//! The engine operates on `serde_json::Value`. These helpers classify values
//! for diagnostics ("expected number, got string") and centralize the
//! absence-value rule for optional fields: `null` and "not provided" both
//! count as absent. Defaulted fields only treat a missing key as absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON kind of an untyped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// `null`.
    Null,
    /// `true` / `false`.
    Boolean,
    /// Any JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl ValueKind {
    /// Lowercase name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a value.
pub fn kind_of(value: &Value) -> ValueKind {
    match value {
        Value::Null => ValueKind::Null,
        Value::Bool(_) => ValueKind::Boolean,
        Value::Number(_) => ValueKind::Number,
        Value::String(_) => ValueKind::String,
        Value::Array(_) => ValueKind::Array,
        Value::Object(_) => ValueKind::Object,
    }
}

/// Whether an optional field lookup yields the absence-value.
pub fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Short rendering of a value for diagnostics.
///
/// Scalars are rendered as JSON; containers are summarized by kind and size
/// so that large documents do not flood error output.
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("array of {} item(s)", items.len()),
        Value::Object(map) => format!("object with {} key(s)", map.len()),
        Value::String(s) if s.chars().count() > 32 => {
            let head: String = s.chars().take(32).collect();
            format!("{head:?}...")
        }
        scalar => scalar.to_string(),
    }
}
