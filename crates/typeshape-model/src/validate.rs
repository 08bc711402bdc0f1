//! # Shape Validation Reports
//!
//! `ModelType::is` answers with a short-circuiting boolean. This module is
//! the diagnostic counterpart: it walks the whole value and records every
//! missing or mismatched declared property, along with the superfluous
//! properties the model ignores.
//!
//! ## Invariant
//!
//! A report is valid exactly when `is` returns `true` for the same value.
//! Superfluous properties are informational and never make a report invalid.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use typeshape_core::{kind_of, ConstructionError, FieldPath, ValueKind};

use crate::descriptor::{Descriptor, TypeDescriptor};
use crate::model::ModelDescriptor;

/// What was wrong at a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required property is absent.
    Missing {
        /// Readable name of the expected type.
        expected: String,
    },
    /// A property has the wrong type.
    Mismatch {
        /// Readable name of the expected type.
        expected: String,
        /// Kind of the supplied value.
        actual: ValueKind,
    },
    /// A model was expected but the value is not an object.
    NotAnObject {
        /// Readable name of the expected model.
        expected: String,
        /// Kind of the supplied value.
        actual: ValueKind,
    },
}

/// A single violation with its location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Dotted path to the offending property.
    pub path: FieldPath,
    /// What was wrong.
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    /// The construction error `create` raises for the same problem.
    pub fn to_construction_error(&self) -> ConstructionError {
        let path = self.path.clone();
        match &self.kind {
            ViolationKind::Missing { expected } => ConstructionError::MissingField {
                path,
                expected: expected.clone(),
            },
            ViolationKind::Mismatch { expected, actual } => ConstructionError::TypeMismatch {
                path,
                expected: expected.clone(),
                actual: *actual,
            },
            ViolationKind::NotAnObject { expected, actual } => ConstructionError::NotAnObject {
                path,
                expected: expected.clone(),
                actual: *actual,
            },
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing { expected } => {
                write!(f, "  {}: missing required property of type '{expected}'", self.path)
            }
            ViolationKind::Mismatch { expected, actual } => {
                write!(f, "  {}: expected '{expected}', got {actual}", self.path)
            }
            ViolationKind::NotAnObject { expected, actual } => {
                write!(f, "  {}: expected an object matching '{expected}', got {actual}", self.path)
            }
        }
    }
}

/// Outcome of a full validation walk.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShapeReport {
    violations: Vec<Violation>,
    superfluous: Vec<FieldPath>,
}

impl ShapeReport {
    /// Whether the value satisfies the shape.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// All violations, in declaration order of the fields walked.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Paths of required properties that were absent.
    pub fn missing(&self) -> impl Iterator<Item = &FieldPath> {
        self.violations
            .iter()
            .filter(|v| matches!(v.kind, ViolationKind::Missing { .. }))
            .map(|v| &v.path)
    }

    /// Paths of properties present in the value but not declared.
    pub fn superfluous(&self) -> &[FieldPath] {
        &self.superfluous
    }

    /// The first violation, as the error `create` would raise.
    pub fn first_error(&self) -> Option<ConstructionError> {
        self.violations.first().map(Violation::to_construction_error)
    }
}

impl fmt::Display for ShapeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Walk a value against a model and collect every problem.
pub fn check_model(model: &ModelDescriptor, value: &Value) -> ShapeReport {
    let mut report = ShapeReport::default();
    walk_model(model, &model.describe(), value, &FieldPath::root(), &mut report);
    report
}

/// Walk a value against any descriptor.
pub fn check(descriptor: &TypeDescriptor, value: &Value) -> ShapeReport {
    let mut report = ShapeReport::default();
    walk(descriptor, value, &FieldPath::root(), &mut report);
    report
}

fn walk(descriptor: &TypeDescriptor, value: &Value, path: &FieldPath, report: &mut ShapeReport) {
    match descriptor {
        TypeDescriptor::Primitive(primitive) => {
            if !primitive.matches(value) {
                report.violations.push(Violation {
                    path: path.clone(),
                    kind: ViolationKind::Mismatch {
                        expected: primitive.describe(),
                        actual: kind_of(value),
                    },
                });
            }
        }
        TypeDescriptor::Model(model) => {
            walk_model(model.descriptor(), &model.describe(), value, path, report);
        }
        TypeDescriptor::Optional(optional) => {
            if !value.is_null() {
                walk(optional.inner(), value, path, report);
            }
        }
        TypeDescriptor::Defaulted(defaulted) => walk(defaulted.inner(), value, path, report),
    }
}

fn walk_model(
    model: &ModelDescriptor,
    described: &str,
    value: &Value,
    path: &FieldPath,
    report: &mut ShapeReport,
) {
    let Value::Object(map) = value else {
        report.violations.push(Violation {
            path: path.clone(),
            kind: ViolationKind::NotAnObject {
                expected: described.to_string(),
                actual: kind_of(value),
            },
        });
        return;
    };

    for (name, descriptor) in model.fields() {
        let field_path = path.child(name.as_str());
        match map.get(name) {
            Some(v) => walk(descriptor, v, &field_path, report),
            None if descriptor.accepts_absence() => {}
            None => report.violations.push(Violation {
                path: field_path,
                kind: ViolationKind::Missing {
                    expected: descriptor.describe(),
                },
            }),
        }
    }

    for key in map.keys() {
        if model.field(key).is_none() {
            report.superfluous.push(path.child(key.as_str()));
        }
    }
}
