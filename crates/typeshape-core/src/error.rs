//! # Error Types: Structured Error Hierarchy
//!
//! Defines the errors raised by the model engine. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Taxonomy
//!
//! - A shape mismatch is never an error: `is` answers with a boolean and
//!   `check` with a report.
//! - [`ConstructionError`] is raised by `create` when a required field is
//!   absent or a present field has the wrong type. Construction is atomic, so
//!   no partially-built instance accompanies it.
//! - [`AssignmentError`] is raised by a field write on a live instance. The
//!   previous value is left in place.
//! - [`DeclarationError`] is raised while compiling a shape, before any value
//!   is seen.
//! - [`MemberError`] covers calls into non-declared members (methods and
//!   computed accessors), which are never type-checked.

use thiserror::Error;

use crate::path::FieldPath;
use crate::value::ValueKind;

/// Top-level error type for typeshape.
#[derive(Error, Debug)]
pub enum TypeshapeError {
    /// A shape could not be compiled.
    #[error("declaration error: {0}")]
    Declaration(#[from] DeclarationError),

    /// An instance could not be created.
    #[error("construction error: {0}")]
    Construction(#[from] ConstructionError),

    /// A field write was rejected.
    #[error("assignment error: {0}")]
    Assignment(#[from] AssignmentError),

    /// A non-declared member could not be used.
    #[error("member error: {0}")]
    Member(#[from] MemberError),
}

/// Error raised by `create` while instantiating a model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    /// A required field was absent and has no default.
    #[error("missing required field '{path}' of type '{expected}'")]
    MissingField {
        /// Path of the missing field.
        path: FieldPath,
        /// Readable name of the expected type.
        expected: String,
    },

    /// A present field did not match its declared type.
    #[error("value at '{path}' is not assignable to '{expected}' (got {actual})")]
    TypeMismatch {
        /// Path of the offending field.
        path: FieldPath,
        /// Readable name of the expected type.
        expected: String,
        /// Kind of the value that was supplied.
        actual: ValueKind,
    },

    /// The input for a model was not an object.
    #[error("value at '{path}' must be an object matching '{expected}' (got {actual})")]
    NotAnObject {
        /// Path of the offending value; root for the top-level input.
        path: FieldPath,
        /// Readable name of the expected model type.
        expected: String,
        /// Kind of the value that was supplied.
        actual: ValueKind,
    },

    /// A default factory produced a value that does not match its type.
    #[error("default for '{path}' is not assignable to '{expected}' (got {actual})")]
    InvalidDefault {
        /// Path of the defaulted field.
        path: FieldPath,
        /// Readable name of the expected type.
        expected: String,
        /// Kind of the value the factory produced.
        actual: ValueKind,
    },
}

impl ConstructionError {
    /// The path of the field that caused the failure.
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::MissingField { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::NotAnObject { path, .. }
            | Self::InvalidDefault { path, .. } => path,
        }
    }

    /// The readable name of the type that was expected.
    pub fn expected(&self) -> &str {
        match self {
            Self::MissingField { expected, .. }
            | Self::TypeMismatch { expected, .. }
            | Self::NotAnObject { expected, .. }
            | Self::InvalidDefault { expected, .. } => expected,
        }
    }

    /// Re-root the error under a parent field, as it propagates out of a
    /// nested model.
    pub fn under(self, parent: &str) -> Self {
        match self {
            Self::MissingField { path, expected } => Self::MissingField {
                path: path.under(parent),
                expected,
            },
            Self::TypeMismatch {
                path,
                expected,
                actual,
            } => Self::TypeMismatch {
                path: path.under(parent),
                expected,
                actual,
            },
            Self::NotAnObject {
                path,
                expected,
                actual,
            } => Self::NotAnObject {
                path: path.under(parent),
                expected,
                actual,
            },
            Self::InvalidDefault {
                path,
                expected,
                actual,
            } => Self::InvalidDefault {
                path: path.under(parent),
                expected,
                actual,
            },
        }
    }
}

/// Error raised by a field write on a live instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssignmentError {
    /// The new value does not satisfy the field's declared type.
    #[error("field '{path}': Value is not assignable to '{expected}' (got {actual})")]
    NotAssignable {
        /// Path of the field that was written.
        path: FieldPath,
        /// Readable name of the declared type.
        expected: String,
        /// Kind of the rejected value.
        actual: ValueKind,
    },

    /// The field is not declared on the model.
    #[error("field '{field}' is not declared on model '{model}'")]
    UnknownField {
        /// The field name that was written.
        field: String,
        /// Readable name of the model.
        model: String,
    },
}

/// Error raised while compiling a shape literal or declaration document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeclarationError {
    /// A literal default whose type cannot be inferred (null, array, object).
    #[error("cannot infer a type for the literal default of '{field}' ({kind})")]
    UninferableLiteral {
        /// Field that carries the literal.
        field: String,
        /// Kind of the literal.
        kind: ValueKind,
    },

    /// A default value that does not match the type it defaults.
    #[error("default for '{field}' is not assignable to '{expected}' (got {actual})")]
    InvalidDefault {
        /// Field that carries the default.
        field: String,
        /// Readable name of the defaulted type.
        expected: String,
        /// Kind of the default value.
        actual: ValueKind,
    },

    /// A field or member name declared twice.
    #[error("'{name}' is declared more than once")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// A type reference that names neither a primitive nor a declared model.
    #[error("field '{field}' of model '{model}' references unknown type '{name}'")]
    UnknownType {
        /// Model containing the reference.
        model: String,
        /// Field containing the reference.
        field: String,
        /// The unresolved type name.
        name: String,
    },

    /// Models that contain each other by value.
    #[error("models reference each other in a cycle: {cycle}")]
    Cycle {
        /// The cycle, rendered as `A -> B -> A`.
        cycle: String,
    },

    /// The declaration document itself is malformed.
    #[error("malformed declaration: {reason}")]
    Malformed {
        /// What was wrong with the document.
        reason: String,
    },
}

/// Error raised when using a non-declared member of an instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MemberError {
    /// No member with that name exists on the model.
    #[error("model '{model}' has no member '{name}'")]
    UnknownMember {
        /// Requested member name.
        name: String,
        /// Readable name of the model.
        model: String,
    },

    /// The member exists but is of a different kind (method vs accessor).
    #[error("member '{name}' is not a {expected}")]
    WrongKind {
        /// Member name.
        name: String,
        /// The kind the caller expected.
        expected: &'static str,
    },

    /// The computed accessor has no setter.
    #[error("computed member '{name}' is read-only")]
    ReadOnly {
        /// Member name.
        name: String,
    },

    /// The member function reported a failure.
    #[error("member '{name}' failed: {reason}")]
    Failed {
        /// Member name.
        name: String,
        /// Reason given by the member.
        reason: String,
    },
}

impl From<AssignmentError> for MemberError {
    fn from(err: AssignmentError) -> Self {
        let name = match &err {
            AssignmentError::NotAssignable { path, .. } => path.to_string(),
            AssignmentError::UnknownField { field, .. } => field.clone(),
        };
        Self::Failed {
            name,
            reason: err.to_string(),
        }
    }
}
