//! # Primitive Types
//!
//! A primitive is a predicate over raw values plus the readable name used in
//! error messages. The engine does not care how many primitive kinds exist:
//! `number`, `string`, and `boolean` are provided, and callers can build
//! their own with [`Primitive::new`].

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::Value;
use typeshape_core::{kind_of, ConstructionError, FieldPath};

use crate::descriptor::{Descriptor, TypeDescriptor};
use crate::instance::Field;

/// Predicate deciding whether a raw value belongs to a primitive type.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A primitive type: a named predicate over raw values.
#[derive(Clone)]
pub struct Primitive {
    name: Cow<'static, str>,
    predicate: Predicate,
}

impl Primitive {
    /// Build a primitive from a name and a predicate.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// The readable type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Infer the primitive type of a literal default.
    ///
    /// Numbers, strings and booleans map to their primitive; `null`, arrays
    /// and objects have no inferable type.
    pub fn infer(literal: &Value) -> Option<Self> {
        match literal {
            Value::Number(_) => Some(number_primitive()),
            Value::String(_) => Some(string_primitive()),
            Value::Bool(_) => Some(boolean_primitive()),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Primitive").field("name", &self.name).finish()
    }
}

impl Descriptor for Primitive {
    fn matches(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    fn materialize(&self, value: Option<&Value>) -> Result<Field, ConstructionError> {
        match value {
            Some(v) if self.matches(v) => Ok(Field::Value(v.clone())),
            Some(v) => Err(ConstructionError::TypeMismatch {
                path: FieldPath::root(),
                expected: self.describe(),
                actual: kind_of(v),
            }),
            None => Err(ConstructionError::MissingField {
                path: FieldPath::root(),
                expected: self.describe(),
            }),
        }
    }

    fn describe(&self) -> String {
        self.name.to_string()
    }
}

fn number_primitive() -> Primitive {
    Primitive::new("number", Value::is_number)
}

fn string_primitive() -> Primitive {
    Primitive::new("string", Value::is_string)
}

fn boolean_primitive() -> Primitive {
    Primitive::new("boolean", Value::is_boolean)
}

/// The `number` type: any JSON number.
pub fn number() -> TypeDescriptor {
    TypeDescriptor::Primitive(number_primitive())
}

/// The `string` type.
pub fn string() -> TypeDescriptor {
    TypeDescriptor::Primitive(string_primitive())
}

/// The `boolean` type.
pub fn boolean() -> TypeDescriptor {
    TypeDescriptor::Primitive(boolean_primitive())
}
