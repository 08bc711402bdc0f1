//! # Shape Literals
//!
//! A [`Shape`] is the user-authored declaration of a model: field names
//! mapped to a type descriptor, a sub-model, or a literal default, plus any
//! methods and computed accessors instances should expose.
//!
//! Compilation normalizes every shorthand into the four descriptor variants.
//! A literal default such as `"boo"` or `0` becomes
//! `with_default(<inferred primitive>, literal)`, so nothing past this
//! module ever special-cases literal shorthand.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;
use typeshape_core::{kind_of, DeclarationError, MemberError};

use crate::descriptor::{with_default, DefaultValue, Descriptor, TypeDescriptor};
use crate::factory::ModelType;
use crate::instance::Instance;
use crate::model::{Member, ModelDescriptor};
use crate::primitive::Primitive;

/// The right-hand side of a shape field.
#[derive(Debug, Clone)]
pub enum ShapeEntry {
    /// An explicit descriptor (primitive, model, optional, defaulted).
    Type(TypeDescriptor),
    /// A literal default; the type is inferred from the literal.
    Literal(Value),
}

impl ShapeEntry {
    fn into_descriptor(self, field: &str) -> Result<TypeDescriptor, DeclarationError> {
        match self {
            Self::Type(descriptor) => Ok(descriptor),
            Self::Literal(literal) => {
                let primitive = Primitive::infer(&literal).ok_or_else(|| {
                    DeclarationError::UninferableLiteral {
                        field: field.to_string(),
                        kind: kind_of(&literal),
                    }
                })?;
                Ok(with_default(primitive, literal))
            }
        }
    }
}

impl From<TypeDescriptor> for ShapeEntry {
    fn from(d: TypeDescriptor) -> Self {
        Self::Type(d)
    }
}

impl From<ModelType> for ShapeEntry {
    fn from(m: ModelType) -> Self {
        Self::Type(TypeDescriptor::Model(m))
    }
}

impl From<&ModelType> for ShapeEntry {
    fn from(m: &ModelType) -> Self {
        Self::Type(TypeDescriptor::Model(m.clone()))
    }
}

impl From<Value> for ShapeEntry {
    fn from(v: Value) -> Self {
        Self::Literal(v)
    }
}

macro_rules! literal_entry {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ShapeEntry {
                fn from(v: $t) -> Self {
                    Self::Literal(Value::from(v))
                }
            }
        )*
    };
}

literal_entry!(&str, String, bool, i32, i64, u32, u64, f64);

/// A model declaration, compiled by [`crate::factory::model`].
#[derive(Debug, Clone, Default)]
pub struct Shape {
    entries: Vec<(String, ShapeEntry)>,
    members: Vec<(String, Member)>,
}

impl Shape {
    /// An empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field.
    pub fn field(mut self, name: impl Into<String>, entry: impl Into<ShapeEntry>) -> Self {
        self.entries.push((name.into(), entry.into()));
        self
    }

    /// Attach a method. Methods are not validated; writes they make through
    /// [`Instance::set`] are.
    pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        self.members
            .push((name.into(), Member::Method(Arc::new(method))));
        self
    }

    /// Attach a read-only computed accessor.
    pub fn computed<G>(mut self, name: impl Into<String>, get: G) -> Self
    where
        G: Fn(&Instance) -> Value + Send + Sync + 'static,
    {
        self.members.push((
            name.into(),
            Member::Computed {
                get: Arc::new(get),
                set: None,
            },
        ));
        self
    }

    /// Attach a computed accessor with a setter.
    pub fn computed_with_setter<G, S>(mut self, name: impl Into<String>, get: G, set: S) -> Self
    where
        G: Fn(&Instance) -> Value + Send + Sync + 'static,
        S: Fn(&mut Instance, Value) -> Result<(), MemberError> + Send + Sync + 'static,
    {
        self.members.push((
            name.into(),
            Member::Computed {
                get: Arc::new(get),
                set: Some(Arc::new(set)),
            },
        ));
        self
    }

    /// Names of the declared fields, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the shape declares no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn compile(self, name: Option<String>) -> Result<ModelType, DeclarationError> {
        let mut seen = BTreeSet::new();
        let names = self
            .entries
            .iter()
            .map(|(n, _)| n)
            .chain(self.members.iter().map(|(n, _)| n));
        for n in names {
            if !seen.insert(n.as_str()) {
                return Err(DeclarationError::DuplicateName { name: n.clone() });
            }
        }

        let mut fields = Vec::with_capacity(self.entries.len());
        for (field, entry) in self.entries {
            let descriptor = entry.into_descriptor(&field)?;
            check_literal_defaults(&field, &descriptor)?;
            fields.push((field, descriptor));
        }

        let compiled = ModelType::from_descriptor(ModelDescriptor::new(name, fields, self.members));
        tracing::debug!(
            model = %compiled.describe(),
            fields = compiled.descriptor().fields().len(),
            members = compiled.descriptor().members().len(),
            "compiled model"
        );
        Ok(compiled)
    }
}

/// Reject literal defaults that do not satisfy the type they default.
/// Factories are checked when they run.
fn check_literal_defaults(field: &str, descriptor: &TypeDescriptor) -> Result<(), DeclarationError> {
    match descriptor {
        TypeDescriptor::Defaulted(defaulted) => {
            if let DefaultValue::Literal(literal) = defaulted.default_value() {
                if !defaulted.inner().matches(literal) {
                    return Err(DeclarationError::InvalidDefault {
                        field: field.to_string(),
                        expected: defaulted.inner().describe(),
                        actual: kind_of(literal),
                    });
                }
            }
            check_literal_defaults(field, defaulted.inner())
        }
        TypeDescriptor::Optional(optional) => check_literal_defaults(field, optional.inner()),
        TypeDescriptor::Primitive(_) | TypeDescriptor::Model(_) => Ok(()),
    }
}
