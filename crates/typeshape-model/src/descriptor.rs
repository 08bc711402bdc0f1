//! # Type Descriptors
//!
//! The closed descriptor algebra at the heart of the engine. Every declared
//! shape compiles to a tree of [`TypeDescriptor`]s built from four variants:
//!
//! ```text
//! Primitive   named predicate over raw values (number, string, ...)
//! Model       ordered field -> descriptor mapping, matched structurally
//! Optional    child descriptor, or null / absent
//! Defaulted   child descriptor, plus a default used when absent
//! ```
//!
//! Each variant implements [`Descriptor`]: a pure structural test
//! (`matches`), value materialization (`materialize`), and the
//! assignment-time check (`assignable`). Descriptors are immutable once
//! built and are `Send + Sync`, so a compiled shape can be shared by any
//! number of concurrent validations.

use std::sync::Arc;

use serde_json::Value;
use typeshape_core::{is_absent, kind_of, ConstructionError, FieldPath};

use crate::factory::ModelType;
use crate::instance::Field;
use crate::primitive::Primitive;

// ─── Capability Set ──────────────────────────────────────────────────

/// Capabilities shared by every descriptor variant.
pub trait Descriptor: Send + Sync {
    /// Pure structural test of a raw value.
    fn matches(&self, value: &Value) -> bool;

    /// Produce the value to store for a field, given the input value or
    /// `None` when the field was not provided.
    ///
    /// # Errors
    ///
    /// Fails when a present value does not match, or when a required value
    /// is absent. Errors carry paths relative to the value being
    /// materialized; callers re-root them with [`ConstructionError::under`].
    fn materialize(&self, value: Option<&Value>) -> Result<Field, ConstructionError>;

    /// Whether a value may be written into a live field of this type.
    ///
    /// Coincides with [`Descriptor::matches`] for every built-in variant.
    fn assignable(&self, value: &Value) -> bool {
        self.matches(value)
    }

    /// Readable type name used in diagnostics.
    fn describe(&self) -> String;

    /// Whether a model field of this type may be omitted.
    fn accepts_absence(&self) -> bool {
        false
    }
}

// ─── Descriptor Tree ─────────────────────────────────────────────────

/// The variant tag of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// A primitive predicate.
    Primitive,
    /// A model shape.
    Model,
    /// An optional wrapper.
    Optional,
    /// A defaulted wrapper.
    Defaulted,
}

/// A compiled type descriptor.
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    /// A primitive predicate.
    Primitive(Primitive),
    /// A nested model, matched structurally.
    Model(ModelType),
    /// A value of the child type, or the absence-value.
    Optional(OptionalType),
    /// A value of the child type, defaulted when absent.
    Defaulted(DefaultedType),
}

impl TypeDescriptor {
    /// The variant tag.
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Self::Primitive(_) => DescriptorKind::Primitive,
            Self::Model(_) => DescriptorKind::Model,
            Self::Optional(_) => DescriptorKind::Optional,
            Self::Defaulted(_) => DescriptorKind::Defaulted,
        }
    }

    /// The model this descriptor stores, looking through Optional and
    /// Defaulted wrappers.
    pub fn model_type(&self) -> Option<&ModelType> {
        match self {
            Self::Model(model) => Some(model),
            Self::Optional(opt) => opt.inner().model_type(),
            Self::Defaulted(def) => def.inner().model_type(),
            Self::Primitive(_) => None,
        }
    }

    fn as_dyn(&self) -> &dyn Descriptor {
        match self {
            Self::Primitive(p) => p,
            Self::Model(m) => m,
            Self::Optional(o) => o,
            Self::Defaulted(d) => d,
        }
    }
}

impl Descriptor for TypeDescriptor {
    fn matches(&self, value: &Value) -> bool {
        self.as_dyn().matches(value)
    }

    fn materialize(&self, value: Option<&Value>) -> Result<Field, ConstructionError> {
        self.as_dyn().materialize(value)
    }

    fn assignable(&self, value: &Value) -> bool {
        self.as_dyn().assignable(value)
    }

    fn describe(&self) -> String {
        self.as_dyn().describe()
    }

    fn accepts_absence(&self) -> bool {
        self.as_dyn().accepts_absence()
    }
}

impl From<Primitive> for TypeDescriptor {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

impl From<ModelType> for TypeDescriptor {
    fn from(m: ModelType) -> Self {
        Self::Model(m)
    }
}

impl From<&ModelType> for TypeDescriptor {
    fn from(m: &ModelType) -> Self {
        Self::Model(m.clone())
    }
}

// ─── Optional ────────────────────────────────────────────────────────

/// Accepts the child's values or the absence-value (`null` / not provided).
#[derive(Debug, Clone)]
pub struct OptionalType {
    inner: Box<TypeDescriptor>,
}

impl OptionalType {
    /// The wrapped descriptor.
    pub fn inner(&self) -> &TypeDescriptor {
        &self.inner
    }
}

impl Descriptor for OptionalType {
    fn matches(&self, value: &Value) -> bool {
        value.is_null() || self.inner.matches(value)
    }

    fn materialize(&self, value: Option<&Value>) -> Result<Field, ConstructionError> {
        if is_absent(value) {
            return Ok(Field::Value(Value::Null));
        }
        self.inner.materialize(value)
    }

    fn describe(&self) -> String {
        format!("{} | null", self.inner.describe())
    }

    fn accepts_absence(&self) -> bool {
        true
    }
}

/// Wrap a descriptor so that it also accepts the absence-value.
pub fn maybe(inner: impl Into<TypeDescriptor>) -> TypeDescriptor {
    TypeDescriptor::Optional(OptionalType {
        inner: Box::new(inner.into()),
    })
}

// ─── Defaulted ───────────────────────────────────────────────────────

/// Produces a fresh default value for one instantiation.
pub type DefaultFactory = Arc<dyn Fn() -> Value + Send + Sync>;

/// The default of a [`DefaultedType`].
#[derive(Clone)]
pub enum DefaultValue {
    /// A literal, deep-cloned for every instantiation.
    Literal(Value),
    /// A factory, evaluated once per instantiation that needs it.
    Factory(DefaultFactory),
}

impl DefaultValue {
    /// Produce the default for one instantiation.
    pub fn produce(&self) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Factory(factory) => factory(),
        }
    }
}

impl std::fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Accepts the child's values; substitutes a default when absent.
#[derive(Debug, Clone)]
pub struct DefaultedType {
    inner: Box<TypeDescriptor>,
    default: DefaultValue,
}

impl DefaultedType {
    /// The wrapped descriptor.
    pub fn inner(&self) -> &TypeDescriptor {
        &self.inner
    }

    /// The default used when the field is absent.
    pub fn default_value(&self) -> &DefaultValue {
        &self.default
    }
}

impl Descriptor for DefaultedType {
    fn matches(&self, value: &Value) -> bool {
        self.inner.matches(value)
    }

    fn materialize(&self, value: Option<&Value>) -> Result<Field, ConstructionError> {
        match value {
            Some(v) => self.inner.materialize(Some(v)),
            None => {
                let produced = self.default.produce();
                if !self.inner.matches(&produced) {
                    return Err(ConstructionError::InvalidDefault {
                        path: FieldPath::root(),
                        expected: self.inner.describe(),
                        actual: kind_of(&produced),
                    });
                }
                self.inner.materialize(Some(&produced))
            }
        }
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn accepts_absence(&self) -> bool {
        true
    }
}

/// Wrap a descriptor with a literal default.
///
/// The literal is checked against the descriptor when the enclosing model
/// is compiled.
pub fn with_default(inner: impl Into<TypeDescriptor>, default: impl Into<Value>) -> TypeDescriptor {
    TypeDescriptor::Defaulted(DefaultedType {
        inner: Box::new(inner.into()),
        default: DefaultValue::Literal(default.into()),
    })
}

/// Wrap a descriptor with a default factory, evaluated per instantiation.
pub fn with_default_fn<F>(inner: impl Into<TypeDescriptor>, factory: F) -> TypeDescriptor
where
    F: Fn() -> Value + Send + Sync + 'static,
{
    TypeDescriptor::Defaulted(DefaultedType {
        inner: Box::new(inner.into()),
        default: DefaultValue::Factory(Arc::new(factory)),
    })
}
