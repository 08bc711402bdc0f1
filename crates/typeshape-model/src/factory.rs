//! # Model Factory
//!
//! [`model`] compiles a [`Shape`] into a [`ModelType`], the user-facing
//! factory that bundles the validator (`is`, `check`) and the instantiator
//! (`create`) around one shared, immutable model descriptor.
//!
//! ```
//! use serde_json::json;
//! use typeshape_model::types;
//!
//! let item = types::model(
//!     types::Shape::new()
//!         .field("id", types::number())
//!         .field("name", "boo"),
//! )
//! .unwrap();
//!
//! assert!(item.is(&json!({"id": 3})));
//! let instance = item.create(&json!({"id": 3})).unwrap();
//! assert_eq!(instance.value("name"), Some(json!("boo")));
//! ```

use std::sync::Arc;

use serde_json::Value;
use typeshape_core::{ConstructionError, DeclarationError};

use crate::descriptor::Descriptor;
use crate::instance::{Field, Instance};
use crate::instantiate::instantiate;
use crate::model::ModelDescriptor;
use crate::shape::Shape;
use crate::validate::{check_model, ShapeReport};

/// A compiled model: a cheap-to-clone handle to a shared model descriptor.
#[derive(Debug, Clone)]
pub struct ModelType {
    descriptor: Arc<ModelDescriptor>,
}

impl ModelType {
    pub(crate) fn from_descriptor(descriptor: ModelDescriptor) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
        }
    }

    /// The compiled descriptor.
    pub fn descriptor(&self) -> &ModelDescriptor {
        &self.descriptor
    }

    /// The name given at declaration, if any.
    pub fn name(&self) -> Option<&str> {
        self.descriptor.name()
    }

    /// Whether two handles refer to the same compiled model.
    ///
    /// Validation never uses this; it is structural.
    pub fn same_model(&self, other: &ModelType) -> bool {
        Arc::ptr_eq(&self.descriptor, &other.descriptor)
    }

    /// Structural validity of an untyped value. Never fails; any value,
    /// including `null` and scalars, yields a verdict.
    pub fn is(&self, value: &Value) -> bool {
        self.descriptor.matches(value)
    }

    /// Structural validity of a live instance, judged by its snapshot.
    pub fn is_instance(&self, instance: &Instance) -> bool {
        self.is(&instance.snapshot())
    }

    /// Full diagnostic walk of a value: missing, mismatched and superfluous
    /// properties. `check(v).is_valid()` always agrees with `is(v)`.
    pub fn check(&self, value: &Value) -> ShapeReport {
        check_model(&self.descriptor, value)
    }

    /// Instantiate from a partial value.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] naming the offending field and the
    /// expected type when a required field is absent or a present field does
    /// not match.
    pub fn create(&self, input: &Value) -> Result<Instance, ConstructionError> {
        self.create_with(Some(input))
    }

    /// Instantiate with no input: every field must be optional or defaulted.
    pub fn create_empty(&self) -> Result<Instance, ConstructionError> {
        self.create_with(None)
    }

    /// Instantiate from an optional input; `None` behaves like
    /// [`ModelType::create_empty`].
    pub fn create_with(&self, input: Option<&Value>) -> Result<Instance, ConstructionError> {
        instantiate(self, input).map_err(|err| {
            tracing::debug!(model = %self.describe(), error = %err, "construction failed");
            err
        })
    }

    /// Instantiate this model from the snapshot of another instance,
    /// possibly of a structurally compatible model.
    pub fn create_from(&self, instance: &Instance) -> Result<Instance, ConstructionError> {
        self.create_with(Some(&instance.snapshot()))
    }
}

impl Descriptor for ModelType {
    fn matches(&self, value: &Value) -> bool {
        self.is(value)
    }

    fn materialize(&self, value: Option<&Value>) -> Result<Field, ConstructionError> {
        match value {
            Some(v) => instantiate(self, Some(v)).map(Field::Node),
            None => Err(ConstructionError::MissingField {
                path: typeshape_core::FieldPath::root(),
                expected: self.describe(),
            }),
        }
    }

    fn describe(&self) -> String {
        self.descriptor.describe()
    }
}

/// Compile a shape into a model factory.
///
/// # Errors
///
/// Returns a [`DeclarationError`] when a literal default has no inferable
/// type, a default does not match its type, or a name is declared twice.
pub fn model(shape: Shape) -> Result<ModelType, DeclarationError> {
    shape.compile(None)
}

/// Compile a named shape; the name is used in diagnostics instead of the
/// structural rendering.
pub fn model_named(name: impl Into<String>, shape: Shape) -> Result<ModelType, DeclarationError> {
    shape.compile(Some(name.into()))
}
