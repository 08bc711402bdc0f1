//! # typeshape-model: Runtime Type Descriptors & Model Instantiation
//!
//! Declare a data shape from composable type descriptors, then:
//!
//! - **validate** arbitrary untyped data against it ([`ModelType::is`],
//!   [`ModelType::check`]);
//! - **instantiate** a live, mutable object from partial data with defaults
//!   filled in ([`ModelType::create`]);
//! - have the declared types **enforced on every write** to the live object
//!   ([`Instance::set`]).
//!
//! ## Modules
//!
//! - [`descriptor`]: the closed descriptor algebra (Primitive, Model,
//!   Optional, Defaulted) and the [`Descriptor`] capability trait.
//! - [`primitive`]: named predicates: `number`, `string`, `boolean`.
//! - [`model`]: compiled model descriptors and structural matching.
//! - [`shape`]: shape literals and their compilation.
//! - [`validate`]: diagnostic reports (missing / mismatched / superfluous).
//! - [`instance`]: live instances and validated field writes.
//! - [`factory`]: the [`ModelType`] factory (`is`, `check`, `create`).
//! - [`declaration`]: models declared as JSON/YAML documents.
//!
//! ## Usage
//!
//! ```
//! use serde_json::json;
//! use typeshape_model::types;
//!
//! let item = types::model(
//!     types::Shape::new()
//!         .field("id", types::number())
//!         .field("name", types::with_default(types::string(), "boo")),
//! )
//! .unwrap();
//!
//! assert!(!item.is(&json!({})));
//! assert!(item.is(&json!({"id": 3, "extra": ""})));
//!
//! let mut a = item.create(&json!({"id": 3})).unwrap();
//! assert_eq!(a.value("name"), Some(json!("boo")));
//! assert!(a.set("name", 3).is_err());
//! assert_eq!(a.value("name"), Some(json!("boo")));
//! ```
//!
//! ## Concurrency
//!
//! All operations are synchronous and perform no I/O. Compiled models are
//! immutable and `Send + Sync`; share them freely. A live instance is an
//! ordinary owned value, so `&mut` access serializes writes to it.

pub mod declaration;
pub mod descriptor;
pub mod factory;
pub mod instance;
mod instantiate;
pub mod model;
pub mod primitive;
pub mod shape;
pub mod validate;

pub use declaration::{compile_document, ModelRegistry};
pub use descriptor::{
    maybe, with_default, with_default_fn, DefaultValue, DefaultedType, Descriptor,
    DescriptorKind, OptionalType, TypeDescriptor,
};
pub use factory::{model, model_named, ModelType};
pub use instance::{Field, Instance};
pub use model::{Member, ModelDescriptor};
pub use primitive::{boolean, number, string, Primitive};
pub use shape::{Shape, ShapeEntry};
pub use validate::{ShapeReport, Violation, ViolationKind};

pub use typeshape_core::{
    AssignmentError, ConstructionError, DeclarationError, FieldPath, MemberError,
    TypeshapeError,
};

/// The declaration vocabulary under one namespace: `types::model`,
/// `types::number`, `types::maybe`, ...
pub mod types {
    pub use crate::descriptor::{maybe, with_default, with_default_fn};
    pub use crate::factory::{model, model_named};
    pub use crate::primitive::{boolean, number, string};
    pub use crate::shape::Shape;
}
