//! # typeshape-core: Foundational Types for typeshape
//!
//! This crate is the leaf of the typeshape workspace. It defines the error
//! taxonomy raised by the model engine, the dotted field paths those errors
//! carry, and the small set of helpers used to describe untyped JSON values
//! in diagnostics.
//!
//! ## Key Design Principles
//!
//! 1. **Structured errors.** Every failure names the offending field path and
//!    the readable name of the expected type. Callers never parse messages.
//!
//! 2. **One absence-value.** Untyped data is `serde_json::Value`. `null` is the
//!    absence-value accepted by optional types; a field that was never
//!    provided is represented by `None` at API boundaries.
//!
//! 3. **Paths, not strings.** Nested failures are reported through
//!    [`FieldPath`], which builds `outer.inner` paths as errors bubble up.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `typeshape-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod path;
pub mod value;

pub use error::{
    AssignmentError, ConstructionError, DeclarationError, MemberError, TypeshapeError,
};
pub use path::FieldPath;
pub use value::{describe_value, is_absent, kind_of, ValueKind};
