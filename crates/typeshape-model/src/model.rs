//! # Model Descriptors
//!
//! A model is an ordered mapping from declared field name to descriptor,
//! plus the non-declared members (methods and computed accessors) that live
//! instances expose without validation.
//!
//! ## Structural Matching
//!
//! A value matches a model when it is an object and every declared field is
//! satisfied: required fields must be present and match, optional and
//! defaulted fields may be omitted but must match when present. Properties
//! the model does not declare are ignored. Matching iterates the fields of
//! the *target* model, so two independently declared models with the same
//! required fields accept each other's values; there are no nominal tags.

use std::sync::Arc;

use serde_json::Value;
use typeshape_core::MemberError;

use crate::descriptor::{Descriptor, TypeDescriptor};
use crate::instance::Instance;

// ─── Members ─────────────────────────────────────────────────────────

/// A method member: receives the instance and positional arguments.
pub type MethodFn = Arc<dyn Fn(&mut Instance, &[Value]) -> Result<Value, MemberError> + Send + Sync>;

/// Getter of a computed member.
pub type GetterFn = Arc<dyn Fn(&Instance) -> Value + Send + Sync>;

/// Setter of a computed member.
pub type SetterFn = Arc<dyn Fn(&mut Instance, Value) -> Result<(), MemberError> + Send + Sync>;

/// A non-declared member of a model. Members are dispatched by name and are
/// never type-checked; writes they perform through
/// [`Instance::set`] are.
#[derive(Clone)]
pub enum Member {
    /// A callable method.
    Method(MethodFn),
    /// A computed accessor with an optional setter.
    Computed {
        /// Reads the computed value.
        get: GetterFn,
        /// Writes the computed value, if writable.
        set: Option<SetterFn>,
    },
}

impl std::fmt::Debug for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Method(_) => f.write_str("Method(..)"),
            Self::Computed { set, .. } => f
                .debug_struct("Computed")
                .field("writable", &set.is_some())
                .finish(),
        }
    }
}

// ─── Model Descriptor ────────────────────────────────────────────────

/// The compiled form of a model shape.
#[derive(Debug)]
pub struct ModelDescriptor {
    name: Option<String>,
    fields: Vec<(String, TypeDescriptor)>,
    members: Vec<(String, Member)>,
}

impl ModelDescriptor {
    pub(crate) fn new(
        name: Option<String>,
        fields: Vec<(String, TypeDescriptor)>,
        members: Vec<(String, Member)>,
    ) -> Self {
        Self {
            name,
            fields,
            members,
        }
    }

    /// The name given at declaration, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[(String, TypeDescriptor)] {
        &self.fields
    }

    /// Look up a declared field.
    pub fn field(&self, name: &str) -> Option<&TypeDescriptor> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    /// Position of a declared field.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(n, _)| n == name)
    }

    /// Non-declared members in declaration order.
    pub fn members(&self) -> &[(String, Member)] {
        &self.members
    }

    /// Look up a non-declared member.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    /// Structural match of a raw value against this model.
    pub fn matches(&self, value: &Value) -> bool {
        let Value::Object(map) = value else {
            return false;
        };
        self.fields.iter().all(|(name, descriptor)| match map.get(name) {
            Some(v) => descriptor.matches(v),
            None => descriptor.accepts_absence(),
        })
    }

    /// Readable name: the declared name, or the structural rendering
    /// `{ id: number; name: string }`.
    pub fn describe(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.describe_structure()
    }

    /// Structural rendering, ignoring the declared name.
    pub fn describe_structure(&self) -> String {
        if self.fields.is_empty() {
            return "{}".to_string();
        }
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(name, descriptor)| format!("{name}: {}", descriptor.describe()))
            .collect();
        format!("{{ {} }}", parts.join("; "))
    }
}
