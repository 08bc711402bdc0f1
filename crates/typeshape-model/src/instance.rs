//! # Live Instances
//!
//! An [`Instance`] is the mutable object materialized by `create`. It owns a
//! backing store with one [`Field`] per declared property, in declaration
//! order, and keeps a handle to the model that created it.
//!
//! ## Write Validation
//!
//! Every declared field behaves as a get/set pair bound to its descriptor:
//! [`Instance::set`] checks the candidate against the field descriptor's
//! `assignable` test before committing. A rejected write returns an
//! [`AssignmentError`] and leaves the previous value in place.
//!
//! Writes into model-typed fields distinguish two cases:
//!
//! - an [`Instance`] of the slot's own model is stored as-is;
//! - anything else is a construction request: it is validated, then
//!   materialized into a fresh node of the slot's model. Instances of
//!   other, structurally compatible models are rebuilt this way, so the
//!   stored node validates its later writes against the slot's model and
//!   drops the properties the slot does not declare.
//!
//! ## Members
//!
//! Methods and computed accessors declared on the shape are dispatched by
//! name through [`Instance::call`], [`Instance::read`] and
//! [`Instance::write`]. They bypass validation entirely.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use typeshape_core::{kind_of, AssignmentError, FieldPath, MemberError};

use crate::descriptor::Descriptor;
use crate::factory::ModelType;
use crate::model::Member;

// ─── Field Storage ───────────────────────────────────────────────────

/// The stored value of one declared field.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A primitive value, or `null` for an absent optional.
    Value(Value),
    /// A nested live instance.
    Node(Instance),
}

impl Field {
    /// The plain-data form of this field.
    pub fn snapshot(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Node(node) => node.snapshot(),
        }
    }

    /// The primitive value, if this is not a node.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Node(_) => None,
        }
    }

    /// The nested instance, if this is a node.
    pub fn as_node(&self) -> Option<&Instance> {
        match self {
            Self::Node(node) => Some(node),
            Self::Value(_) => None,
        }
    }

    /// Whether this field holds the absence-value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Node(node) => node.serialize(serializer),
        }
    }
}

impl From<Value> for Field {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<Instance> for Field {
    fn from(i: Instance) -> Self {
        Self::Node(i)
    }
}

macro_rules! value_field {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Field {
                fn from(v: $t) -> Self {
                    Self::Value(Value::from(v))
                }
            }
        )*
    };
}

value_field!(&str, String, bool, i32, i64, u32, u64, f64);

// ─── Instance ────────────────────────────────────────────────────────

/// A live, mutable instance of a model.
#[derive(Clone)]
pub struct Instance {
    model: ModelType,
    values: Vec<Field>,
}

impl Instance {
    /// Assemble an instance from fully materialized fields, aligned with the
    /// model's declared fields.
    pub(crate) fn new(model: ModelType, values: Vec<Field>) -> Self {
        debug_assert_eq!(model.descriptor().fields().len(), values.len());
        Self { model, values }
    }

    /// The model that created this instance.
    pub fn model(&self) -> &ModelType {
        &self.model
    }

    /// Declared field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.model
            .descriptor()
            .fields()
            .iter()
            .map(|(name, _)| name.as_str())
    }

    /// Read a declared field.
    pub fn get(&self, name: &str) -> Option<&Field> {
        let index = self.model.descriptor().field_index(name)?;
        self.values.get(index)
    }

    /// Read a declared field as plain data.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.get(name).map(Field::snapshot)
    }

    /// Read a nested instance.
    pub fn node(&self, name: &str) -> Option<&Instance> {
        self.get(name).and_then(Field::as_node)
    }

    /// Mutable access to a nested instance, whose own writes are validated
    /// against its own model.
    pub fn node_mut(&mut self, name: &str) -> Option<&mut Instance> {
        let index = self.model.descriptor().field_index(name)?;
        match self.values.get_mut(index) {
            Some(Field::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// Write a declared field.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::UnknownField`] for names the model does not
    /// declare, and [`AssignmentError::NotAssignable`] when the value does
    /// not satisfy the field's declared type. In both cases the instance is
    /// unchanged.
    pub fn set(&mut self, name: &str, value: impl Into<Field>) -> Result<(), AssignmentError> {
        let value = value.into();
        let Some(index) = self.model.descriptor().field_index(name) else {
            return Err(AssignmentError::UnknownField {
                field: name.to_string(),
                model: self.model.describe(),
            });
        };
        let descriptor = &self.model.descriptor().fields()[index].1;

        let snapshot = value.snapshot();
        let rejected = || AssignmentError::NotAssignable {
            path: FieldPath::field(name),
            expected: descriptor.describe(),
            actual: kind_of(&snapshot),
        };

        if !descriptor.assignable(&snapshot) {
            let err = rejected();
            tracing::debug!(field = name, error = %err, "assignment rejected");
            return Err(err);
        }

        let slot = descriptor.model_type();
        let materialized = match value {
            Field::Node(node) if slot.is_some_and(|slot| node.model().same_model(slot)) => {
                Ok(Field::Node(node))
            }
            Field::Node(_) if slot.is_some() => descriptor.materialize(Some(&snapshot)),
            Field::Node(_) => Ok(Field::Value(snapshot.clone())),
            Field::Value(raw) => descriptor.materialize(Some(&raw)),
        };
        let stored = match materialized {
            Ok(field) => field,
            Err(cause) => {
                let err = rejected();
                tracing::debug!(field = name, %cause, "assignment could not be materialized");
                return Err(err);
            }
        };

        self.values[index] = stored;
        tracing::trace!(field = name, "field assigned");
        Ok(())
    }

    /// Plain-data form of the instance: an object of the declared fields,
    /// nested instances included.
    pub fn snapshot(&self) -> Value {
        let map: Map<String, Value> = self
            .field_names()
            .zip(&self.values)
            .map(|(name, field)| (name.to_string(), field.snapshot()))
            .collect();
        Value::Object(map)
    }

    // ─── Members ─────────────────────────────────────────────────────

    fn lookup_member(&self, name: &str) -> Result<Member, MemberError> {
        self.model
            .descriptor()
            .member(name)
            .cloned()
            .ok_or_else(|| MemberError::UnknownMember {
                name: name.to_string(),
                model: self.model.describe(),
            })
    }

    /// Invoke a method member.
    ///
    /// # Errors
    ///
    /// Fails for unknown members, for accessors, and with whatever the
    /// method itself returns.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, MemberError> {
        match self.lookup_member(name)? {
            Member::Method(method) => method(self, args),
            Member::Computed { .. } => Err(MemberError::WrongKind {
                name: name.to_string(),
                expected: "method",
            }),
        }
    }

    /// Read a computed accessor.
    pub fn read(&self, name: &str) -> Result<Value, MemberError> {
        match self.lookup_member(name)? {
            Member::Computed { get, .. } => Ok(get(self)),
            Member::Method(_) => Err(MemberError::WrongKind {
                name: name.to_string(),
                expected: "computed accessor",
            }),
        }
    }

    /// Write a computed accessor through its setter.
    ///
    /// # Errors
    ///
    /// Returns [`MemberError::ReadOnly`] when the accessor has no setter.
    pub fn write(&mut self, name: &str, value: Value) -> Result<(), MemberError> {
        match self.lookup_member(name)? {
            Member::Computed { set: Some(set), .. } => set(self, value),
            Member::Computed { set: None, .. } => Err(MemberError::ReadOnly {
                name: name.to_string(),
            }),
            Member::Method(_) => Err(MemberError::WrongKind {
                name: name.to_string(),
                expected: "computed accessor",
            }),
        }
    }
}

impl PartialEq for Instance {
    /// Instances compare by their declared data, not by model identity.
    fn eq(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("model", &self.model.describe())
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, field) in self.field_names().zip(&self.values) {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}
