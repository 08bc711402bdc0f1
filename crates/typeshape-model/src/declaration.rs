//! # Declaration Documents
//!
//! Models declared as data (JSON, or YAML converted to JSON) rather than in
//! code. A document names its models; fields may reference other models by
//! name:
//!
//! ```yaml
//! models:
//!   Box:
//!     width: 0
//!     height: { type: number, default: 0 }
//!   Item:
//!     id: { type: number }
//!     name: "boo"
//!     tag: { maybe: { type: string } }
//!     box: { type: Box }
//! ```
//!
//! A field declaration is one of:
//!
//! - a scalar literal: a defaulted field whose type is inferred;
//! - `{ type }`: a primitive (`number`, `string`, `boolean`) or a declared
//!   model;
//! - `{ type, default }`: the same, defaulted;
//! - `{ maybe: <field declaration> }`: an optional field.
//!
//! Declarations compile into the same descriptors as code-built shapes,
//! with fields in document order. Unrecognized keys inside a `{ type }` or
//! `{ maybe }` form are rejected rather than ignored.
//! Models may not contain each other in a cycle; cycles are rejected with
//! the offending chain.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use typeshape_core::DeclarationError;

use crate::descriptor::{maybe, with_default, TypeDescriptor};
use crate::factory::{model_named, ModelType};
use crate::primitive::{boolean, number, string};
use crate::shape::Shape;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeclarationDocument {
    models: BTreeMap<String, Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldDecl {
    Maybe(MaybeDecl),
    Typed(TypedDecl),
    Literal(Value),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MaybeDecl {
    maybe: Box<FieldDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypedDecl {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    default: Option<Value>,
}

/// Field declarations of one model, in document order.
type FieldDecls = Vec<(String, FieldDecl)>;

fn parse_fields(model: &str, fields: Map<String, Value>) -> Result<FieldDecls, DeclarationError> {
    fields
        .into_iter()
        .map(|(field, raw)| {
            let decl = serde_json::from_value(raw).map_err(|e| DeclarationError::Malformed {
                reason: format!("field '{field}' of model '{model}': {e}"),
            })?;
            Ok((field, decl))
        })
        .collect()
}

/// Models compiled from a declaration document, by name.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, ModelType>,
}

impl ModelRegistry {
    /// Look up a model by its declared name.
    pub fn get(&self, name: &str) -> Option<&ModelType> {
        self.models.get(name)
    }

    /// Declared model names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// All models, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelType)> {
        self.models.iter().map(|(n, m)| (n.as_str(), m))
    }

    /// Number of models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Compile a declaration document.
///
/// # Errors
///
/// Returns [`DeclarationError::Malformed`] when the document does not have
/// the expected structure, [`DeclarationError::UnknownType`] for references
/// to undeclared types, [`DeclarationError::Cycle`] when models contain each
/// other, and any error raised while compiling an individual model.
pub fn compile_document(document: &Value) -> Result<ModelRegistry, DeclarationError> {
    let parsed: DeclarationDocument =
        serde_json::from_value(document.clone()).map_err(|e| DeclarationError::Malformed {
            reason: e.to_string(),
        })?;

    let declared = parsed
        .models
        .into_iter()
        .map(|(name, fields)| {
            let fields = parse_fields(&name, fields)?;
            Ok((name, fields))
        })
        .collect::<Result<BTreeMap<_, _>, DeclarationError>>()?;

    let mut compiler = Compiler {
        declared: &declared,
        built: BTreeMap::new(),
        stack: Vec::new(),
    };
    for name in declared.keys() {
        compiler.build(name)?;
    }

    tracing::debug!(models = compiler.built.len(), "compiled declaration document");
    Ok(ModelRegistry {
        models: compiler.built,
    })
}

struct Compiler<'a> {
    declared: &'a BTreeMap<String, FieldDecls>,
    built: BTreeMap<String, ModelType>,
    stack: Vec<String>,
}

impl<'a> Compiler<'a> {
    fn build(&mut self, name: &str) -> Result<ModelType, DeclarationError> {
        if let Some(done) = self.built.get(name) {
            return Ok(done.clone());
        }
        if let Some(start) = self.stack.iter().position(|n| n == name) {
            let mut chain: Vec<&str> = self.stack[start..].iter().map(String::as_str).collect();
            chain.push(name);
            return Err(DeclarationError::Cycle {
                cycle: chain.join(" -> "),
            });
        }

        let declared = self.declared;
        let Some(fields) = declared.get(name) else {
            return Err(DeclarationError::Malformed {
                reason: format!("model '{name}' is not declared"),
            });
        };

        self.stack.push(name.to_string());
        let mut shape = Shape::new();
        for (field, decl) in fields {
            let descriptor = self.resolve(name, field, decl)?;
            shape = shape.field(field.as_str(), descriptor);
        }
        self.stack.pop();

        let compiled = model_named(name, shape)?;
        self.built.insert(name.to_string(), compiled.clone());
        Ok(compiled)
    }

    fn resolve(
        &mut self,
        model: &str,
        field: &str,
        decl: &FieldDecl,
    ) -> Result<crate::shape::ShapeEntry, DeclarationError> {
        match decl {
            FieldDecl::Literal(literal) => {
                if literal.is_object() || literal.is_array() {
                    return Err(DeclarationError::Malformed {
                        reason: format!(
                            "field '{field}' of model '{model}' must be a scalar literal, \
                             {{ type }}, {{ type, default }} or {{ maybe }}"
                        ),
                    });
                }
                Ok(literal.clone().into())
            }
            FieldDecl::Typed(TypedDecl { type_name, default }) => {
                let base = self.named_type(model, field, type_name)?;
                Ok(match default {
                    Some(value) => with_default(base, value.clone()),
                    None => base,
                }
                .into())
            }
            FieldDecl::Maybe(MaybeDecl { maybe: inner }) => {
                let descriptor = match self.resolve(model, field, inner)? {
                    crate::shape::ShapeEntry::Type(t) => t,
                    crate::shape::ShapeEntry::Literal(_) => {
                        return Err(DeclarationError::Malformed {
                            reason: format!(
                                "field '{field}' of model '{model}': maybe requires a type, not a literal"
                            ),
                        });
                    }
                };
                Ok(maybe(descriptor).into())
            }
        }
    }

    fn named_type(
        &mut self,
        model: &str,
        field: &str,
        type_name: &str,
    ) -> Result<TypeDescriptor, DeclarationError> {
        match type_name {
            "number" => Ok(number()),
            "string" => Ok(string()),
            "boolean" => Ok(boolean()),
            other if self.declared.contains_key(other) => Ok(self.build(other)?.into()),
            other => Err(DeclarationError::UnknownType {
                model: model.to_string(),
                field: field.to_string(),
                name: other.to_string(),
            }),
        }
    }
}
