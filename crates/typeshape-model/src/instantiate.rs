//! # Instantiator
//!
//! Turns a partial untyped value into a fully populated [`Instance`].
//!
//! For every declared field, in declaration order:
//!
//! - present: the field descriptor must match, then the value is
//!   materialized (nested models recurse through this same procedure);
//! - absent and defaulted: the default is produced fresh for this instance;
//! - absent and optional: the field holds `null`;
//! - absent and required: construction fails.
//!
//! Validity is derived per field here; callers are never assumed to have
//! run `is` first. Undeclared input properties are dropped. Construction is
//! atomic: the first failing field aborts and no instance is returned.

use serde_json::{Map, Value};
use typeshape_core::{kind_of, ConstructionError, FieldPath};

use crate::descriptor::Descriptor;
use crate::factory::ModelType;
use crate::instance::Instance;

pub(crate) fn instantiate(
    model: &ModelType,
    input: Option<&Value>,
) -> Result<Instance, ConstructionError> {
    let empty = Map::new();
    let map = match input {
        None => &empty,
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(ConstructionError::NotAnObject {
                path: FieldPath::root(),
                expected: model.describe(),
                actual: kind_of(other),
            });
        }
    };

    let fields = model.descriptor().fields();
    let mut values = Vec::with_capacity(fields.len());
    for (name, descriptor) in fields {
        let field = descriptor
            .materialize(map.get(name))
            .map_err(|err| err.under(name))?;
        values.push(field);
    }

    if tracing::enabled!(tracing::Level::TRACE) {
        let dropped = map.keys().filter(|k| model.descriptor().field(k).is_none()).count();
        tracing::trace!(model = %model.describe(), dropped, "instance created");
    }

    Ok(Instance::new(model.clone(), values))
}
