//! # Input Loading
//!
//! Shape files and documents are JSON or YAML, picked by file extension.
//! YAML deserializes straight into `serde_json::Value`, so the engine only
//! ever sees JSON values and mapping order is kept. The path `-` reads JSON
//! from stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use typeshape_core::describe_value;
use typeshape_model::{compile_document, ModelRegistry, ModelType};

/// Read a JSON or YAML file (or stdin for `-`) into a JSON value.
pub fn read_value(path: &Path) -> Result<Value> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return serde_json::from_str(&buf).context("stdin is not valid JSON");
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let value = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML: {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))?,
    };

    tracing::debug!(path = %path.display(), value = %describe_value(&value), "loaded input");
    Ok(value)
}

/// Load and compile a shape file.
pub fn load_registry(path: &Path) -> Result<ModelRegistry> {
    let document = read_value(path)?;
    let registry = compile_document(&document)
        .with_context(|| format!("invalid shape file: {}", path.display()))?;
    tracing::info!(models = registry.len(), path = %path.display(), "loaded shapes");
    Ok(registry)
}

/// Look up a model by name, listing the declared names on failure.
pub fn lookup<'a>(registry: &'a ModelRegistry, name: &str) -> Result<&'a ModelType> {
    match registry.get(name) {
        Some(model) => Ok(model),
        None => {
            let known: Vec<&str> = registry.names().collect();
            bail!("unknown model '{name}' (declared: {})", known.join(", "))
        }
    }
}
