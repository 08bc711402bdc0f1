//! # Create Subcommand
//!
//! Materialize a document into an instance of a declared model and print
//! the resulting snapshot: declared fields only, defaults filled in.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::input::{load_registry, lookup, read_value};

/// Arguments for the `typeshape create` subcommand.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Shape file declaring the models (JSON or YAML).
    #[arg(long)]
    pub shapes: PathBuf,

    /// Name of the model to instantiate.
    #[arg(long)]
    pub model: String,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,

    /// Input document. Omit to create an instance from defaults alone.
    #[arg(value_name = "DOCUMENT")]
    pub document: Option<PathBuf>,
}

/// Execute the create subcommand.
///
/// Returns exit code 0 on success and 1 when the input cannot be
/// materialized; operational failures are errors.
pub fn run_create(args: &CreateArgs, out: &mut impl Write) -> Result<u8> {
    let registry = load_registry(&args.shapes)?;
    let model = lookup(&registry, &args.model)?;
    let document = args.document.as_deref().map(read_value).transpose()?;

    match model.create_with(document.as_ref()) {
        Ok(instance) => {
            let rendered = if args.compact {
                serde_json::to_string(&instance)?
            } else {
                serde_json::to_string_pretty(&instance)?
            };
            writeln!(out, "{rendered}")?;
            Ok(0)
        }
        Err(err) => {
            tracing::debug!(model = %args.model, error = %err, "construction failed");
            writeln!(out, "FAIL: {err}")?;
            Ok(1)
        }
    }
}
