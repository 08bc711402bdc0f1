//! # Models Subcommand
//!
//! List the models a shape file declares, one per line, with their fields.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::input::load_registry;

/// Arguments for the `typeshape models` subcommand.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Shape file declaring the models (JSON or YAML).
    #[arg(long)]
    pub shapes: PathBuf,
}

/// Execute the models subcommand.
pub fn run_models(args: &ModelsArgs, out: &mut impl Write) -> Result<u8> {
    let registry = load_registry(&args.shapes)?;
    for (name, model) in registry.iter() {
        writeln!(out, "{name} {}", model.descriptor().describe_structure())?;
    }
    Ok(0)
}
