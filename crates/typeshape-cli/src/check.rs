//! # Check Subcommand
//!
//! Validate a document against a declared model and report every violation.
//! Exit code 0 when the document matches, 1 otherwise.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::input::{load_registry, lookup, read_value};

/// Arguments for the `typeshape check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Shape file declaring the models (JSON or YAML).
    #[arg(long)]
    pub shapes: PathBuf,

    /// Name of the model to check against.
    #[arg(long)]
    pub model: String,

    /// Also list properties the model does not declare.
    #[arg(long)]
    pub show_superfluous: bool,

    /// Document to check (JSON or YAML, `-` for JSON on stdin).
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let registry = load_registry(&args.shapes)?;
    let model = lookup(&registry, &args.model)?;
    let document = read_value(&args.document)?;

    let report = model.check(&document);
    if report.is_valid() {
        writeln!(out, "valid")?;
    } else {
        tracing::debug!(
            model = %args.model,
            violations = report.violations().len(),
            "document does not match"
        );
        writeln!(out, "{report}")?;
    }

    if args.show_superfluous {
        for path in report.superfluous() {
            writeln!(out, "  {path}: not declared, ignored")?;
        }
    }

    Ok(if report.is_valid() { 0 } else { 1 })
}
