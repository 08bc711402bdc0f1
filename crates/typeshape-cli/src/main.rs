//! # typeshape CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use typeshape_cli::check::{run_check, CheckArgs};
use typeshape_cli::create::{run_create, CreateArgs};
use typeshape_cli::logging::{self, LogFormat};
use typeshape_cli::models::{run_models, ModelsArgs};

/// Runtime model checking for JSON and YAML documents.
///
/// Declares models in a shape file, then validates documents against them
/// or materializes documents into instances with defaults filled in.
#[derive(Parser, Debug)]
#[command(name = "typeshape", version, about, long_about = None)]
struct Cli {
    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a document against a declared model.
    Check(CheckArgs),

    /// Materialize a document into an instance of a declared model.
    Create(CreateArgs),

    /// List the models a shape file declares.
    Models(ModelsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_format) {
        eprintln!("failed to initialize logging: {e}");
    }

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Check(args) => run_check(args, &mut stdout),
        Commands::Create(args) => run_create(args, &mut stdout),
        Commands::Models(args) => run_models(args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
