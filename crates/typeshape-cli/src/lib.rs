//! # typeshape-cli: Command-Line Interface
//!
//! Check and materialize documents against models declared in a shape file.
//!
//! ## Subcommands
//!
//! - `typeshape check`: validate a document, listing every violation
//! - `typeshape create`: materialize a document with defaults filled in
//! - `typeshape models`: list the models a shape file declares
//!
//! ```bash
//! typeshape check --shapes shapes.yaml --model Item item.json
//! typeshape create --shapes shapes.yaml --model Box
//! echo '{"id": 3}' | typeshape create --shapes shapes.yaml --model Item -
//! ```
//!
//! Handlers return a process exit code: 0 on success, 1 when the document
//! is rejected. Operational failures (unreadable files, invalid shape files,
//! unknown models) are errors.

pub mod check;
pub mod create;
pub mod input;
pub mod logging;
pub mod models;
