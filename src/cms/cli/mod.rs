//! # CLI Layer
//!
//! One possible UI client for the cms library. This is the only place that:
//! - Parses arguments
//! - Reads from stdin (confirmations and the interactive shell)
//! - Writes to stdout/stderr
//! - Installs the logger
//!
//! ## Structure
//!
//! - `setup`: clap definitions
//! - `commands`: `run()`, one-shot handlers and context setup
//! - `shell`: the interactive session over a single API instance
//! - `render`: tables, status and colored messages

mod commands;
mod render;
mod setup;
mod shell;

pub use commands::run;
