//! CLI module
//!
//! Command-line interface for running the pipeline.
//!
//! Paths come from built-in defaults, then an optional YAML file
//! (`--config`), then the `--input`, `--database` and `--output` flags.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::{format_currency, render_summary, Runner};
