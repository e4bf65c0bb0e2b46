//! cm-cli library
//!
//! Exposes the command surface and runner so the binary and the integration
//! tests drive the same code.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod runner;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliResult};
pub use runner::{build_manager, render, run};
