//! Library side of the `kronos` command: configuration and command logic.

pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};
