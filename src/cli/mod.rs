//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod invocation;
pub mod output;

pub use args::{Cli, Commands, LegacyArgs, LegacyCode};
pub use error::{CliError, CliResult};
pub use invocation::Invocation;
