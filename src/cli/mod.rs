//! Command-line interface for hostcheck.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, CollectArgs, Commands, CompletionsArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
