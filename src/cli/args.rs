//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::render::OutputFormat;

/// hostcheck - Evaluate host measurements against a battery of checks.
#[derive(Debug, Parser)]
#[command(name = "hostcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a battery of checks over newline-delimited JSON documents
    Check(CheckArgs),

    /// Collect documents from the bundled data sources
    Collect(CollectArgs),

    /// Print the JSON Schema of the battery file format
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Battery file listing the checks to run
    #[arg(short, long, env = "HOSTCHECK_BATTERY")]
    pub battery: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Newline-delimited JSON documents (stdin if omitted)
    pub input: Option<PathBuf>,
}

/// Arguments for the `collect` command.
///
/// With no source selected, the process environment is collected.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CollectArgs {
    /// Run a command through the platform shell (repeatable)
    #[arg(long = "command", value_name = "CMD")]
    pub commands: Vec<String>,

    /// Stat a file (repeatable)
    #[arg(long = "stat", value_name = "PATH")]
    pub stats: Vec<PathBuf>,

    /// Capture the process environment
    #[arg(long)]
    pub env: bool,

    /// Replay a previously collected document (repeatable)
    #[arg(long = "snapshot", value_name = "FILE")]
    pub snapshots: Vec<PathBuf>,
}

impl CollectArgs {
    /// Whether no source was selected.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.stats.is_empty() && !self.env && self.snapshots.is_empty()
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
