//! Collect command implementation.
//!
//! The `hostcheck collect` command evaluates the bundled data sources and
//! prints their documents as newline-delimited JSON, ready to be piped into
//! `hostcheck check`.

use std::io::Write;

use super::dispatcher::{Command, CommandResult};
use crate::cli::args::CollectArgs;
use crate::data::{
    self, DataSource, EnvironmentSource, ShellCommandSource, SnapshotSource, StatSource,
};
use crate::error::Result;

/// The collect command implementation.
pub struct CollectCommand {
    args: CollectArgs,
}

impl CollectCommand {
    /// Create a new collect command.
    pub fn new(args: CollectArgs) -> Self {
        Self { args }
    }

    /// Build the selected sources, in a fixed order.
    pub fn sources(&self) -> Vec<Box<dyn DataSource>> {
        let mut sources: Vec<Box<dyn DataSource>> = Vec::new();
        if self.args.env || self.args.is_empty() {
            sources.push(Box::new(EnvironmentSource::new()));
        }
        for command in &self.args.commands {
            sources.push(Box::new(ShellCommandSource::new(command.clone())));
        }
        for path in &self.args.stats {
            sources.push(Box::new(StatSource::new(path.clone())));
        }
        for path in &self.args.snapshots {
            sources.push(Box::new(SnapshotSource::new(path.clone())));
        }
        sources
    }
}

impl Command for CollectCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let mut missing = 0;
        for mut source in self.sources() {
            match data::collect(source.as_mut()) {
                Some(doc) => {
                    serde_json::to_writer(&mut *out, &doc)?;
                    writeln!(out)?;
                }
                None => missing += 1,
            }
        }

        if missing > 0 {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
