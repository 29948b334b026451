//! The `hostcheck schema` command prints the battery JSON Schema.

use std::io::Write;

use super::dispatcher::{Command, CommandResult};
use crate::config::battery_schema;
use crate::error::Result;

/// The schema command implementation.
pub struct SchemaCommand;

impl Command for SchemaCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        serde_json::to_writer_pretty(&mut *out, &battery_schema())?;
        writeln!(out)?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_valid_json_schema() {
        let mut out = Vec::new();
        SchemaCommand.execute(&mut out).unwrap();
        let schema: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(schema["properties"]["checks"].is_object());
    }
}
