//! Check command implementation.
//!
//! The `hostcheck check` command runs a battery over newline-delimited JSON
//! documents and prints the result tree. The exit code reflects the rollup.

use std::io::{Read, Write};

use anyhow::Context;
use tracing::{debug, error};

use super::dispatcher::{Command, CommandResult};
use crate::cli::args::CheckArgs;
use crate::config::load_battery;
use crate::document::Document;
use crate::error::Result;
use crate::render::{JsonFormatter, OutputFormat, ResultFormatter, TreeFormatter};
use crate::result::{CheckResult, Issue};

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
    use_color: bool,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs, use_color: bool) -> Self {
        Self { args, use_color }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn read_input(&self) -> Result<String> {
        match &self.args.input {
            Some(path) => Ok(std::fs::read_to_string(path)
                .with_context(|| format!("failed to read input {}", path.display()))?),
            None => {
                let mut content = String::new();
                std::io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Load the battery and evaluate it over `documents`.
    pub fn evaluate(&self, documents: &[Document]) -> Result<CheckResult> {
        let battery = load_battery(&self.args.battery)?;
        let registry = battery.build()?;
        debug!(
            checks = registry.len(),
            documents = documents.len(),
            "running battery"
        );

        let mut root = registry.run_all(documents);
        if let Some(name) = &battery.name {
            root.detail = std::mem::replace(&mut root.brief, name.clone());
        }
        Ok(root)
    }
}

impl Command for CheckCommand {
    fn execute(&self, mut out: &mut dyn Write) -> Result<CommandResult> {
        let documents = parse_documents(&self.read_input()?)?;
        let root = self.evaluate(&documents)?;

        match self.args.format {
            OutputFormat::Human => TreeFormatter::new(self.use_color).format(&root, &mut out)?,
            OutputFormat::Json => JsonFormatter::new().format(&root, &mut out)?,
        }

        Ok(match exit_code(root.issue) {
            0 => CommandResult::success(),
            code => CommandResult::failure(code),
        })
    }
}

/// Parse newline-delimited JSON documents, skipping blank lines.
///
/// # Errors
///
/// The first line that is not a valid document fails the whole input.
pub fn parse_documents(text: &str) -> Result<Vec<Document>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            Document::parse(line).inspect_err(|e| {
                error!(line = index + 1, error = %e, "invalid input document");
            })
        })
        .collect()
}

/// Process exit code for a rolled-up issue.
pub fn exit_code(issue: Issue) -> i32 {
    match issue {
        Issue::No => 0,
        Issue::Yes => 1,
        Issue::Maybe => 2,
    }
}
