//! Shell command source.

use std::process::Command;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::debug;

use super::{envelope, not_evaluated, DataSource};
use crate::document::Document;
use crate::error::{HostcheckError, Result};

/// Output of a command run through the platform shell, as a
/// `shell_command` document.
///
/// The document data carries `command`, `stdout`, `stderr`, `returncode`
/// (null when killed by a signal) and `elapsed` (seconds).
#[derive(Debug)]
pub struct ShellCommandSource {
    command: String,
    captured: Option<(Value, DateTime<Utc>)>,
}

impl ShellCommandSource {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            captured: None,
        }
    }

    /// The command line.
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl DataSource for ShellCommandSource {
    fn name(&self) -> &str {
        "shell_command"
    }

    fn evaluate(&mut self) -> Result<()> {
        if self.captured.is_some() {
            return Ok(());
        }

        let timestamp = Utc::now();
        let start = Instant::now();
        debug!(command = %self.command, "running shell command");

        let output = Command::new(shell())
            .arg(shell_flag())
            .arg(&self.command)
            .output()
            .map_err(|e| HostcheckError::DataUnavailable {
                source_name: self.name().to_string(),
                message: format!("failed to run '{}': {}", self.command, e),
            })?;

        let data = json!({
            "command": self.command,
            "stdout": String::from_utf8_lossy(&output.stdout),
            "stderr": String::from_utf8_lossy(&output.stderr),
            "returncode": output.status.code(),
            "elapsed": start.elapsed().as_secs_f64(),
        });
        self.captured = Some((data, timestamp));
        Ok(())
    }

    fn to_document(&self) -> Result<Document> {
        let (data, timestamp) = self
            .captured
            .as_ref()
            .ok_or_else(|| not_evaluated(self.name()))?;
        Ok(envelope(self.name(), data.clone(), *timestamp))
    }
}

fn shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        "/bin/sh".to_string()
    }
}

fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-c"
    }
}
