//! JSON formatter.

use std::io::Write;

use super::ResultFormatter;
use crate::result::CheckResult;

/// Formats a result tree as pretty-printed JSON.
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl ResultFormatter for JsonFormatter {
    fn format<W: Write>(&self, result: &CheckResult, writer: &mut W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, result)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Issue, Priority};

    #[test]
    fn writes_result_tree() {
        let mut root = CheckResult::new().with_brief("root");
        root.add_child(
            CheckResult::new()
                .with_issue(Issue::Yes)
                .with_priority(Priority::Error),
        );
        root.propagate();

        let mut output = Vec::new();
        JsonFormatter::new().format(&root, &mut output).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(value["brief"], "root");
        assert_eq!(value["issue"], "YES");
        assert_eq!(value["priority"], "ERROR");
        assert_eq!(value["children"][0]["issue"], "YES");
        assert!(value["timestamp"].is_i64());
    }
}
