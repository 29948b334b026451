//! Terminal tree formatter.

use std::io::Write;

use console::Style;

use super::ResultFormatter;
use crate::result::{CheckResult, Issue, Priority};

/// Formats a result tree as indented lines, one node per line.
///
/// ```text
/// [NOT OK] WARNING   Checks for 'getfsstat' (node01)
///     [NOT OK] WARNING   Checking amount of free disk space on filesystem '/' (node01)
///         Observed amount of free disk space 23640371200 bytes is less than reference threshold value 30000000000 bytes
/// ```
pub struct TreeFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl TreeFormatter {
    /// Create a new tree formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn label(issue: Issue) -> &'static str {
        match issue {
            Issue::No => "OK",
            Issue::Yes => "NOT OK",
            Issue::Maybe => "UNKNOWN",
        }
    }

    fn issue_style(&self, issue: Issue) -> Style {
        if !self.use_color {
            return Style::new();
        }
        match issue {
            Issue::No => Style::new().green(),
            Issue::Yes => Style::new().red().bold(),
            Issue::Maybe => Style::new().yellow(),
        }
    }

    fn priority_style(&self, priority: Priority) -> Style {
        if !self.use_color {
            return Style::new();
        }
        match priority {
            Priority::Debug | Priority::Info => Style::new().dim(),
            Priority::Notice => Style::new().cyan(),
            Priority::Warning => Style::new().color256(208),
            _ => Style::new().red().bold(),
        }
    }

    fn dim(&self) -> Style {
        if self.use_color {
            Style::new().dim()
        } else {
            Style::new()
        }
    }

    fn write_node<W: Write>(
        &self,
        node: &CheckResult,
        depth: usize,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let indent = "    ".repeat(depth);
        let label = format!("[{}]", Self::label(node.issue));
        write!(
            writer,
            "{}{} {:<9} {}",
            indent,
            self.issue_style(node.issue).apply_to(label),
            self.priority_style(node.priority).apply_to(node.priority.as_str()),
            node.brief
        )?;
        if !node.system_id.is_empty() {
            write!(
                writer,
                " {}",
                self.dim()
                    .apply_to(format!("({})", node.system_id.join(", ")))
            )?;
        }
        writeln!(writer)?;

        if !node.detail.is_empty() {
            writeln!(writer, "{}    {}", indent, node.detail)?;
        }
        if let Some(action) = &node.action {
            writeln!(writer, "{}    = action: {}", indent, action)?;
        }

        for child in &node.children {
            self.write_node(child, depth + 1, writer)?;
        }
        Ok(())
    }
}

impl ResultFormatter for TreeFormatter {
    fn format<W: Write>(&self, result: &CheckResult, writer: &mut W) -> std::io::Result<()> {
        self.write_node(result, 0, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(result: &CheckResult) -> String {
        let mut output = Vec::new();
        TreeFormatter::new(false)
            .format(result, &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn formats_leaf() {
        let result = CheckResult::new()
            .with_brief("Free space on '/'")
            .with_detail("plenty")
            .with_issue(Issue::No)
            .with_priority(Priority::Info)
            .with_system_id(vec!["node01".into()]);

        let output = render(&result);
        assert!(output.starts_with("[OK] INFO"));
        assert!(output.contains("Free space on '/' (node01)"));
        assert!(output.contains("\n    plenty\n"));
    }

    #[test]
    fn indents_children() {
        let mut root = CheckResult::new().with_brief("root");
        root.add_child(
            CheckResult::new()
                .with_brief("child")
                .with_issue(Issue::Maybe)
                .with_priority(Priority::Notice),
        );
        root.propagate();

        let output = render(&root);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("[UNKNOWN] NOTICE"));
        assert!(lines[1].starts_with("    [UNKNOWN] NOTICE"));
        assert!(lines[1].ends_with("child"));
    }

    #[test]
    fn formats_action() {
        let mut result = CheckResult::new()
            .with_brief("mode")
            .with_issue(Issue::Yes)
            .with_priority(Priority::Warning);
        result.action = Some("chmod 1777 /tmp".into());

        let output = render(&result);
        assert!(output.starts_with("[NOT OK] WARNING"));
        assert!(output.contains("= action: chmod 1777 /tmp"));
    }

    #[test]
    fn plain_output_has_no_escapes() {
        let result = CheckResult::new().with_issue(Issue::Yes);
        assert!(!render(&result).contains('\u{1b}'));
    }
}
