//! Hierarchical check results.
//!
//! A [`CheckResult`] is one verdict node: message fields, an [`Issue`], a
//! [`Priority`] and an ordered list of child results. Composite verdicts are
//! built by attaching children with [`CheckResult::add_child`] and then
//! rolling them up once with [`CheckResult::propagate`].
//!
//! Each node owns its children, so a node can never be attached beneath
//! itself.

pub mod severity;

pub use severity::{Issue, Priority};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::template::{self, Arg};

/// A verdict node in a result tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Short label.
    #[serde(default)]
    pub brief: String,
    /// Human-readable explanation of the verdict.
    #[serde(default)]
    pub detail: String,
    /// Suggested remediation, if any.
    #[serde(default)]
    pub action: Option<String>,
    /// Whether a problem was detected.
    #[serde(default)]
    pub issue: Issue,
    /// Severity of the problem.
    #[serde(default)]
    pub priority: Priority,
    /// Systems the verdict applies to.
    #[serde(default)]
    pub system_id: Vec<String>,
    /// When the underlying measurement was taken.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Ordered sub-results.
    #[serde(default)]
    pub children: Vec<CheckResult>,
}

impl Default for CheckResult {
    fn default() -> Self {
        Self {
            brief: String::new(),
            detail: String::new(),
            action: None,
            issue: Issue::No,
            priority: Priority::Debug,
            system_id: Vec::new(),
            timestamp: Utc::now(),
            children: Vec::new(),
        }
    }
}

impl CheckResult {
    /// Create an empty result stamped with the current time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a result seeded with the envelope of `doc`.
    ///
    /// `system_id` comes from the document's hostname and `timestamp` from
    /// its timestamp (now if the document has none).
    pub fn from_document(doc: &Document) -> Self {
        Self {
            system_id: doc.hostname().map(str::to_string).into_iter().collect(),
            timestamp: doc.timestamp().unwrap_or_else(Utc::now),
            ..Self::default()
        }
    }

    /// Set the brief text.
    pub fn with_brief(mut self, brief: impl Into<String>) -> Self {
        self.brief = brief.into();
        self
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Set the issue.
    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issue = issue;
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the system ids.
    pub fn with_system_id(mut self, system_id: Vec<String>) -> Self {
        self.system_id = system_id;
        self
    }

    /// Render `template` with `args` into the brief text.
    pub fn format_brief(&mut self, template: &str, args: &[Arg]) {
        self.brief = template::format(template, args);
    }

    /// Render `template` with `args` into the detail text.
    pub fn format_detail(&mut self, template: &str, args: &[Arg]) {
        self.detail = template::format(template, args);
    }

    /// Render `template` with `args` into the action text.
    pub fn format_action(&mut self, template: &str, args: &[Arg]) {
        self.action = Some(template::format(template, args));
    }

    /// Attach `child` as the last child of this node.
    pub fn add_child(&mut self, child: CheckResult) {
        self.children.push(child);
    }

    /// Iterate over this node and all descendants, depth first.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// The most severe issue among this node and its descendants.
    pub fn max_issue(&self) -> Issue {
        self.iter().map(|r| r.issue).max().unwrap_or(self.issue)
    }

    /// The most severe priority among nodes whose issue is not `NO`.
    ///
    /// Falls back to this node's own priority when no node qualifies.
    pub fn max_priority(&self) -> Priority {
        self.iter()
            .filter(|r| r.issue != Issue::No)
            .map(|r| r.priority)
            .max()
            .unwrap_or(self.priority)
    }

    /// Whether this node or any descendant has issue `target`.
    pub fn match_issue(&self, target: Issue) -> bool {
        self.iter().any(|r| r.issue == target)
    }

    /// Whether this node or any descendant with an issue has priority `target`.
    pub fn match_priority(&self, target: Priority) -> bool {
        self.iter()
            .filter(|r| r.issue != Issue::No)
            .any(|r| r.priority == target)
    }

    /// Roll the worst issue and priority of the subtree up into this node.
    pub fn propagate(&mut self) {
        let issue = self.max_issue();
        let priority = self.max_priority();
        self.issue = issue;
        self.priority = priority;
    }

    /// Whether this node has children.
    pub fn is_composite(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Pre-order iterator over a result tree.
pub struct Iter<'a> {
    stack: Vec<&'a CheckResult>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CheckResult;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn leaf(issue: Issue, priority: Priority) -> CheckResult {
        CheckResult::new().with_issue(issue).with_priority(priority)
    }

    #[test]
    fn leaf_reports_itself() {
        let r = leaf(Issue::Maybe, Priority::Notice);
        assert_eq!(r.max_issue(), Issue::Maybe);
        assert_eq!(r.max_priority(), Priority::Notice);
        assert!(r.match_issue(Issue::Maybe));
        assert!(!r.match_issue(Issue::Yes));
    }

    #[test]
    fn yes_and_maybe_children_roll_up() {
        let mut parent = CheckResult::new();
        parent.add_child(leaf(Issue::Yes, Priority::Info));
        parent.add_child(leaf(Issue::Maybe, Priority::Error));

        assert_eq!(parent.max_issue(), Issue::Yes);
        assert_eq!(parent.max_priority(), Priority::Error);
        assert!(parent.match_issue(Issue::Maybe));
        assert!(parent.match_priority(Priority::Info));
    }

    #[test]
    fn no_children_do_not_escalate_priority() {
        let mut parent = CheckResult::new();
        parent.add_child(leaf(Issue::No, Priority::Emergency));
        parent.add_child(leaf(Issue::Yes, Priority::Warning));

        assert_eq!(parent.max_priority(), Priority::Warning);
        assert!(!parent.match_priority(Priority::Emergency));
    }

    #[test]
    fn all_no_falls_back_to_own_priority() {
        let mut parent = leaf(Issue::No, Priority::Info);
        parent.add_child(leaf(Issue::No, Priority::Alert));
        assert_eq!(parent.max_issue(), Issue::No);
        assert_eq!(parent.max_priority(), Priority::Info);
    }

    #[test]
    fn max_issue_reaches_grandchildren() {
        let mut child = CheckResult::new();
        child.add_child(leaf(Issue::Yes, Priority::Critical));
        let mut root = CheckResult::new();
        root.add_child(leaf(Issue::No, Priority::Info));
        root.add_child(child);

        assert_eq!(root.max_issue(), Issue::Yes);
        assert_eq!(root.max_priority(), Priority::Critical);
    }

    #[test]
    fn propagate_updates_parent() {
        let mut parent = CheckResult::new().with_brief("host");
        parent.add_child(leaf(Issue::No, Priority::Info));
        parent.add_child(leaf(Issue::Maybe, Priority::Notice));
        parent.propagate();

        assert_eq!(parent.issue, Issue::Maybe);
        assert_eq!(parent.priority, Priority::Notice);
        assert_eq!(parent.children.len(), 2);
    }

    #[test]
    fn iter_is_pre_order() {
        let mut a = CheckResult::new().with_brief("a");
        let mut b = CheckResult::new().with_brief("b");
        b.add_child(CheckResult::new().with_brief("c"));
        a.add_child(b);
        a.add_child(CheckResult::new().with_brief("d"));

        let order: Vec<&str> = a.iter().map(|r| r.brief.as_str()).collect();
        assert_eq!(order, ["a", "b", "c", "d"]);
    }

    #[test]
    fn from_document_copies_envelope() {
        let doc = Document::from_value(json!({
            "name": "sysconf",
            "hostname": "node01",
            "timestamp": 1528057219,
            "data": {}
        }))
        .unwrap();
        let r = CheckResult::from_document(&doc);
        assert_eq!(r.system_id, vec!["node01".to_string()]);
        assert_eq!(r.timestamp.timestamp(), 1528057219);
    }

    #[test]
    fn format_helpers_render_templates() {
        let mut r = CheckResult::new();
        r.format_brief("Free space on '{0}'", &[Arg::from("/")]);
        r.format_detail("{0} < {1}", &[Arg::from(1u64), Arg::from(2u64)]);
        r.format_action("Clean up '{0}'", &[Arg::from("/tmp")]);
        assert_eq!(r.brief, "Free space on '/'");
        assert_eq!(r.detail, "1 < 2");
        assert_eq!(r.action.as_deref(), Some("Clean up '/tmp'"));
    }

    #[test]
    fn serializes_with_names_and_epoch_seconds() {
        let mut r = CheckResult::new()
            .with_brief("parent")
            .with_issue(Issue::Yes)
            .with_priority(Priority::Warning)
            .with_system_id(vec!["node01".into()]);
        r.timestamp = Utc.timestamp_opt(1528057219, 0).unwrap();
        r.add_child(CheckResult {
            timestamp: r.timestamp,
            ..CheckResult::new()
        });

        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["issue"], "YES");
        assert_eq!(value["priority"], "WARNING");
        assert_eq!(value["timestamp"], 1528057219);
        assert_eq!(value["system_id"], json!(["node01"]));
        assert_eq!(value["action"], serde_json::Value::Null);
        assert_eq!(value["children"][0]["issue"], "NO");

        let back: CheckResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, r);
    }
}
