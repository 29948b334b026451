//! Check registry for running a battery of checks.
//!
//! The [`CheckRegistry`] stores checks and routes each document to every
//! check that accepts its kind.

use tracing::debug;

use super::Check;
use crate::document::Document;
use crate::result::CheckResult;
use crate::template::{self, Arg};

/// An ordered collection of checks.
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Register a check; checks run in registration order.
    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    /// Iterate over all checks.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|c| c.as_ref())
    }

    /// Get the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every check accepting `doc`.
    ///
    /// Returns `None` when no registered check accepts the document's kind.
    /// Otherwise the returned parent has one child per check and carries
    /// their rollup.
    pub fn run(&self, doc: &Document) -> Option<CheckResult> {
        let kind = doc.kind();
        let mut parent = CheckResult::from_document(doc);
        parent.format_brief("Checks for '{0}'", &[Arg::from(doc.name())]);

        for check in self.checks.iter().filter(|c| c.accepts(&kind)) {
            debug!(check = check.name(), document = doc.name(), "running check");
            parent.add_child(check.check(doc));
        }

        if !parent.is_composite() {
            debug!(document = doc.name(), "no check accepts document, skipping");
            return None;
        }

        parent.propagate();
        Some(parent)
    }

    /// Run the registry over `docs`, grouping per-document results under
    /// one root.
    pub fn run_all(&self, docs: &[Document]) -> CheckResult {
        let mut root = CheckResult::new();
        for result in docs.iter().filter_map(|doc| self.run(doc)) {
            for id in &result.system_id {
                if !root.system_id.contains(id) {
                    root.system_id.push(id.clone());
                }
            }
            root.add_child(result);
        }

        let evaluated: usize = root.children.iter().map(|r| r.children.len()).sum();
        root.brief = template::format(
            "Evaluated {0} checks across {1} documents",
            &[Arg::from(evaluated), Arg::from(root.children.len())],
        );
        root.propagate();
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{AmountFree, CoreCount, Environment};
    use crate::document::DocumentKind;
    use crate::result::{Issue, Priority};
    use serde_json::json;

    struct MockCheck;

    impl Check for MockCheck {
        fn name(&self) -> &str {
            "mock"
        }
        fn accepts(&self, kind: &DocumentKind) -> bool {
            *kind == DocumentKind::Other("mock".into())
        }
        fn check(&self, doc: &Document) -> CheckResult {
            CheckResult::from_document(doc).with_issue(Issue::Maybe)
        }
    }

    fn sysconf() -> Document {
        Document::new("sysconf", json!({"nprocessors_onln": 4})).with_hostname("node01")
    }

    fn registry() -> CheckRegistry {
        let mut registry = CheckRegistry::new();
        registry.register(Box::new(CoreCount::new(4)));
        registry.register(Box::new(CoreCount::new(8)));
        registry.register(Box::new(AmountFree::new("/", 1)));
        registry
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CheckRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_iteration_keeps_order() {
        let registry = registry();
        let names: Vec<&str> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["cpu/core_count", "cpu/core_count", "disk/amount_free"]);
    }

    #[test]
    fn run_routes_to_accepting_checks() {
        let result = registry().run(&sysconf()).unwrap();
        assert_eq!(result.brief, "Checks for 'sysconf'");
        assert_eq!(result.children.len(), 2);
        assert_eq!(result.children[0].issue, Issue::No);
        assert_eq!(result.children[1].issue, Issue::Yes);
        assert_eq!(result.issue, Issue::Yes);
        assert_eq!(result.priority, Priority::Warning);
        assert_eq!(result.system_id, vec!["node01".to_string()]);
    }

    #[test]
    fn run_skips_unhandled_documents() {
        let doc = Document::new("environment", json!({"FOO": "bar"}));
        assert!(registry().run(&doc).is_none());
    }

    #[test]
    fn run_all_groups_under_root() {
        let mut registry = registry();
        registry.register(Box::new(Environment::new("FOO", "bar", false).unwrap()));
        registry.register(Box::new(MockCheck));

        let docs = vec![
            sysconf(),
            Document::new("environment", json!({"FOO": "bar"})).with_hostname("node02"),
            Document::new("getloadavg", json!({"load1": 1.0})),
            Document::new("mock", json!({})).with_hostname("node01"),
        ];
        let root = registry.run_all(&docs);

        assert_eq!(root.children.len(), 3);
        assert_eq!(root.issue, Issue::Yes);
        assert_eq!(root.system_id, vec!["node01".to_string(), "node02".to_string()]);
        assert_eq!(root.brief, "Evaluated 4 checks across 3 documents");
        assert!(root.match_issue(Issue::Maybe));
    }

    #[test]
    fn run_all_of_nothing_is_no() {
        let root = registry().run_all(&[]);
        assert_eq!(root.issue, Issue::No);
        assert!(root.children.is_empty());
    }
}
