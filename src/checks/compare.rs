//! Generic comparison of one document value against a reference.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::warn;

use super::reporting::{Configure, Outcome, Reporting};
use super::Check;
use crate::document::Document;
use crate::error::RuleError;
use crate::result::{CheckResult, Issue, Priority};
use crate::template::{self, Arg, Templates};

type Comparator<T> = Box<dyn Fn(&T, &T) -> bool + Send + Sync>;
type Transform<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// Compares the value at a JSON pointer against a reference value.
///
/// The verdict is `NO` when `comparator(observed, reference)` returns true,
/// `YES` when it returns false, and `MAYBE` when the pointer does not
/// resolve or the value cannot be read as `T`.
///
/// Template arguments: brief `[pointer, reference]`, details
/// `[observed, reference]`.
///
/// # Example
///
/// ```
/// use hostcheck::checks::{Check, Compare};
/// use hostcheck::document::Document;
/// use hostcheck::result::Issue;
/// use serde_json::json;
///
/// let doc = Document::new("sysconf", json!({"nprocessors_onln": 4}));
/// let at_least_two = Compare::new("/data/nprocessors_onln", 2u64, |obs, reference| obs >= reference);
/// assert_eq!(at_least_two.check(&doc).issue, Issue::No);
/// ```
pub struct Compare<T> {
    pointer: String,
    reference: T,
    comparator: Comparator<T>,
    transform: Option<Transform<T>>,
    brief_args: Vec<Arg>,
    reporting: Reporting,
}

impl<T> Compare<T>
where
    T: DeserializeOwned + Into<Arg> + Clone + Send + Sync,
{
    /// Compare the value at `pointer` with `reference` using `comparator`.
    pub fn new<F>(pointer: &str, reference: T, comparator: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let brief_args = vec![Arg::from(pointer), reference.clone().into()];
        Self {
            pointer: pointer.to_string(),
            reference,
            comparator: Box::new(comparator),
            transform: None,
            brief_args,
            reporting: Reporting::new(Templates::new(
                "Comparing value at '{0}' to reference value of '{1}'",
                "Comparison of observed value '{0}' and reference value '{1}' returned false",
                "Unable to perform comparison: '{0}'",
                "Comparison of observed value '{0}' and reference value '{1}' returned true",
            )),
        }
    }

    /// Apply `transform` to the observed value before comparing.
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Replace the default templates, before any caller overrides.
    pub fn with_default_templates(mut self, templates: Templates) -> Self {
        self.reporting.templates = templates;
        self
    }

    /// Replace the arguments the brief template is rendered with.
    pub fn with_brief_args(mut self, args: Vec<Arg>) -> Self {
        self.brief_args = args;
        self
    }

    /// The reference value.
    pub fn reference(&self) -> &T {
        &self.reference
    }

    /// Read and transform the observed value from `doc`.
    pub fn observe(&self, doc: &Document) -> Result<T, RuleError> {
        let raw = doc.value_at(&self.pointer)?;
        let value: T = serde_json::from_value(raw.clone())
            .map_err(|e| RuleError::new(format!("value at '{}': {}", self.pointer, e)))?;
        Ok(match &self.transform {
            Some(transform) => transform(value),
            None => value,
        })
    }

    /// Judge an already-extracted observation of `doc`.
    pub fn judge(&self, doc: &Document, observed: Result<T, RuleError>) -> CheckResult {
        let outcome = match observed {
            Ok(value) => {
                let ok = (self.comparator)(&value, &self.reference);
                Outcome::from_bool(ok, vec![value.into(), self.reference.clone().into()])
            }
            Err(e) => Outcome::Error(e.to_string()),
        };
        self.reporting.render(doc, &self.brief_args, outcome)
    }

    /// Compare every document, returning a parent with one child each.
    ///
    /// The parent carries the worst verdict of its children.
    pub fn check_all(&self, docs: &[Document]) -> CheckResult {
        let mut parent = CheckResult::new();
        parent.brief = template::format(
            "Comparing {1} values at '{0}' to reference value of '{2}'",
            &[
                Arg::from(&self.pointer),
                Arg::from(docs.len()),
                self.reference.clone().into(),
            ],
        );
        if docs.is_empty() {
            warn!(pointer = %self.pointer, "no documents to compare");
            parent.issue = Issue::Maybe;
            parent.priority = Priority::Notice;
            parent.format_detail(
                &self.reporting.templates.detail_error,
                &[Arg::from("no documents to compare")],
            );
            return parent;
        }
        for doc in docs {
            parent.add_child(self.check(doc));
        }
        parent.propagate();
        parent
    }
}

impl<T> Configure for Compare<T> {
    fn reporting_mut(&mut self) -> &mut Reporting {
        &mut self.reporting
    }
}

impl<T> Check for Compare<T>
where
    T: DeserializeOwned + Into<Arg> + Clone + Send + Sync,
{
    fn name(&self) -> &str {
        "compare"
    }

    fn check(&self, doc: &Document) -> CheckResult {
        self.judge(doc, self.observe(doc))
    }
}

impl<T: fmt::Debug> fmt::Debug for Compare<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compare")
            .field("pointer", &self.pointer)
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}
