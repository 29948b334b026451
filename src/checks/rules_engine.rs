//! Ad hoc checks composed from predicate rules.
//!
//! A [`RulesEngine`] holds an ordered list of [`Rule`]s and evaluates them
//! with short-circuit AND semantics:
//!
//! - the first rule returning `false` makes the verdict `YES`
//! - the first rule returning an error makes the verdict `MAYBE`
//! - all rules returning `true` make the verdict `NO`
//!
//! Rules after the deciding one are not evaluated.
//!
//! # Example
//!
//! ```
//! use hostcheck::checks::{Check, RulesEngine};
//! use hostcheck::document::Document;
//! use hostcheck::result::Issue;
//! use serde_json::json;
//!
//! let doc = Document::new("sysconf", json!({"nprocessors_onln": 4}));
//! let engine = RulesEngine::new()
//!     .with_rule(|d: &Document| Ok(d.u64_at("/data/nprocessors_onln")? == 4));
//! assert_eq!(engine.check(&doc).issue, Issue::No);
//! ```

use std::fmt;

use tracing::debug;

use super::reporting::{Configure, Outcome, Reporting};
use super::Check;
use crate::document::Document;
use crate::error::RuleError;
use crate::result::CheckResult;
use crate::template::{Arg, Templates};

/// A single predicate over a document.
///
/// Returning `Err` means the rule could not be applied to the document.
pub trait Rule: Send + Sync {
    fn evaluate(&self, doc: &Document) -> Result<bool, RuleError>;
}

impl<F> Rule for F
where
    F: Fn(&Document) -> Result<bool, RuleError> + Send + Sync,
{
    fn evaluate(&self, doc: &Document) -> Result<bool, RuleError> {
        self(doc)
    }
}

/// How an ordered rule list judged a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Every rule held.
    Satisfied,
    /// Rule at index `rule` returned false.
    Violated { rule: usize },
    /// Rule at index `rule` could not be applied.
    Inapplicable { rule: usize, reason: String },
}

/// A check built from caller-supplied rules.
pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
    reporting: Reporting,
}

impl RulesEngine {
    /// An engine with no rules and the default templates.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            reporting: Reporting::new(Templates::new(
                "Checking data against rules",
                "Rule criteria not met",
                "Unable to perform comparison: '{0}'",
                "Rule criteria met",
            )),
        }
    }

    /// Append a predicate rule; rules run in the order they were added.
    pub fn add_rule<F>(&mut self, rule: F)
    where
        F: Fn(&Document) -> Result<bool, RuleError> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
    }

    /// Append a rule object.
    pub fn add_boxed_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Builder form of [`RulesEngine::add_rule`].
    pub fn with_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&Document) -> Result<bool, RuleError> + Send + Sync + 'static,
    {
        self.add_rule(rule);
        self
    }

    pub(crate) fn reporting(&self) -> &Reporting {
        &self.reporting
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the engine has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the rules against `doc`, stopping at the first deciding rule.
    pub fn evaluate(&self, doc: &Document) -> Evaluation {
        for (index, rule) in self.rules.iter().enumerate() {
            match rule.evaluate(doc) {
                Ok(true) => continue,
                Ok(false) => {
                    debug!(rule = index, "rule not met");
                    return Evaluation::Violated { rule: index };
                }
                Err(e) => {
                    return Evaluation::Inapplicable {
                        rule: index,
                        reason: e.to_string(),
                    }
                }
            }
        }
        Evaluation::Satisfied
    }

    /// Evaluate `doc`, rendering the brief and pass/fail details with `args`.
    ///
    /// The error detail always receives the failure reason instead.
    pub fn check_with_args(&self, doc: &Document, args: &[Arg]) -> CheckResult {
        let outcome = match self.evaluate(doc) {
            Evaluation::Satisfied => Outcome::Pass(args.to_vec()),
            Evaluation::Violated { .. } => Outcome::Fail(args.to_vec()),
            Evaluation::Inapplicable { reason, .. } => Outcome::Error(reason),
        };
        self.reporting.render(doc, args, outcome)
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RulesEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RulesEngine")
            .field("rules", &self.rules.len())
            .field("reporting", &self.reporting)
            .finish()
    }
}

impl Configure for RulesEngine {
    fn reporting_mut(&mut self) -> &mut Reporting {
        &mut self.reporting
    }
}

impl Check for RulesEngine {
    fn name(&self) -> &str {
        "rules_engine"
    }

    fn check(&self, doc: &Document) -> CheckResult {
        self.check_with_args(doc, &[])
    }
}
