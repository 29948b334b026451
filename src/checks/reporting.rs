//! Shared rendering of check outcomes into results.

use tracing::warn;

use crate::document::Document;
use crate::result::{CheckResult, Issue, Priority};
use crate::template::{Arg, TemplateOverrides, Templates};

/// What a check concluded, with the arguments for its detail template.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No problem; rendered with `detail_pass`.
    Pass(Vec<Arg>),
    /// Problem detected; rendered with `detail_fail`.
    Fail(Vec<Arg>),
    /// The check could not be evaluated; rendered with `detail_error`.
    Error(String),
}

impl Outcome {
    /// `Pass` when `ok`, otherwise `Fail`, with the same arguments.
    pub fn from_bool(ok: bool, args: Vec<Arg>) -> Self {
        if ok {
            Outcome::Pass(args)
        } else {
            Outcome::Fail(args)
        }
    }

    /// The verdict this outcome maps to.
    pub fn issue(&self) -> Issue {
        match self {
            Outcome::Pass(_) => Issue::No,
            Outcome::Fail(_) => Issue::Yes,
            Outcome::Error(_) => Issue::Maybe,
        }
    }
}

/// Templates and severity a check renders its results with.
#[derive(Debug, Clone, PartialEq)]
pub struct Reporting {
    pub templates: Templates,
    /// Priority of a `YES` verdict.
    pub priority: Priority,
}

impl Reporting {
    /// Reporting with the given defaults and `WARNING` priority.
    pub fn new(templates: Templates) -> Self {
        Self {
            templates,
            priority: Priority::Warning,
        }
    }

    /// Apply caller overrides to the templates.
    pub fn override_templates(&mut self, overrides: &TemplateOverrides) {
        self.templates = self.templates.clone().merge(overrides);
    }

    /// Build the result for `outcome`, seeded from `doc`.
    ///
    /// `NO` results are `INFO`, `MAYBE` results are `NOTICE`, and `YES`
    /// results carry the configured priority.
    pub fn render(&self, doc: &Document, brief_args: &[Arg], outcome: Outcome) -> CheckResult {
        let mut result = CheckResult::from_document(doc);
        result.format_brief(&self.templates.brief, brief_args);
        result.issue = outcome.issue();

        match outcome {
            Outcome::Pass(args) => {
                result.priority = Priority::Info;
                result.format_detail(&self.templates.detail_pass, &args);
            }
            Outcome::Fail(args) => {
                result.priority = self.priority;
                result.format_detail(&self.templates.detail_fail, &args);
            }
            Outcome::Error(reason) => {
                warn!(document = doc.name(), %reason, "check could not be evaluated");
                result.priority = Priority::Notice;
                result.format_detail(&self.templates.detail_error, &[Arg::from(reason)]);
            }
        }

        result
    }
}

/// Builder access to a check's templates and severity.
pub trait Configure: Sized {
    fn reporting_mut(&mut self) -> &mut Reporting;

    /// Replace any subset of the templates.
    fn with_templates(mut self, overrides: &TemplateOverrides) -> Self {
        self.reporting_mut().override_templates(overrides);
        self
    }

    /// Priority of a `YES` verdict.
    fn with_priority(mut self, priority: Priority) -> Self {
        self.reporting_mut().priority = priority;
        self
    }
}
