//! Shell command output check.
//!
//! Expressed as a [`RulesEngine`] with one rule: `/data/stdout` must match
//! the expected output. A `remote_shell_command` document holds one
//! `shell_command` entry per host under `data`; each host gets its own child
//! result and the parent carries the rollup.

use super::matcher::Matcher;
use super::reporting::{Configure, Outcome, Reporting};
use super::rules_engine::RulesEngine;
use super::Check;
use crate::document::{Document, DocumentKind};
use crate::error::{Result, RuleError};
use crate::result::{CheckResult, Issue};
use crate::template::{self, Arg, TemplateOverrides};

/// Expected output of a shell command.
///
/// Template arguments: details `[stdout, expected]`.
#[derive(Debug)]
pub struct ShellOutput {
    matcher: Matcher,
    engine: RulesEngine,
}

impl ShellOutput {
    /// Expect stdout to equal `output`, or to match it when `regex` is set.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` when `regex` is set and `output` does not compile.
    pub fn new(output: &str, regex: bool) -> Result<Self> {
        let matcher = Matcher::new(output, regex)?;
        let rule_matcher = matcher.clone();
        let engine = RulesEngine::new()
            .with_templates(&TemplateOverrides {
                brief: Some("Checking shell output".into()),
                detail_fail: Some(
                    "Observed output '{0}' does not match expected output '{1}'".into(),
                ),
                detail_error: Some("Unable to check output: '{0}'".into()),
                detail_pass: Some("Observed output '{0}' matches expected output '{1}'".into()),
            })
            .with_rule(move |doc: &Document| {
                Ok(rule_matcher.is_match(doc.str_at("/data/stdout")?))
            });

        Ok(Self { matcher, engine })
    }

    fn check_host(&self, doc: &Document) -> CheckResult {
        let stdout = doc.str_at("/data/stdout").unwrap_or_default();
        self.engine
            .check_with_args(doc, &[Arg::from(stdout), Arg::from(self.matcher.as_str())])
    }

    fn check_remote(&self, doc: &Document) -> CheckResult {
        let reporting = self.engine.reporting();
        let hosts = match doc.per_host("shell_command") {
            Ok(hosts) => hosts,
            Err(e) => return reporting.render(doc, &[], Outcome::Error(e.to_string())),
        };
        if hosts.is_empty() {
            return reporting.render(doc, &[], Outcome::Error("no hosts in document".into()));
        }

        let mut parent =
            CheckResult::from_document(doc).with_brief(reporting.templates.brief.as_str());
        for host in &hosts {
            let child = self.check_host(host);
            parent.system_id.extend(child.system_id.iter().cloned());
            parent.add_child(child);
        }
        parent.propagate();

        let matched = parent
            .children
            .iter()
            .filter(|c| c.issue == Issue::No)
            .count();
        parent.detail = template::format(
            "{0} of {1} hosts match expected output '{2}'",
            &[
                Arg::from(matched),
                Arg::from(hosts.len()),
                Arg::from(self.matcher.as_str()),
            ],
        );
        parent
    }
}

impl Configure for ShellOutput {
    fn reporting_mut(&mut self) -> &mut Reporting {
        self.engine.reporting_mut()
    }
}

impl Check for ShellOutput {
    fn name(&self) -> &str {
        "misc/shell_output"
    }

    fn accepts(&self, kind: &DocumentKind) -> bool {
        matches!(
            kind,
            DocumentKind::ShellCommand | DocumentKind::RemoteShellCommand
        )
    }

    fn check(&self, doc: &Document) -> CheckResult {
        match doc.kind() {
            DocumentKind::ShellCommand => self.check_host(doc),
            DocumentKind::RemoteShellCommand => self.check_remote(doc),
            _ => self.engine.reporting().render(
                doc,
                &[],
                Outcome::Error(RuleError::unsupported(doc.name()).to_string()),
            ),
        }
    }
}
