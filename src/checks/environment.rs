//! Environment variable check.

use serde_json::Value;

use super::matcher::Matcher;
use super::reporting::{Configure, Outcome, Reporting};
use super::Check;
use crate::document::{Document, DocumentKind};
use crate::error::{Result, RuleError};
use crate::result::CheckResult;
use crate::template::{Arg, Templates};

/// Expected value of one variable in an `environment` document.
///
/// An unset variable yields `MAYBE`.
///
/// Template arguments: brief `[variable]`, details
/// `[value, expected, variable]`.
#[derive(Debug, Clone)]
pub struct Environment {
    variable: String,
    matcher: Matcher,
    reporting: Reporting,
}

impl Environment {
    /// Expect `variable` to equal `value`, or to match it when `regex` is set.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` when `regex` is set and `value` does not compile.
    pub fn new(variable: impl Into<String>, value: &str, regex: bool) -> Result<Self> {
        Ok(Self {
            variable: variable.into(),
            matcher: Matcher::new(value, regex)?,
            reporting: Reporting::new(Templates::new(
                "Checking environment variable '{0}'",
                "Value '{0}' does not match '{1}'",
                "Unable to check environment variable: '{0}'",
                "Value '{0}' matches '{1}'",
            )),
        })
    }

    /// Value of the configured variable.
    pub fn value<'a>(&self, doc: &'a Document) -> std::result::Result<&'a str, RuleError> {
        if doc.kind() != DocumentKind::Environment {
            return Err(RuleError::unsupported(doc.name()));
        }
        match doc.data().and_then(|data| data.get(&self.variable)) {
            Some(Value::String(value)) => Ok(value),
            Some(_) => Err(RuleError::new(format!(
                "variable '{}' is not a string",
                self.variable
            ))),
            None => Err(RuleError::new(format!(
                "variable '{}' is not set",
                self.variable
            ))),
        }
    }
}

impl Configure for Environment {
    fn reporting_mut(&mut self) -> &mut Reporting {
        &mut self.reporting
    }
}

impl Check for Environment {
    fn name(&self) -> &str {
        "misc/environment"
    }

    fn accepts(&self, kind: &DocumentKind) -> bool {
        *kind == DocumentKind::Environment
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let outcome = match self.value(doc) {
            Ok(value) => Outcome::from_bool(
                self.matcher.is_match(value),
                vec![
                    Arg::from(value),
                    Arg::from(self.matcher.as_str()),
                    Arg::from(&self.variable),
                ],
            ),
            Err(e) => Outcome::Error(e.to_string()),
        };
        self.reporting
            .render(doc, &[Arg::from(&self.variable)], outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostcheckError;
    use crate::result::Issue;
    use crate::template::TemplateOverrides;
    use serde_json::json;

    fn environment() -> Document {
        Document::from_value(json!({
            "name": "environment",
            "hostname": "localhost.local",
            "timestamp": 1565739923,
            "data": {"FOO": "bar", "PATH": "/usr/local/bin:/usr/bin:/bin"}
        }))
        .unwrap()
    }

    #[test]
    fn exact_match_passes() {
        let r = Environment::new("FOO", "bar", false)
            .unwrap()
            .check(&environment());
        assert_eq!(r.issue, Issue::No);
        assert_eq!(r.brief, "Checking environment variable 'FOO'");
        assert_eq!(r.detail, "Value 'bar' matches 'bar'");
    }

    #[test]
    fn exact_mismatch_fails() {
        let r = Environment::new("FOO", "baz", false)
            .unwrap()
            .check(&environment());
        assert_eq!(r.issue, Issue::Yes);
        assert_eq!(r.detail, "Value 'bar' does not match 'baz'");
    }

    #[test]
    fn regex_searches_value() {
        let check = Environment::new("PATH", "/usr/local/bin", true).unwrap();
        assert_eq!(check.check(&environment()).issue, Issue::No);

        let check = Environment::new("PATH", "^/opt", true).unwrap();
        assert_eq!(check.check(&environment()).issue, Issue::Yes);
    }

    #[test]
    fn unset_variable_is_maybe() {
        let r = Environment::new("MISSING", "x", false)
            .unwrap()
            .check(&environment());
        assert_eq!(r.issue, Issue::Maybe);
        assert_eq!(
            r.detail,
            "Unable to check environment variable: 'variable 'MISSING' is not set'"
        );
    }

    #[test]
    fn other_documents_are_maybe() {
        let doc = Document::new("sysconf", json!({"FOO": "bar"}));
        let check = Environment::new("FOO", "bar", false).unwrap();
        assert_eq!(check.check(&doc).issue, Issue::Maybe);
    }

    #[test]
    fn bad_pattern_fails_construction() {
        let err = Environment::new("FOO", "[", true).unwrap_err();
        assert!(matches!(err, HostcheckError::InvalidPattern { .. }));
    }

    #[test]
    fn variable_is_third_detail_argument() {
        let check = Environment::new("FOO", "bar", false)
            .unwrap()
            .with_templates(&TemplateOverrides {
                detail_pass: Some("{2}={0}".into()),
                ..Default::default()
            });
        assert_eq!(check.check(&environment()).detail, "FOO=bar");
    }
}
