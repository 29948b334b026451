//! CPU core count check.

use super::reporting::{Configure, Outcome, Reporting};
use super::Check;
use crate::document::{Document, DocumentKind};
use crate::error::RuleError;
use crate::result::CheckResult;
use crate::template::{Arg, Templates};

/// Expected number of CPU cores.
///
/// Reads `nprocessors_onln` from `sysconf` documents and
/// `machdep/cpu/core_count` from `sysctl` documents.
///
/// Template arguments: details `[observed, expected]`.
#[derive(Debug, Clone)]
pub struct CoreCount {
    cores: u64,
    reporting: Reporting,
}

impl CoreCount {
    pub fn new(cores: u64) -> Self {
        Self {
            cores,
            reporting: Reporting::new(Templates::new(
                "Checking number of CPU cores",
                "Observed number of cores {0} not equal to expected value {1}",
                "Unable to check number of cores: '{0}'",
                "Observed number of cores {0} equal to expected value {1}",
            )),
        }
    }

    /// Observed core count.
    pub fn observed(doc: &Document) -> Result<u64, RuleError> {
        match doc.kind() {
            DocumentKind::Sysconf => doc.u64_at("/data/nprocessors_onln"),
            DocumentKind::Sysctl => doc.u64_at("/data/machdep/cpu/core_count"),
            _ => Err(RuleError::unsupported(doc.name())),
        }
    }
}

impl Configure for CoreCount {
    fn reporting_mut(&mut self) -> &mut Reporting {
        &mut self.reporting
    }
}

impl Check for CoreCount {
    fn name(&self) -> &str {
        "cpu/core_count"
    }

    fn accepts(&self, kind: &DocumentKind) -> bool {
        matches!(kind, DocumentKind::Sysconf | DocumentKind::Sysctl)
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let outcome = match Self::observed(doc) {
            Ok(cores) => Outcome::from_bool(
                cores == self.cores,
                vec![Arg::from(cores), Arg::from(self.cores)],
            ),
            Err(e) => Outcome::Error(e.to_string()),
        };
        self.reporting.render(doc, &[], outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Issue;
    use serde_json::json;

    fn sysconf() -> Document {
        Document::from_value(json!({
            "name": "sysconf",
            "hostname": "localhost.local",
            "timestamp": 1528057219,
            "data": {"nprocessors_onln": 4}
        }))
        .unwrap()
    }

    #[test]
    fn matching_count_passes() {
        let r = CoreCount::new(4).check(&sysconf());
        assert_eq!(r.issue, Issue::No);
        assert_eq!(r.brief, "Checking number of CPU cores");
        assert_eq!(r.detail, "Observed number of cores 4 equal to expected value 4");
        assert_eq!(r.system_id, vec!["localhost.local".to_string()]);
    }

    #[test]
    fn different_count_fails() {
        let r = CoreCount::new(8).check(&sysconf());
        assert_eq!(r.issue, Issue::Yes);
        assert_eq!(r.detail, "Observed number of cores 4 not equal to expected value 8");
    }

    #[test]
    fn reads_sysctl() {
        let doc = Document::new("sysctl", json!({"machdep": {"cpu": {"core_count": 2}}}));
        assert_eq!(CoreCount::new(2).check(&doc).issue, Issue::No);
    }

    #[test]
    fn unsupported_document_is_maybe() {
        let doc = Document::new("sysinfo", json!({"procs": 200}));
        let r = CoreCount::new(2).check(&doc);
        assert_eq!(r.issue, Issue::Maybe);
        assert_eq!(
            r.detail,
            "Unable to check number of cores: 'unsupported document 'sysinfo''"
        );
    }
}
