//! File permission check.

use super::reporting::{Configure, Outcome, Reporting};
use super::Check;
use crate::document::{Document, DocumentKind};
use crate::error::RuleError;
use crate::result::CheckResult;
use crate::template::{Arg, Templates};

/// Permission bits: rwx for user, group and other plus setuid, setgid and sticky.
const MODE_MASK: u32 = 0o7777;

/// Four-digit octal rendering of a mode (e.g. `1777`).
pub fn to_octal(mode: u32) -> String {
    format!("{:04o}", mode)
}

/// Expected permission bits of a file, read from a `stat` document.
///
/// Only the low permission bits of `/data/mode` are compared; the file type
/// bits are ignored.
///
/// Template arguments: brief `[path]`, details
/// `[path, observed_octal, expected_octal]`.
#[derive(Debug, Clone)]
pub struct Permissions {
    mode: u32,
    reporting: Reporting,
}

impl Permissions {
    pub fn new(mode: u32) -> Self {
        Self {
            mode: mode & MODE_MASK,
            reporting: Reporting::new(Templates::new(
                "Checking permissions on '{0}'",
                "Observed permissions of {1} do not match expected {2}",
                "Unable to check permissions: '{0}'",
                "Observed permissions of {1} match expected {2}",
            )),
        }
    }

    /// Permission bits of the file described by `doc`.
    pub fn observed(doc: &Document) -> Result<u32, RuleError> {
        if doc.kind() != DocumentKind::Stat {
            return Err(RuleError::unsupported(doc.name()));
        }
        let mode = doc.u64_at("/data/mode")?;
        Ok((mode & u64::from(MODE_MASK)) as u32)
    }
}

impl Configure for Permissions {
    fn reporting_mut(&mut self) -> &mut Reporting {
        &mut self.reporting
    }
}

impl Check for Permissions {
    fn name(&self) -> &str {
        "file/permissions"
    }

    fn accepts(&self, kind: &DocumentKind) -> bool {
        *kind == DocumentKind::Stat
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let path = doc.str_at("/data/path").unwrap_or_default();
        let outcome = match Self::observed(doc) {
            Ok(mode) => Outcome::from_bool(
                mode == self.mode,
                vec![
                    Arg::from(path),
                    Arg::from(to_octal(mode)),
                    Arg::from(to_octal(self.mode)),
                ],
            ),
            Err(e) => Outcome::Error(e.to_string()),
        };
        self.reporting.render(doc, &[Arg::from(path)], outcome)
    }
}
