//! Free disk space checks.
//!
//! Both checks locate a filesystem by mount point in a `getfsstat`
//! (`mntonname`) or `getmntent` (`dir`) document. Each entry of
//! `/data/file_systems` carries `bavail`, `blocks` and `bsize`.

use serde_json::Value;

use super::reporting::{Configure, Outcome, Reporting};
use super::Check;
use crate::document::{Document, DocumentKind};
use crate::error::RuleError;
use crate::result::CheckResult;
use crate::template::{Arg, Templates};

/// Mount-point key of a filesystem entry, per document shape.
fn mount_key(kind: &DocumentKind) -> Option<&'static str> {
    match kind {
        DocumentKind::Getfsstat => Some("mntonname"),
        DocumentKind::Getmntent => Some("dir"),
        _ => None,
    }
}

fn accepts_filesystems(kind: &DocumentKind) -> bool {
    mount_key(kind).is_some()
}

/// JSON pointer to the entry mounted at `filesystem`.
fn locate(doc: &Document, filesystem: &str) -> Result<String, RuleError> {
    let key = mount_key(&doc.kind()).ok_or_else(|| RuleError::unsupported(doc.name()))?;
    let entries = doc
        .value_at("/data/file_systems")?
        .as_array()
        .ok_or_else(|| RuleError::wrong_type("/data/file_systems", "an array"))?;

    entries
        .iter()
        .position(|entry| entry.get(key).and_then(Value::as_str) == Some(filesystem))
        .map(|i| format!("/data/file_systems/{}", i))
        .ok_or_else(|| RuleError::new(format!("filesystem '{}' not found", filesystem)))
}

/// Minimum amount of free space on a filesystem, in bytes.
///
/// Template arguments: brief `[filesystem]`, details
/// `[filesystem, available, threshold, "bytes"]`.
#[derive(Debug, Clone)]
pub struct AmountFree {
    filesystem: String,
    amount: u64,
    reporting: Reporting,
}

impl AmountFree {
    pub fn new(filesystem: impl Into<String>, amount: u64) -> Self {
        Self {
            filesystem: filesystem.into(),
            amount,
            reporting: Reporting::new(Templates::new(
                "Checking amount of free disk space on filesystem '{0}'",
                "Observed amount of free disk space {1} {3} is less than reference threshold value {2} {3}",
                "Unable to check amount of free disk space: '{0}'",
                "Observed amount of free disk space {1} {3} is greater than or equal to the reference threshold value {2} {3}",
            )),
        }
    }

    /// Available bytes (`bavail * bsize`) on the configured filesystem.
    pub fn available(&self, doc: &Document) -> Result<u64, RuleError> {
        let entry = locate(doc, &self.filesystem)?;
        let bavail = doc.u64_at(&format!("{}/bavail", entry))?;
        let bsize = doc.u64_at(&format!("{}/bsize", entry))?;
        bavail
            .checked_mul(bsize)
            .ok_or_else(|| RuleError::new("available space overflows"))
    }
}

impl Configure for AmountFree {
    fn reporting_mut(&mut self) -> &mut Reporting {
        &mut self.reporting
    }
}

impl Check for AmountFree {
    fn name(&self) -> &str {
        "disk/amount_free"
    }

    fn accepts(&self, kind: &DocumentKind) -> bool {
        accepts_filesystems(kind)
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let outcome = match self.available(doc) {
            Ok(available) => Outcome::from_bool(
                available >= self.amount,
                vec![
                    Arg::from(&self.filesystem),
                    Arg::from(available),
                    Arg::from(self.amount),
                    Arg::from("bytes"),
                ],
            ),
            Err(e) => Outcome::Error(e.to_string()),
        };
        self.reporting
            .render(doc, &[Arg::from(&self.filesystem)], outcome)
    }
}

/// Minimum percentage of free blocks on a filesystem.
///
/// Template arguments: brief `[filesystem]`, details
/// `[filesystem, percent_free, threshold]`.
#[derive(Debug, Clone)]
pub struct PercentFree {
    filesystem: String,
    percent: f64,
    reporting: Reporting,
}

impl PercentFree {
    pub fn new(filesystem: impl Into<String>, percent: f64) -> Self {
        Self {
            filesystem: filesystem.into(),
            percent,
            reporting: Reporting::new(Templates::new(
                "Checking percent free disk space of filesystem '{0}'",
                "Observed percent free disk space {1:.2f}% is less than reference threshold value {2:.2f}%",
                "Unable to check percent free disk space: '{0}'",
                "Observed percent free disk space {1:.2f}% is greater than or equal to the reference threshold value {2:.2f}%",
            )),
        }
    }

    /// Percentage of blocks available (`100 * bavail / blocks`).
    pub fn percent_free(&self, doc: &Document) -> Result<f64, RuleError> {
        let entry = locate(doc, &self.filesystem)?;
        let bavail = doc.f64_at(&format!("{}/bavail", entry))?;
        let blocks = doc.f64_at(&format!("{}/blocks", entry))?;
        if blocks == 0.0 {
            return Err(RuleError::new(format!(
                "filesystem '{}' reports zero blocks",
                self.filesystem
            )));
        }
        Ok(100.0 * bavail / blocks)
    }
}

impl Configure for PercentFree {
    fn reporting_mut(&mut self) -> &mut Reporting {
        &mut self.reporting
    }
}

impl Check for PercentFree {
    fn name(&self) -> &str {
        "disk/percent_free"
    }

    fn accepts(&self, kind: &DocumentKind) -> bool {
        accepts_filesystems(kind)
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let outcome = match self.percent_free(doc) {
            Ok(percent) => Outcome::from_bool(
                percent >= self.percent,
                vec![
                    Arg::from(&self.filesystem),
                    Arg::from(percent),
                    Arg::from(self.percent),
                ],
            ),
            Err(e) => Outcome::Error(e.to_string()),
        };
        self.reporting
            .render(doc, &[Arg::from(&self.filesystem)], outcome)
    }
}
