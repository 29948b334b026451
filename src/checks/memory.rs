//! Physical memory size check.

use super::reporting::{Configure, Outcome, Reporting};
use super::Check;
use crate::document::{Document, DocumentKind};
use crate::error::RuleError;
use crate::result::CheckResult;
use crate::template::{Arg, Templates};

/// Minimum physical memory, in bytes, with an optional tolerance.
///
/// The host passes when `physical + tolerance >= size`.
///
/// | Document  | Physical memory                       |
/// |-----------|---------------------------------------|
/// | `sysconf` | `phys_pages * page_size`              |
/// | `sysctl`  | `hw/memsize`                          |
/// | `sysinfo` | `totalram * mem_unit`                 |
///
/// Template arguments: details `[physical, size, tolerance, "bytes"]`.
#[derive(Debug, Clone)]
pub struct PhysicalSize {
    size: u64,
    tolerance: u64,
    reporting: Reporting,
}

impl PhysicalSize {
    pub fn new(size: u64) -> Self {
        Self {
            size,
            tolerance: 0,
            reporting: Reporting::new(Templates::new(
                "Checking physical memory size",
                "Observed memory size of {0} {3} is less than {1} {3} (tolerance {2} {3})",
                "Unable to check memory size: '{0}'",
                "Observed memory size of {0} {3} is at least {1} {3} (tolerance {2} {3})",
            )),
        }
    }

    /// Allow the observed size to fall short by up to `tolerance` bytes.
    pub fn with_tolerance(mut self, tolerance: u64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Physical memory in bytes, normalized across document shapes.
    pub fn physical(doc: &Document) -> Result<u64, RuleError> {
        let product = |a: &str, b: &str| -> Result<u64, RuleError> {
            doc.u64_at(a)?
                .checked_mul(doc.u64_at(b)?)
                .ok_or_else(|| RuleError::new("memory size overflows"))
        };

        match doc.kind() {
            DocumentKind::Sysconf => product("/data/phys_pages", "/data/page_size"),
            DocumentKind::Sysctl => doc.u64_at("/data/hw/memsize"),
            DocumentKind::Sysinfo => product("/data/totalram", "/data/mem_unit"),
            _ => Err(RuleError::unsupported(doc.name())),
        }
    }
}

impl Configure for PhysicalSize {
    fn reporting_mut(&mut self) -> &mut Reporting {
        &mut self.reporting
    }
}

impl Check for PhysicalSize {
    fn name(&self) -> &str {
        "memory/physical_size"
    }

    fn accepts(&self, kind: &DocumentKind) -> bool {
        matches!(
            kind,
            DocumentKind::Sysconf | DocumentKind::Sysctl | DocumentKind::Sysinfo
        )
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let outcome = match Self::physical(doc) {
            Ok(physical) => Outcome::from_bool(
                physical.saturating_add(self.tolerance) >= self.size,
                vec![
                    Arg::from(physical),
                    Arg::from(self.size),
                    Arg::from(self.tolerance),
                    Arg::from("bytes"),
                ],
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

    const EIGHT_GIB: u64 = 8589934592;

    fn sysconf() -> Document {
        Document::new(
            "sysconf",
            json!({"nprocessors_onln": 4, "page_size": 4096, "phys_pages": 2097152}),
        )
    }

    fn sysctl() -> Document {
        Document::new("sysctl", json!({"hw": {"memsize": EIGHT_GIB}}))
    }

    fn sysinfo() -> Document {
        Document::new("sysinfo", json!({"totalram": 8388608, "mem_unit": 1024}))
    }

    #[test]
    fn normalizes_every_shape() {
        for doc in [sysconf(), sysctl(), sysinfo()] {
            assert_eq!(PhysicalSize::physical(&doc).unwrap(), EIGHT_GIB);
        }
    }

    #[test]
    fn exact_size_passes() {
        let r = PhysicalSize::new(EIGHT_GIB).check(&sysconf());
        assert_eq!(r.issue, Issue::No);
        assert_eq!(
            r.detail,
            "Observed memory size of 8589934592 bytes is at least 8589934592 bytes (tolerance 0 bytes)"
        );
    }

    #[test]
    fn larger_memory_passes() {
        let r = PhysicalSize::new(EIGHT_GIB / 2).check(&sysctl());
        assert_eq!(r.issue, Issue::No);
    }

    #[test]
    fn smaller_memory_fails() {
        let r = PhysicalSize::new(EIGHT_GIB * 2).check(&sysinfo());
        assert_eq!(r.issue, Issue::Yes);
    }

    #[test]
    fn tolerance_lowers_the_floor() {
        let check = PhysicalSize::new(EIGHT_GIB + 1024).with_tolerance(1024);
        assert_eq!(check.check(&sysconf()).issue, Issue::No);

        let check = PhysicalSize::new(EIGHT_GIB + 1025).with_tolerance(1024);
        assert_eq!(check.check(&sysconf()).issue, Issue::Yes);
    }

    #[test]
    fn missing_field_is_maybe() {
        let doc = Document::new("sysctl", json!({"hw": {}}));
        let r = PhysicalSize::new(1).check(&doc);
        assert_eq!(r.issue, Issue::Maybe);
        assert_eq!(r.detail, "Unable to check memory size: 'key '/data/hw/memsize' not found'");
    }

    #[test]
    fn unsupported_document_is_maybe() {
        let doc = Document::new("getloadavg", json!({}));
        assert_eq!(PhysicalSize::new(1).check(&doc).issue, Issue::Maybe);
    }
}
