//! Load average check.
//!
//! Built on [`Compare`]: the load for the selected window is normalized per
//! document shape and then compared against the threshold with `<=`.
//!
//! | Document     | Load                                           |
//! |--------------|------------------------------------------------|
//! | `getloadavg` | `load{m}` as a float                           |
//! | `sysctl`     | `vm/loadavg/load{m} / vm/loadavg/fscale`       |
//! | `sysinfo`    | `load{m} / loads_scale`                        |

use std::fmt;

use serde::{Deserialize, Serialize};

use super::compare::Compare;
use super::reporting::{Configure, Reporting};
use super::Check;
use crate::document::{Document, DocumentKind};
use crate::error::RuleError;
use crate::result::CheckResult;
use crate::template::{Arg, Templates};

/// Averaging window of a load average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Window {
    One,
    Five,
    Fifteen,
}

impl Window {
    /// Length of the window in minutes.
    pub fn minutes(&self) -> u8 {
        match self {
            Window::One => 1,
            Window::Five => 5,
            Window::Fifteen => 15,
        }
    }
}

impl TryFrom<u8> for Window {
    type Error = String;

    fn try_from(minutes: u8) -> Result<Self, Self::Error> {
        match minutes {
            1 => Ok(Window::One),
            5 => Ok(Window::Five),
            15 => Ok(Window::Fifteen),
            other => Err(format!(
                "load average window must be 1, 5 or 15 minutes, not {}",
                other
            )),
        }
    }
}

impl From<Window> for u8 {
    fn from(window: Window) -> Self {
        window.minutes()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

/// Maximum load average over a window.
///
/// Template arguments: brief `[minutes]`, details `[load, threshold]`.
#[derive(Debug)]
pub struct LoadAverage {
    window: Window,
    compare: Compare<f64>,
}

impl LoadAverage {
    pub fn new(load: f64, window: Window) -> Self {
        let compare = Compare::new(
            &format!("/data/load{}", window.minutes()),
            load,
            |observed: &f64, threshold: &f64| observed <= threshold,
        )
        .with_default_templates(Templates::new(
            "Checking {0} minute load average",
            "Observed load average {0:.2f} greater than reference threshold {1:.2f}",
            "Unable to check load average: '{0}'",
            "Observed load average {0:.2f} less than or equal to reference threshold {1:.2f}",
        ))
        .with_brief_args(vec![Arg::from(window.minutes())]);

        Self { window, compare }
    }

    /// The averaging window.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Load average for the configured window, normalized to a float.
    pub fn load(&self, doc: &Document) -> Result<f64, RuleError> {
        let m = self.window.minutes();
        match doc.kind() {
            DocumentKind::Getloadavg => doc.f64_at(&format!("/data/load{}", m)),
            DocumentKind::Sysctl => scaled(
                doc.f64_at(&format!("/data/vm/loadavg/load{}", m))?,
                doc.f64_at("/data/vm/loadavg/fscale")?,
            ),
            DocumentKind::Sysinfo => scaled(
                doc.f64_at(&format!("/data/load{}", m))?,
                doc.f64_at("/data/loads_scale")?,
            ),
            _ => Err(RuleError::unsupported(doc.name())),
        }
    }
}

fn scaled(raw: f64, scale: f64) -> Result<f64, RuleError> {
    if scale == 0.0 {
        return Err(RuleError::new("load average scale is zero"));
    }
    Ok(raw / scale)
}

impl Configure for LoadAverage {
    fn reporting_mut(&mut self) -> &mut Reporting {
        self.compare.reporting_mut()
    }
}

impl Check for LoadAverage {
    fn name(&self) -> &str {
        "misc/load_average"
    }

    fn accepts(&self, kind: &DocumentKind) -> bool {
        matches!(
            kind,
            DocumentKind::Getloadavg | DocumentKind::Sysctl | DocumentKind::Sysinfo
        )
    }

    fn check(&self, doc: &Document) -> CheckResult {
        self.compare.judge(doc, self.load(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Issue;
    use crate::template::TemplateOverrides;
    use serde_json::json;

    fn getloadavg() -> Document {
        Document::new("getloadavg", json!({"load1": 2.0, "load5": 2.1, "load15": 2.2}))
    }

    fn sysinfo() -> Document {
        Document::new(
            "sysinfo",
            json!({"load1": 80672, "load5": 87520, "load15": 101664, "loads_scale": 65536}),
        )
    }

    fn sysctl() -> Document {
        Document::new(
            "sysctl",
            json!({"vm": {"loadavg": {"fscale": 2048, "load1": 3010, "load5": 3225, "load15": 3063}}}),
        )
    }

    fn custom() -> TemplateOverrides {
        TemplateOverrides {
            brief: Some("Brief {0}".into()),
            detail_fail: Some("{0:.4f} > {1}".into()),
            detail_error: Some(":shrug:".into()),
            detail_pass: Some("{0:.4f} <= {1}".into()),
        }
    }

    #[test]
    fn getloadavg_threshold_is_a_ceiling() {
        let doc = getloadavg();
        assert_eq!(LoadAverage::new(2.0, Window::One).check(&doc).issue, Issue::No);
        assert_eq!(LoadAverage::new(2.0, Window::Five).check(&doc).issue, Issue::Yes);

        let r = LoadAverage::new(2.1234, Window::Fifteen)
            .with_templates(&custom())
            .check(&doc);
        assert_eq!(r.issue, Issue::Yes);
        assert_eq!(r.brief, "Brief 15");
        assert_eq!(r.detail, "2.2000 > 2.1234");
    }

    #[test]
    fn sysinfo_is_scaled() {
        let doc = sysinfo();
        assert_eq!(LoadAverage::new(1.0, Window::One).check(&doc).issue, Issue::Yes);
        assert_eq!(LoadAverage::new(2.0, Window::Five).check(&doc).issue, Issue::No);

        let r = LoadAverage::new(1.5678, Window::Fifteen)
            .with_templates(&custom())
            .check(&doc);
        assert_eq!(r.issue, Issue::No);
        assert_eq!(r.detail, "1.5513 <= 1.5678");
    }

    #[test]
    fn sysctl_is_scaled() {
        let doc = sysctl();
        assert_eq!(LoadAverage::new(1.0, Window::One).check(&doc).issue, Issue::Yes);
        assert_eq!(LoadAverage::new(2.0, Window::Five).check(&doc).issue, Issue::No);

        let r = LoadAverage::new(1.1234, Window::Fifteen)
            .with_templates(&custom())
            .check(&doc);
        assert_eq!(r.issue, Issue::Yes);
        assert_eq!(r.detail, "1.4956 > 1.1234");
    }

    #[test]
    fn default_templates() {
        let doc = Document::from_value(json!({
            "name": "getloadavg",
            "hostname": "localhost.local",
            "timestamp": 1528948131,
            "data": {"load1": 1.5361328125, "load5": 1.48095703125, "load15": 1.74267578125}
        }))
        .unwrap();
        let r = LoadAverage::new(1.0, Window::One).check(&doc);
        assert_eq!(r.issue, Issue::Yes);
        assert_eq!(r.brief, "Checking 1 minute load average");
        assert_eq!(
            r.detail,
            "Observed load average 1.54 greater than reference threshold 1.00"
        );
        assert_eq!(r.system_id, vec!["localhost.local".to_string()]);
        assert_eq!(r.timestamp.timestamp(), 1528948131);
    }

    #[test]
    fn unknown_document_is_maybe() {
        let doc = Document::new("unknown", json!({"load_average": 4}));
        let r = LoadAverage::new(4.0, Window::One).check(&doc);
        assert_eq!(r.issue, Issue::Maybe);
        assert_eq!(
            r.detail,
            "Unable to check load average: 'unsupported document 'unknown''"
        );
    }

    #[test]
    fn zero_scale_is_maybe() {
        let doc = Document::new("sysinfo", json!({"load1": 1, "loads_scale": 0}));
        assert_eq!(LoadAverage::new(1.0, Window::One).check(&doc).issue, Issue::Maybe);
    }

    #[test]
    fn window_from_minutes() {
        assert_eq!(Window::try_from(5).unwrap(), Window::Five);
        assert!(Window::try_from(10).is_err());
        assert_eq!(Window::Fifteen.to_string(), "15");
    }
}
