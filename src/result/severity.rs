//! Verdict and severity scales.
//!
//! - [`Issue`] - tri-state verdict (No < Maybe < Yes)
//! - [`Priority`] - RFC 5424 severity (Debug < ... < Emergency)

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a check detected a problem.
///
/// Ordered by seriousness: `No < Maybe < Yes`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Issue {
    /// No problem was detected.
    #[default]
    #[serde(alias = "no")]
    No,
    /// The check could not be evaluated.
    #[serde(alias = "maybe")]
    Maybe,
    /// A problem was detected.
    #[serde(alias = "yes")]
    Yes,
}

impl Issue {
    /// All verdicts, least serious first.
    pub const ALL: [Issue; 3] = [Issue::No, Issue::Maybe, Issue::Yes];

    /// Upper-case name used in serialized results.
    pub fn as_str(&self) -> &'static str {
        match self {
            Issue::No => "NO",
            Issue::Maybe => "MAYBE",
            Issue::Yes => "YES",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Issue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Issue::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown issue '{}'", s))
    }
}

/// Severity of a result.
///
/// Ordered by seriousness: `Debug < Info < ... < Emergency`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Debug-level messages.
    #[default]
    #[serde(alias = "debug")]
    Debug,
    /// Informational messages.
    #[serde(alias = "info")]
    Info,
    /// Normal but significant condition.
    #[serde(alias = "notice")]
    Notice,
    /// Warning conditions.
    #[serde(alias = "warning")]
    Warning,
    /// Error conditions.
    #[serde(alias = "error")]
    Error,
    /// Critical conditions.
    #[serde(alias = "critical")]
    Critical,
    /// Action must be taken immediately.
    #[serde(alias = "alert")]
    Alert,
    /// System is unusable.
    #[serde(alias = "emergency")]
    Emergency,
}

impl Priority {
    /// All priorities, least severe first.
    pub const ALL: [Priority; 8] = [
        Priority::Debug,
        Priority::Info,
        Priority::Notice,
        Priority::Warning,
        Priority::Error,
        Priority::Critical,
        Priority::Alert,
        Priority::Emergency,
    ];

    /// Upper-case name used in serialized results.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Debug => "DEBUG",
            Priority::Info => "INFO",
            Priority::Notice => "NOTICE",
            Priority::Warning => "WARNING",
            Priority::Error => "ERROR",
            Priority::Critical => "CRITICAL",
            Priority::Alert => "ALERT",
            Priority::Emergency => "EMERGENCY",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown priority '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_ordering() {
        assert!(Issue::No < Issue::Maybe);
        assert!(Issue::Maybe < Issue::Yes);
    }

    #[test]
    fn priority_ordering() {
        assert!(Priority::Debug < Priority::Info);
        assert!(Priority::Info < Priority::Notice);
        assert!(Priority::Notice < Priority::Warning);
        assert!(Priority::Warning < Priority::Error);
        assert!(Priority::Error < Priority::Critical);
        assert!(Priority::Critical < Priority::Alert);
        assert!(Priority::Alert < Priority::Emergency);
    }

    #[test]
    fn display_uses_upper_case_names() {
        assert_eq!(Issue::Maybe.to_string(), "MAYBE");
        assert_eq!(Priority::Emergency.to_string(), "EMERGENCY");
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("yes".parse::<Issue>().unwrap(), Issue::Yes);
        assert_eq!("Warning".parse::<Priority>().unwrap(), Priority::Warning);
        assert!("sometimes".parse::<Issue>().is_err());
        assert!("loud".parse::<Priority>().is_err());
    }

    #[test]
    fn serializes_as_names() {
        assert_eq!(serde_json::to_string(&Issue::Yes).unwrap(), r#""YES""#);
        assert_eq!(
            serde_json::to_string(&Priority::Notice).unwrap(),
            r#""NOTICE""#
        );
    }

    #[test]
    fn deserializes_lower_case_aliases() {
        let p: Priority = serde_json::from_str(r#""error""#).unwrap();
        assert_eq!(p, Priority::Error);
        let i: Issue = serde_json::from_str(r#""maybe""#).unwrap();
        assert_eq!(i, Issue::Maybe);
    }
}
