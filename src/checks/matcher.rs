//! Exact or regular-expression string matching.

use regex::Regex;

use crate::error::{HostcheckError, Result};

/// How an observed string is compared to an expected one.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Observed must equal the expected string.
    Exact(String),
    /// Observed must contain a match of the pattern.
    Pattern(Regex),
}

impl Matcher {
    /// Build a matcher; `regex` selects pattern matching.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` if `regex` is set and `expected` does not compile.
    pub fn new(expected: &str, regex: bool) -> Result<Self> {
        if !regex {
            return Ok(Matcher::Exact(expected.to_string()));
        }
        Regex::new(expected)
            .map(Matcher::Pattern)
            .map_err(|e| HostcheckError::InvalidPattern {
                pattern: expected.to_string(),
                message: e.to_string(),
            })
    }

    /// Whether `observed` satisfies the matcher.
    pub fn is_match(&self, observed: &str) -> bool {
        match self {
            Matcher::Exact(expected) => observed == expected,
            Matcher::Pattern(re) => re.is_match(observed),
        }
    }

    /// The expected string or pattern source.
    pub fn as_str(&self) -> &str {
        match self {
            Matcher::Exact(expected) => expected,
            Matcher::Pattern(re) => re.as_str(),
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Matcher::Exact(a), Matcher::Exact(b)) => a == b,
            (Matcher::Pattern(a), Matcher::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_requires_equality() {
        let m = Matcher::new("bar", false).unwrap();
        assert!(m.is_match("bar"));
        assert!(!m.is_match("bar\n"));
        assert!(!m.is_match("foobar"));
    }

    #[test]
    fn pattern_searches() {
        let m = Matcher::new("^bar", true).unwrap();
        assert!(m.is_match("bar\n"));
        assert!(!m.is_match("foobar"));

        let anchored = Matcher::new("^bar$", true).unwrap();
        assert!(!anchored.is_match("bar\n"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = Matcher::new("(unclosed", true).unwrap_err();
        assert!(matches!(err, HostcheckError::InvalidPattern { .. }));
    }

    #[test]
    fn as_str_returns_source() {
        assert_eq!(Matcher::new("a.c", true).unwrap().as_str(), "a.c");
        assert_eq!(Matcher::new("abc", false).unwrap().as_str(), "abc");
    }
}
