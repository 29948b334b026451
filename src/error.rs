//! Error types for hostcheck operations.
//!
//! This module defines [`HostcheckError`], the error type returned by the
//! fallible parts of the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A check never returns an error for data it does not understand; that
//!   outcome is a [`Issue::Maybe`](crate::result::Issue::Maybe) verdict.
//! - `HostcheckError` is reserved for contract violations (input that is not
//!   a document at all), collaborator failures, and configuration problems.
//! - Use `anyhow::Error` (via `HostcheckError::Other`) for unexpected errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for hostcheck operations.
#[derive(Debug, Error)]
pub enum HostcheckError {
    /// Input handed to a check is not a structured document.
    #[error("Invalid document: expected a JSON object, found {found}")]
    InvalidDocument { found: String },

    /// Document has no string `name` field to dispatch on.
    #[error("Document is missing the 'name' field")]
    MissingName,

    /// A data source could not produce a document on this host.
    #[error("Data source '{source_name}' unavailable: {message}")]
    DataUnavailable {
        source_name: String,
        message: String,
    },

    /// A check was configured with a regular expression that does not compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Battery file not found at the expected location.
    #[error("Battery not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a battery file.
    #[error("Failed to parse battery at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Battery parsed but contains invalid values.
    #[error("Invalid battery: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error wrapper.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for hostcheck operations.
pub type Result<T> = std::result::Result<T, HostcheckError>;

/// Reason a rule or field extraction could not be applied to a document.
///
/// Never surfaced as a hard failure: checks turn it into a MAYBE verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RuleError(pub String);

impl RuleError {
    /// Create a rule error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// A JSON pointer that does not resolve in the document.
    pub fn missing(path: &str) -> Self {
        Self(format!("key '{}' not found", path))
    }

    /// A document shape the check does not decode.
    pub fn unsupported(name: &str) -> Self {
        Self(format!("unsupported document '{}'", name))
    }

    /// A value present at `path` but not of the `expected` type.
    pub fn wrong_type(path: &str, expected: &str) -> Self {
        Self(format!("value at '{}' is not {}", path, expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_document_displays_found_type() {
        let err = HostcheckError::InvalidDocument {
            found: "array".into(),
        };
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn missing_name_mentions_field() {
        assert!(HostcheckError::MissingName.to_string().contains("'name'"));
    }

    #[test]
    fn data_unavailable_displays_source_and_message() {
        let err = HostcheckError::DataUnavailable {
            source_name: "stat".into(),
            message: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("stat"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn invalid_pattern_displays_pattern() {
        let err = HostcheckError::InvalidPattern {
            pattern: "(unclosed".into(),
            message: "unclosed group".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("(unclosed"));
        assert!(msg.contains("unclosed group"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = HostcheckError::ConfigParseError {
            path: PathBuf::from("/etc/hostcheck/battery.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/hostcheck/battery.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: HostcheckError = io_err.into();
        assert!(matches!(err, HostcheckError::Io(_)));
    }

    #[test]
    fn json_error_converts_from_serde() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: HostcheckError = json_err.into();
        assert!(matches!(err, HostcheckError::Json(_)));
    }

    #[test]
    fn rule_error_helpers_describe_path() {
        assert_eq!(
            RuleError::missing("/data/stdout").to_string(),
            "key '/data/stdout' not found"
        );
        assert_eq!(
            RuleError::wrong_type("/data/mode", "an unsigned integer").to_string(),
            "value at '/data/mode' is not an unsigned integer"
        );
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(HostcheckError::MissingName)
        }
        assert!(returns_error().is_err());
    }
}
