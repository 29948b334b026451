//! hostcheck - Evaluate host measurements against configurable checks.
//!
//! Host facts arrive as JSON *documents* (the output of `sysconf`,
//! `getfsstat`, `stat`, a shell command...). Checks read those documents and
//! produce a tree of [`result::CheckResult`] verdicts that say whether a
//! problem was found (`NO`, `YES` or `MAYBE`), how severe it is, and why.
//!
//! # Modules
//!
//! - [`checks`] - The check contract, built-in checks and the rules engine
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Battery file loading and validation
//! - [`data`] - Data sources that produce documents on this host
//! - [`document`] - The document model checks consume
//! - [`error`] - Error types and result aliases
//! - [`render`] - Human and JSON output of result trees
//! - [`result`] - Hierarchical check results and severities
//! - [`template`] - Positional message templates
//!
//! # Example
//!
//! ```
//! use hostcheck::checks::{Check, CoreCount};
//! use hostcheck::document::Document;
//! use hostcheck::result::{Issue, Priority};
//! use serde_json::json;
//!
//! let doc = Document::new("sysconf", json!({"nprocessors_onln": 4}));
//!
//! let result = CoreCount::new(4).check(&doc);
//! assert_eq!(result.issue, Issue::No);
//! assert_eq!(result.priority, Priority::Info);
//!
//! let result = CoreCount::new(8).check(&doc);
//! assert_eq!(result.issue, Issue::Yes);
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod data;
pub mod document;
pub mod error;
pub mod render;
pub mod result;
pub mod template;

pub use error::{HostcheckError, Result};
