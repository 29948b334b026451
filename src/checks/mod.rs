//! Checks: pure evaluation of documents into results.
//!
//! This module provides:
//!
//! - [`Check`] - The trait every check implements
//! - [`Reporting`] / [`Outcome`] - Shared rendering of verdicts
//! - [`RulesEngine`] - Ad hoc checks built from predicate rules
//! - [`Compare`] - Generic comparison of a document value
//! - The built-in checks for disk, memory, CPU, environment, load,
//!   shell output and file permissions
//! - [`CheckRegistry`] - Runs a battery of checks over many documents
//!
//! # Failure policy
//!
//! A check never fails on data it cannot interpret. Wrong document kinds,
//! missing fields and unknown paths all produce a `MAYBE` result. Only input
//! that is not a document at all is an error, and that is caught when the
//! [`Document`] is built.

pub mod compare;
pub mod cpu;
pub mod disk;
pub mod environment;
pub mod file;
pub mod load_average;
pub mod matcher;
pub mod memory;
pub mod registry;
pub mod reporting;
pub mod rules_engine;
pub mod shell_output;

pub use compare::Compare;
pub use cpu::CoreCount;
pub use disk::{AmountFree, PercentFree};
pub use environment::Environment;
pub use file::Permissions;
pub use load_average::{LoadAverage, Window};
pub use matcher::Matcher;
pub use memory::PhysicalSize;
pub use registry::CheckRegistry;
pub use reporting::{Configure, Outcome, Reporting};
pub use rules_engine::{Evaluation, Rule, RulesEngine};
pub use shell_output::ShellOutput;

use serde_json::Value;

use crate::document::{Document, DocumentKind};
use crate::error::Result;
use crate::result::CheckResult;

/// A reusable, immutable evaluation of documents.
///
/// Implementations must be pure: the same document always yields the same
/// verdict, and one instance may be shared across threads.
pub trait Check: Send + Sync {
    /// Identifier of the check (e.g. `disk/amount_free`).
    fn name(&self) -> &str;

    /// Whether this check decodes documents of `kind`.
    ///
    /// Used by [`CheckRegistry`] to route documents; [`Check::check`]
    /// still returns `MAYBE` for kinds it does not accept.
    fn accepts(&self, _kind: &DocumentKind) -> bool {
        true
    }

    /// Evaluate `doc`.
    fn check(&self, doc: &Document) -> CheckResult;

    /// Validate `value` as a document and evaluate it.
    ///
    /// # Errors
    ///
    /// Fails when `value` is not an object with a string `name`.
    fn check_value(&self, value: &Value) -> Result<CheckResult> {
        let doc = Document::from_value(value.clone())?;
        Ok(self.check(&doc))
    }
}
