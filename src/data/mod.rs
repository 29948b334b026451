//! Data sources.
//!
//! A [`DataSource`] probes the host and produces a [`Document`] for checks to
//! evaluate. Sources are the only part of the crate that performs I/O.
//!
//! - [`EnvironmentSource`] - process environment (`environment`)
//! - [`ShellCommandSource`] - output of a shell command (`shell_command`)
//! - [`StatSource`] - file status (`stat`, unix only)
//! - [`SnapshotSource`] - a previously serialized document

pub mod environment;
pub mod shell_command;
pub mod snapshot;
pub mod stat;

pub use environment::EnvironmentSource;
pub use shell_command::ShellCommandSource;
pub use snapshot::SnapshotSource;
pub use stat::StatSource;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::document::Document;
use crate::error::{HostcheckError, Result};

/// A probe that produces one document.
pub trait DataSource {
    /// Document name this source produces.
    fn name(&self) -> &str;

    /// Whether the source can run on this host.
    fn enabled(&self) -> bool {
        true
    }

    /// Take the measurement. Calling again after success is a no-op.
    ///
    /// # Errors
    ///
    /// `DataUnavailable` when the probe cannot run.
    fn evaluate(&mut self) -> Result<()>;

    /// The measurement as a document.
    ///
    /// # Errors
    ///
    /// `DataUnavailable` before a successful [`DataSource::evaluate`].
    fn to_document(&self) -> Result<Document>;
}

/// Evaluate `source` and return its document.
///
/// Disabled and failing sources are logged and yield `None`; nothing is
/// propagated, so one broken probe never stops a collection run.
pub fn collect(source: &mut dyn DataSource) -> Option<Document> {
    if !source.enabled() {
        warn!(source = source.name(), "data source disabled on this host");
        return None;
    }

    if let Err(e) = source.evaluate() {
        warn!(source = source.name(), error = %e, "data source failed");
        return None;
    }

    match source.to_document() {
        Ok(doc) => {
            debug!(source = source.name(), "collected document");
            Some(doc)
        }
        Err(e) => {
            warn!(source = source.name(), error = %e, "data source produced no document");
            None
        }
    }
}

/// Wrap `data` in the standard document envelope.
pub(crate) fn envelope(name: &str, data: Value, timestamp: DateTime<Utc>) -> Document {
    let doc = Document::new(name, data)
        .with_hostname(hostname())
        .with_timestamp(timestamp);
    match uid() {
        Some(uid) => doc.with_field("uid", Value::from(uid)),
        None => doc,
    }
}

pub(crate) fn not_evaluated(name: &str) -> HostcheckError {
    HostcheckError::DataUnavailable {
        source_name: name.to_string(),
        message: "not evaluated".to_string(),
    }
}

/// Name of this host, or an empty string if it cannot be determined.
#[cfg(unix)]
pub fn hostname() -> String {
    let mut buf = [0u8; 256];
    // SAFETY: buf is valid for buf.len() bytes and gethostname writes at most that many
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return String::new();
    }
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

/// Name of this host, or an empty string if it cannot be determined.
#[cfg(not(unix))]
pub fn hostname() -> String {
    std::env::var("COMPUTERNAME").unwrap_or_default()
}

/// Real user id of this process.
#[cfg(unix)]
pub fn uid() -> Option<u32> {
    // SAFETY: getuid() cannot fail and has no side effects
    Some(unsafe { libc::getuid() })
}

/// Real user id of this process.
#[cfg(not(unix))]
pub fn uid() -> Option<u32> {
    None
}
