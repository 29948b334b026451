//! File status source.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use super::{envelope, not_evaluated, DataSource};
use crate::document::Document;
use crate::error::{HostcheckError, Result};

/// Status of one file as a `stat` document.
///
/// Only available on unix, where the full mode bits are exposed.
#[derive(Debug)]
pub struct StatSource {
    path: PathBuf,
    captured: Option<(Value, DateTime<Utc>)>,
}

impl StatSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            captured: None,
        }
    }
}

impl DataSource for StatSource {
    fn name(&self) -> &str {
        "stat"
    }

    fn enabled(&self) -> bool {
        cfg!(unix)
    }

    fn evaluate(&mut self) -> Result<()> {
        if self.captured.is_some() {
            return Ok(());
        }
        let data = stat(&self.path).map_err(|e| HostcheckError::DataUnavailable {
            source_name: self.name().to_string(),
            message: format!("{}: {}", self.path.display(), e),
        })?;
        self.captured = Some((data, Utc::now()));
        Ok(())
    }

    fn to_document(&self) -> Result<Document> {
        let (data, timestamp) = self
            .captured
            .as_ref()
            .ok_or_else(|| not_evaluated(self.name()))?;
        Ok(envelope(self.name(), data.clone(), *timestamp))
    }
}

#[cfg(unix)]
fn stat(path: &std::path::Path) -> std::io::Result<Value> {
    use std::os::unix::fs::MetadataExt;

    let meta = std::fs::metadata(path)?;
    Ok(json!({
        "path": path.to_string_lossy(),
        "mode": meta.mode(),
        "uid": meta.uid(),
        "gid": meta.gid(),
        "size": meta.size(),
        "nlink": meta.nlink(),
        "ino": meta.ino(),
        "dev": meta.dev(),
        "atime": meta.atime(),
        "mtime": meta.mtime(),
        "ctime": meta.ctime(),
    }))
}

#[cfg(not(unix))]
fn stat(_path: &std::path::Path) -> std::io::Result<Value> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "file mode is not available on this platform",
    ))
}
