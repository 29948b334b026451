//! Replay of previously serialized documents.

use std::path::{Path, PathBuf};

use super::{not_evaluated, DataSource};
use crate::document::Document;
use crate::error::{HostcheckError, Result};

/// A document read back from a JSON file.
///
/// Useful to evaluate checks against measurements taken on another host or
/// at another time.
#[derive(Debug)]
pub struct SnapshotSource {
    path: PathBuf,
    document: Option<Document>,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: None,
        }
    }

    /// Source wrapping an already parsed document.
    pub fn from_document(document: Document) -> Self {
        Self {
            path: PathBuf::new(),
            document: Some(document),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for SnapshotSource {
    fn name(&self) -> &str {
        self.document
            .as_ref()
            .map(Document::name)
            .unwrap_or("snapshot")
    }

    fn evaluate(&mut self) -> Result<()> {
        if self.document.is_some() {
            return Ok(());
        }
        let unavailable = |message: String| HostcheckError::DataUnavailable {
            source_name: "snapshot".to_string(),
            message,
        };
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| unavailable(format!("{}: {}", self.path.display(), e)))?;
        let document = Document::parse(&content)
            .map_err(|e| unavailable(format!("{}: {}", self.path.display(), e)))?;
        self.document = Some(document);
        Ok(())
    }

    fn to_document(&self) -> Result<Document> {
        self.document
            .clone()
            .ok_or_else(|| not_evaluated(self.name()))
    }
}
