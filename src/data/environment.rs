//! Process environment source.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::{envelope, not_evaluated, DataSource};
use crate::document::Document;
use crate::error::Result;

/// Snapshot of the process environment as an `environment` document.
///
/// Variables whose name or value is not valid unicode are skipped.
#[derive(Debug, Default)]
pub struct EnvironmentSource {
    captured: Option<(Map<String, Value>, DateTime<Utc>)>,
}

impl EnvironmentSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataSource for EnvironmentSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn evaluate(&mut self) -> Result<()> {
        if self.captured.is_some() {
            return Ok(());
        }
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| {
                let value = value.into_string().ok()?;
                Some((key.into_string().ok()?, Value::String(value)))
            })
            .collect();
        self.captured = Some((vars, Utc::now()));
        Ok(())
    }

    fn to_document(&self) -> Result<Document> {
        let (vars, timestamp) = self
            .captured
            .as_ref()
            .ok_or_else(|| not_evaluated(self.name()))?;
        Ok(envelope(self.name(), Value::Object(vars.clone()), *timestamp))
    }
}
