//! Battery file format.
//!
//! ```yaml
//! name: compute-node
//! checks:
//!   - type: core_count
//!     cores: 4
//!   - type: amount_free
//!     filesystem: /
//!     amount: 10737418240
//!     priority: error
//!   - type: environment
//!     variable: PATH
//!     value: "/usr/local/bin"
//!     regex: true
//!     templates:
//!       detail_fail: "PATH is '{0}'"
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::result::Priority;
use crate::template::TemplateOverrides;

/// A named list of checks to run against collected documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Battery {
    /// Label for the battery, used as the brief of the root result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Checks, in the order they run.
    #[serde(default)]
    pub checks: Vec<CheckEntry>,
}

/// One configured check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckEntry {
    #[serde(flatten)]
    pub spec: CheckSpec,

    /// Replacements for the check's default message templates.
    #[serde(default, skip_serializing_if = "TemplateOverrides::is_empty")]
    pub templates: TemplateOverrides,

    /// Priority of a `YES` verdict (default: warning).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// The kind of check and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckSpec {
    /// Minimum free bytes on a filesystem.
    AmountFree { filesystem: String, amount: u64 },

    /// Minimum percentage of free blocks on a filesystem (0 to 100).
    PercentFree { filesystem: String, percent: f64 },

    /// Minimum physical memory in bytes, less an optional tolerance.
    PhysicalSize {
        size: u64,
        #[serde(default)]
        tolerance: u64,
    },

    /// Exact number of CPU cores.
    CoreCount { cores: u64 },

    /// Expected value of an environment variable.
    Environment {
        variable: String,
        value: String,
        #[serde(default)]
        regex: bool,
    },

    /// Maximum load average over 1, 5 or 15 minutes.
    LoadAverage {
        load: f64,
        #[serde(default = "default_minutes")]
        minutes: u8,
    },

    /// Expected shell command output.
    ShellOutput {
        output: String,
        #[serde(default)]
        regex: bool,
    },

    /// Expected file permission bits, in octal (e.g. "1777").
    Permissions { mode: String },
}

fn default_minutes() -> u8 {
    1
}

impl CheckSpec {
    /// The `type` tag of this spec.
    pub fn type_name(&self) -> &'static str {
        match self {
            CheckSpec::AmountFree { .. } => "amount_free",
            CheckSpec::PercentFree { .. } => "percent_free",
            CheckSpec::PhysicalSize { .. } => "physical_size",
            CheckSpec::CoreCount { .. } => "core_count",
            CheckSpec::Environment { .. } => "environment",
            CheckSpec::LoadAverage { .. } => "load_average",
            CheckSpec::ShellOutput { .. } => "shell_output",
            CheckSpec::Permissions { .. } => "permissions",
        }
    }
}

/// JSON Schema of the battery format.
pub fn battery_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(Battery)).unwrap_or_default()
}
