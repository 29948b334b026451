//! Result formatters.
//!
//! Formatters write a finished [`CheckResult`] tree either as an indented,
//! optionally colored tree for terminals or as JSON for tooling.

pub mod human;
pub mod json;

use std::io::Write;
use std::str::FromStr;

use crate::result::CheckResult;

/// Output format for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Trait for formatting a result tree.
pub trait ResultFormatter {
    /// Write `result` to `writer`.
    fn format<W: Write>(&self, result: &CheckResult, writer: &mut W) -> std::io::Result<()>;
}

pub use human::TreeFormatter;
pub use json::JsonFormatter;

/// Check if colors should be enabled on stdout.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formats() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("HUMAN".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("sarif".parse::<OutputFormat>().is_err());
    }
}
