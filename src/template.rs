//! Positional message templates.
//!
//! Check messages are operator-supplied templates with positional
//! placeholders that are filled in from check-specific arguments.
//!
//! # Syntax
//!
//! - `{0}`, `{1}`, ... - replaced with the argument at that position
//! - `{0:.2f}` - floating-point argument rendered with two decimals
//! - `{0:s}` - explicit string conversion (same as `{0}`)
//! - `{{` and `}}` - literal braces
//!
//! A placeholder whose index is beyond the supplied arguments is left in the
//! output as written, so a template never makes a check fail.
//!
//! # Example
//!
//! ```
//! use hostcheck::template::{format, Arg};
//!
//! let detail = format("{0:.2f} > {1:.2f} ({2})", &[Arg::from(2.25), Arg::from(2.0)]);
//! assert_eq!(detail, "2.25 > 2.00 ({2})");
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Arg {
    /// Render the argument, honouring a format spec such as `.2f`.
    fn render(&self, spec: Option<&str>) -> String {
        match (spec.and_then(precision), self) {
            (Some(p), Arg::Float(v)) => format!("{:.*}", p, v),
            (Some(p), Arg::Int(v)) => format!("{:.*}", p, *v as f64),
            (Some(p), Arg::UInt(v)) => format!("{:.*}", p, *v as f64),
            _ => self.to_string(),
        }
    }
}

/// Parse the precision out of a `.Nf` spec.
fn precision(spec: &str) -> Option<usize> {
    spec.strip_prefix('.')?.strip_suffix('f')?.parse().ok()
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => write!(f, "{}", s),
            Arg::Int(v) => write!(f, "{}", v),
            Arg::UInt(v) => write!(f, "{}", v),
            Arg::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

impl From<u64> for Arg {
    fn from(value: u64) -> Self {
        Arg::UInt(value)
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Arg::UInt(value.into())
    }
}

impl From<u8> for Arg {
    fn from(value: u8) -> Self {
        Arg::UInt(value.into())
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Arg::UInt(value as u64)
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<serde_json::Value> for Arg {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Arg::Str(s),
            other => Arg::Str(other.to_string()),
        }
    }
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Positional placeholder; `raw` is the original text including braces
    Placeholder {
        index: usize,
        spec: Option<String>,
        raw: String,
    },
}

/// Parse a template into literal and placeholder segments.
///
/// Anything that looks like a brace but is not a well-formed placeholder is
/// kept as literal text.
pub fn parse_template(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = input;

    while let Some(pos) = rest.find(['{', '}']) {
        literal.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            literal.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }

        if tail.starts_with('{') {
            if let Some((index, spec, len)) = placeholder(tail) {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder {
                    index,
                    spec,
                    raw: tail[..len].to_string(),
                });
                rest = &tail[len..];
                continue;
            }
        }

        literal.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

/// Recognise `{N}` or `{N:spec}` at the start of `input`.
///
/// Returns the index, the optional spec, and the byte length consumed.
fn placeholder(input: &str) -> Option<(usize, Option<String>, usize)> {
    let close = input.find('}')?;
    let inner = &input[1..close];
    let (index, spec) = match inner.split_once(':') {
        Some((index, spec)) => (index, Some(spec.to_string())),
        None => (inner, None),
    };

    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some((index.parse().ok()?, spec, close + 1))
}

/// Substitute `args` into `template` by position.
///
/// Placeholders referencing an index beyond `args` are kept verbatim.
pub fn format(template: &str, args: &[Arg]) -> String {
    parse_template(template)
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text,
            Segment::Placeholder { index, spec, raw } => match args.get(index) {
                Some(arg) => arg.render(spec.as_deref()),
                None => raw,
            },
        })
        .collect()
}

/// The four message templates every check renders its result with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Templates {
    /// Short label for the result.
    pub brief: String,
    /// Detail when a problem was detected.
    pub detail_fail: String,
    /// Detail when the check could not be evaluated; argument 0 is the reason.
    pub detail_error: String,
    /// Detail when no problem was detected.
    pub detail_pass: String,
}

impl Templates {
    /// Create a template set.
    pub fn new(
        brief: impl Into<String>,
        detail_fail: impl Into<String>,
        detail_error: impl Into<String>,
        detail_pass: impl Into<String>,
    ) -> Self {
        Self {
            brief: brief.into(),
            detail_fail: detail_fail.into(),
            detail_error: detail_error.into(),
            detail_pass: detail_pass.into(),
        }
    }

    /// Replace the templates named in `overrides`, keeping the rest.
    pub fn merge(mut self, overrides: &TemplateOverrides) -> Self {
        if let Some(brief) = &overrides.brief {
            self.brief = brief.clone();
        }
        if let Some(detail_fail) = &overrides.detail_fail {
            self.detail_fail = detail_fail.clone();
        }
        if let Some(detail_error) = &overrides.detail_error {
            self.detail_error = detail_error.clone();
        }
        if let Some(detail_pass) = &overrides.detail_pass {
            self.detail_pass = detail_pass.clone();
        }
        self
    }
}

/// Caller-supplied replacements for any subset of [`Templates`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TemplateOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_fail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_pass: Option<String>,
}

impl TemplateOverrides {
    /// Whether no template is overridden.
    pub fn is_empty(&self) -> bool {
        self.brief.is_none()
            && self.detail_fail.is_none()
            && self.detail_error.is_none()
            && self.detail_pass.is_none()
    }
}
