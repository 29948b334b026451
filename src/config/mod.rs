//! Battery configuration.
//!
//! A battery is a YAML file listing the checks to run. This module parses
//! it, validates parameter ranges, and builds the checks into a
//! [`CheckRegistry`].

pub mod loader;
pub mod schema;

pub use loader::{load_battery, parse_battery};
pub use schema::{battery_schema, Battery, CheckEntry, CheckSpec};

use crate::checks::{
    AmountFree, Check, CheckRegistry, Configure, CoreCount, Environment, LoadAverage, PercentFree,
    Permissions, PhysicalSize, ShellOutput, Window,
};
use crate::error::{HostcheckError, Result};

/// Parse an octal permission string such as `"1777"`, `"0755"` or `"0o644"`.
pub fn parse_mode(mode: &str) -> Result<u32> {
    octal_mode(mode).map_err(invalid)
}

fn octal_mode(mode: &str) -> std::result::Result<u32, String> {
    let digits = mode.strip_prefix("0o").unwrap_or(mode);
    u32::from_str_radix(digits, 8)
        .ok()
        .filter(|m| *m <= 0o7777)
        .ok_or_else(|| format!("'{}' is not an octal permission mode", mode))
}

impl Battery {
    /// Check parameter ranges without building any check.
    pub fn validate(&self) -> Result<()> {
        if self.checks.is_empty() {
            return Err(invalid("battery has no checks".to_string()));
        }
        for (index, entry) in self.checks.iter().enumerate() {
            entry.spec.validate().map_err(|message| {
                invalid(format!(
                    "check {} ({}): {}",
                    index + 1,
                    entry.spec.type_name(),
                    message
                ))
            })?;
        }
        Ok(())
    }

    /// Build every check into a registry.
    ///
    /// # Errors
    ///
    /// `ConfigValidationError` for out-of-range parameters, `InvalidPattern`
    /// for regular expressions that do not compile.
    pub fn build(&self) -> Result<CheckRegistry> {
        self.validate()?;
        let mut registry = CheckRegistry::new();
        for entry in &self.checks {
            registry.register(entry.build()?);
        }
        Ok(registry)
    }
}

impl CheckEntry {
    /// Build the configured check with its overrides applied.
    pub fn build(&self) -> Result<Box<dyn Check>> {
        Ok(match &self.spec {
            CheckSpec::AmountFree { filesystem, amount } => {
                self.configure(AmountFree::new(filesystem, *amount))
            }
            CheckSpec::PercentFree {
                filesystem,
                percent,
            } => self.configure(PercentFree::new(filesystem, *percent)),
            CheckSpec::PhysicalSize { size, tolerance } => {
                self.configure(PhysicalSize::new(*size).with_tolerance(*tolerance))
            }
            CheckSpec::CoreCount { cores } => self.configure(CoreCount::new(*cores)),
            CheckSpec::Environment {
                variable,
                value,
                regex,
            } => self.configure(Environment::new(variable, value, *regex)?),
            CheckSpec::LoadAverage { load, minutes } => {
                let window = Window::try_from(*minutes).map_err(invalid)?;
                self.configure(LoadAverage::new(*load, window))
            }
            CheckSpec::ShellOutput { output, regex } => {
                self.configure(ShellOutput::new(output, *regex)?)
            }
            CheckSpec::Permissions { mode } => {
                self.configure(Permissions::new(parse_mode(mode)?))
            }
        })
    }

    fn configure<C>(&self, check: C) -> Box<dyn Check>
    where
        C: Check + Configure + 'static,
    {
        let check = check.with_templates(&self.templates);
        match self.priority {
            Some(priority) => Box::new(check.with_priority(priority)),
            None => Box::new(check),
        }
    }
}

impl CheckSpec {
    fn validate(&self) -> std::result::Result<(), String> {
        match self {
            CheckSpec::PercentFree { percent, .. } if !(0.0..=100.0).contains(percent) => {
                Err(format!("percent must be between 0 and 100, not {}", percent))
            }
            CheckSpec::LoadAverage { load, .. } if *load < 0.0 => {
                Err(format!("load must not be negative, not {}", load))
            }
            CheckSpec::LoadAverage { minutes, .. } => Window::try_from(*minutes).map(|_| ()),
            CheckSpec::Permissions { mode } => octal_mode(mode).map(|_| ()),
            _ => Ok(()),
        }
    }
}

fn invalid(message: String) -> HostcheckError {
    HostcheckError::ConfigValidationError { message }
}
