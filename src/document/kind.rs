//! Known document shapes.
//!
//! Checks dispatch on the `name` field of a document. [`DocumentKind`] is the
//! closed set of names the built-in checks know how to decode.

use std::fmt;

/// Shape of a document, keyed by its `name` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Process environment variables.
    Environment,
    /// Mounted filesystems (BSD / macOS).
    Getfsstat,
    /// Load averages as floats.
    Getloadavg,
    /// Mounted filesystems (Linux).
    Getmntent,
    /// One `shell_command` document per remote host.
    RemoteShellCommand,
    /// Output of a local shell command.
    ShellCommand,
    /// File status.
    Stat,
    /// POSIX configuration values.
    Sysconf,
    /// Kernel state (BSD / macOS).
    Sysctl,
    /// Kernel statistics (Linux).
    Sysinfo,
    /// Any other document.
    Other(String),
}

impl DocumentKind {
    /// Map a document name to its kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            "environment" => DocumentKind::Environment,
            "getfsstat" => DocumentKind::Getfsstat,
            "getloadavg" => DocumentKind::Getloadavg,
            "getmntent" => DocumentKind::Getmntent,
            "remote_shell_command" => DocumentKind::RemoteShellCommand,
            "shell_command" => DocumentKind::ShellCommand,
            "stat" => DocumentKind::Stat,
            "sysconf" => DocumentKind::Sysconf,
            "sysctl" => DocumentKind::Sysctl,
            "sysinfo" => DocumentKind::Sysinfo,
            other => DocumentKind::Other(other.to_string()),
        }
    }

    /// The document name for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            DocumentKind::Environment => "environment",
            DocumentKind::Getfsstat => "getfsstat",
            DocumentKind::Getloadavg => "getloadavg",
            DocumentKind::Getmntent => "getmntent",
            DocumentKind::RemoteShellCommand => "remote_shell_command",
            DocumentKind::ShellCommand => "shell_command",
            DocumentKind::Stat => "stat",
            DocumentKind::Sysconf => "sysconf",
            DocumentKind::Sysctl => "sysctl",
            DocumentKind::Sysinfo => "sysinfo",
            DocumentKind::Other(name) => name,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
