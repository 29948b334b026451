//! Battery file loading.

use std::fs;
use std::path::Path;

use crate::config::schema::Battery;
use crate::error::{HostcheckError, Result};

/// Load and validate a battery file.
///
/// YAML is expected; JSON is accepted as well since it is valid YAML.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the file is not a valid battery.
/// Returns `ConfigValidationError` if a check has out-of-range parameters.
pub fn load_battery(path: &Path) -> Result<Battery> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HostcheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            HostcheckError::Io(e)
        }
    })?;

    let battery = parse_battery(&content, path)?;
    battery.validate()?;
    Ok(battery)
}

/// Parse battery content without validating parameter ranges.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_battery(content: &str, source_path: &Path) -> Result<Battery> {
    serde_yaml::from_str(content).map_err(|e| HostcheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_yaml_battery() {
        let file = write("checks:\n  - type: core_count\n    cores: 4\n");
        let battery = load_battery(file.path()).unwrap();
        assert_eq!(battery.checks.len(), 1);
    }

    #[test]
    fn loads_json_battery() {
        let file = write(r#"{"checks": [{"type": "permissions", "mode": "1777"}]}"#);
        let battery = load_battery(file.path()).unwrap();
        assert_eq!(battery.checks[0].spec.type_name(), "permissions");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_battery(Path::new("/nonexistent/battery.yml")).unwrap_err();
        assert!(matches!(err, HostcheckError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let file = write("checks: [unclosed");
        let err = load_battery(file.path()).unwrap_err();
        assert!(matches!(err, HostcheckError::ConfigParseError { .. }));
    }

    #[test]
    fn out_of_range_is_validation_error() {
        let file =
            write("checks:\n  - type: percent_free\n    filesystem: /\n    percent: 120\n");
        let err = load_battery(file.path()).unwrap_err();
        assert!(matches!(err, HostcheckError::ConfigValidationError { .. }));
    }
}
