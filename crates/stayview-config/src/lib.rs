//! Configuration parsing and validation for stayview
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Display settings (currency, date formats, time zone, labels)
//! - Route templates for the edit screen
//! - Validation with clear error messages

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load configuration if the file exists, otherwise fall back to defaults
pub fn load_config_or_default(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Settings::default());
    }
    load_config(path)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Settings::from_raw(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_minimal_config() {
        let settings = parse_config("config_version = 1").unwrap();
        assert_eq!(settings.display.currency_symbol, "₹");
        assert_eq!(settings.display.today_label, "Today");
        assert_eq!(settings.routes.edit, DEFAULT_EDIT_ROUTE);
    }

    #[test]
    fn parse_full_config() {
        let config = r#"
            config_version = 1

            [display]
            currency_symbol = "$"
            stay_date_format = "%Y-%m-%d"
            booked_at_format = "%Y-%m-%d %H:%M"
            today_label = "Tonight"
            timezone = "+05:30"

            [routes]
            edit = "/bookings/{id}/edit"
        "#;

        let settings = parse_config(config).unwrap();
        assert_eq!(settings.display.currency_symbol, "$");
        assert_eq!(settings.display.today_label, "Tonight");
        assert_eq!(settings.display.zone.to_string(), "+05:30");
        assert_eq!(settings.routes.edit, "/bookings/{id}/edit");
    }

    #[test]
    fn reject_wrong_version() {
        let result = parse_config("config_version = 99");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_invalid_values() {
        let config = r#"
            config_version = 1

            [display]
            timezone = "moon"

            [routes]
            edit = "/account/reservations/edit"
        "#;

        match parse_config(config) {
            Err(ConfigError::ValidationFailed { errors }) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "config_version = 1").unwrap();
        writeln!(file, "[display]").unwrap();
        writeln!(file, "currency_symbol = \"€\"").unwrap();

        let settings = load_config(file.path()).unwrap();
        assert_eq!(settings.display.currency_symbol, "€");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_config_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.routes.edit, DEFAULT_EDIT_ROUTE);

        assert!(matches!(
            load_config(dir.path().join("absent.toml")),
            Err(ConfigError::ReadError(_))
        ));
    }
}
