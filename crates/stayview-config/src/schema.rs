//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// How reservation cards are rendered
    #[serde(default)]
    pub display: RawDisplayConfig,

    /// Links to other screens
    #[serde(default)]
    pub routes: RawRoutesConfig,
}

/// Display settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDisplayConfig {
    /// Prefix for prices (default: "₹")
    pub currency_symbol: Option<String>,

    /// chrono format for check-in/check-out labels
    pub stay_date_format: Option<String>,

    /// chrono format for the "Booked ..." line
    pub booked_at_format: Option<String>,

    /// Relative label used on the check-in day
    pub today_label: Option<String>,

    /// "local", "utc", or a fixed offset such as "+05:30"
    pub timezone: Option<String>,
}

/// Route templates
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRoutesConfig {
    /// Edit screen path; `{id}` is replaced by the booking id
    pub edit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_display_section() {
        let toml_str = r#"
            config_version = 1

            [display]
            currency_symbol = "$"
            timezone = "utc"
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.currency_symbol.as_deref(), Some("$"));
        assert_eq!(config.display.timezone.as_deref(), Some("utc"));
        assert!(config.routes.edit.is_none());
    }

    #[test]
    fn version_is_required() {
        let result: Result<RawConfig, _> = toml::from_str("[display]\ncurrency_symbol = \"$\"");
        assert!(result.is_err());
    }
}
