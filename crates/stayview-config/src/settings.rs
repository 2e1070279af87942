//! Validated settings structures

use crate::schema::{RawConfig, RawDisplayConfig, RawRoutesConfig};
use stayview_util::{DisplayZone, BOOKED_AT_FORMAT, STAY_DATE_FORMAT};

/// Default price prefix
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Default relative label on the check-in day
pub const DEFAULT_TODAY_LABEL: &str = "Today";

/// Default edit screen route
pub const DEFAULT_EDIT_ROUTE: &str = "/account/reservations/edit/{id}";

/// Validated settings ready for use by the state engine
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub routes: RouteSettings,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            display: DisplaySettings::from_raw(raw.display),
            routes: RouteSettings::from_raw(raw.routes),
        }
    }
}

/// How reservation cards are rendered
#[derive(Debug, Clone)]
pub struct DisplaySettings {
    pub currency_symbol: String,
    pub stay_date_format: String,
    pub booked_at_format: String,
    pub today_label: String,
    pub zone: DisplayZone,
}

impl DisplaySettings {
    fn from_raw(raw: RawDisplayConfig) -> Self {
        let defaults = Self::default();
        Self {
            currency_symbol: raw.currency_symbol.unwrap_or(defaults.currency_symbol),
            stay_date_format: raw.stay_date_format.unwrap_or(defaults.stay_date_format),
            booked_at_format: raw.booked_at_format.unwrap_or(defaults.booked_at_format),
            today_label: raw.today_label.unwrap_or(defaults.today_label),
            // Validation guarantees this parses
            zone: raw
                .timezone
                .and_then(|z| z.parse().ok())
                .unwrap_or(defaults.zone),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            stay_date_format: STAY_DATE_FORMAT.to_string(),
            booked_at_format: BOOKED_AT_FORMAT.to_string(),
            today_label: DEFAULT_TODAY_LABEL.to_string(),
            zone: DisplayZone::Local,
        }
    }
}

/// Route templates for navigation targets
#[derive(Debug, Clone)]
pub struct RouteSettings {
    pub edit: String,
}

impl RouteSettings {
    fn from_raw(raw: RawRoutesConfig) -> Self {
        Self {
            edit: raw.edit.unwrap_or_else(|| DEFAULT_EDIT_ROUTE.to_string()),
        }
    }
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            edit: DEFAULT_EDIT_ROUTE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_display_keeps_defaults() {
        let display = DisplaySettings::from_raw(RawDisplayConfig {
            currency_symbol: Some("$".into()),
            timezone: Some("utc".into()),
            ..Default::default()
        });

        assert_eq!(display.currency_symbol, "$");
        assert_eq!(display.stay_date_format, STAY_DATE_FORMAT);
        assert_eq!(display.today_label, DEFAULT_TODAY_LABEL);
        assert_eq!(display.zone, DisplayZone::Utc);
    }
}
