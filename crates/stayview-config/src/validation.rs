//! Configuration validation

use crate::schema::{RawConfig, RawDisplayConfig, RawRoutesConfig};
use chrono::format::{Item, StrftimeItems};
use stayview_util::DisplayZone;
use thiserror::Error;

/// Placeholder substituted with the booking id in route templates
pub const ROUTE_ID_PLACEHOLDER: &str = "{id}";

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("display.{field} cannot be empty")]
    EmptyValue { field: &'static str },

    #[error("Invalid date format '{value}' for display.{field}")]
    InvalidDateFormat { field: &'static str, value: String },

    #[error("Invalid time zone '{0}'")]
    InvalidTimeZone(String),

    #[error("Route '{0}' must contain {{id}}")]
    RouteMissingId(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = validate_display(&config.display);
    errors.extend(validate_routes(&config.routes));
    errors
}

fn validate_display(display: &RawDisplayConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(symbol) = &display.currency_symbol
        && symbol.trim().is_empty()
    {
        errors.push(ValidationError::EmptyValue {
            field: "currency_symbol",
        });
    }

    if let Some(label) = &display.today_label
        && label.trim().is_empty()
    {
        errors.push(ValidationError::EmptyValue {
            field: "today_label",
        });
    }

    let formats = [
        ("stay_date_format", &display.stay_date_format),
        ("booked_at_format", &display.booked_at_format),
    ];
    for (field, format) in formats {
        if let Some(value) = format
            && !is_valid_date_format(value)
        {
            errors.push(ValidationError::InvalidDateFormat {
                field,
                value: value.clone(),
            });
        }
    }

    if let Some(zone) = &display.timezone
        && zone.parse::<DisplayZone>().is_err()
    {
        errors.push(ValidationError::InvalidTimeZone(zone.clone()));
    }

    errors
}

fn validate_routes(routes: &RawRoutesConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(edit) = &routes.edit
        && !edit.contains(ROUTE_ID_PLACEHOLDER)
    {
        errors.push(ValidationError::RouteMissingId(edit.clone()));
    }

    errors
}

/// Check that a chrono strftime string is non-empty and well-formed
pub fn is_valid_date_format(format: &str) -> bool {
    !format.trim().is_empty()
        && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
