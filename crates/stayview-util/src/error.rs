//! Error types shared across stayview crates

use thiserror::Error;

/// A timestamp or time zone string that could not be understood
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("Unrecognized timestamp '{0}'")]
    Timestamp(String),

    #[error("Empty timestamp")]
    Empty,

    #[error("Unrecognized time zone '{0}' (expected \"local\", \"utc\" or an offset like \"+05:30\")")]
    Zone(String),
}

impl TimeParseError {
    pub fn timestamp(value: impl Into<String>) -> Self {
        Self::Timestamp(value.into())
    }

    pub fn zone(value: impl Into<String>) -> Self {
        Self::Zone(value.into())
    }
}

pub type TimeResult<T> = std::result::Result<T, TimeParseError>;
