//! Error types for local-date and recurring-date operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid LocalDate value: {0}")]
    InvalidDate(String),

    #[error("Date out of range: {0}")]
    OutOfRange(String),

    #[error("Unknown date unit: {0}")]
    UnknownUnit(String),

    #[error("Unknown frequency: {0}")]
    UnknownFrequency(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error(
        "occurrences_in_date_range() was called with no limit and no end date \
         while it would return more than {0} occurrences"
    )]
    UnboundedEnumeration(usize),
}

pub type Result<T> = std::result::Result<T, DateError>;
