//! A start date with an optional end date.

use serde::{Deserialize, Serialize};

use crate::local_date::LocalDate;

/// Dates from `start`, up to `end` when one is given.
///
/// The order of `start` and `end` is not checked; an inverted range simply
/// contains no occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: LocalDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<LocalDate>,
}

impl DateRange {
    pub fn new(start: LocalDate, end: Option<LocalDate>) -> Self {
        Self { start, end }
    }

    /// An open-ended range.
    pub fn starting(start: LocalDate) -> Self {
        Self { start, end: None }
    }

    pub fn is_bounded(&self) -> bool {
        self.end.is_some()
    }
}
