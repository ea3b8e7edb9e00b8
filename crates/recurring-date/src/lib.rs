//! # recurring-date
//!
//! Calendar-day values and drift-free recurring dates.
//!
//! A [`LocalDate`] is a single day with no time of day. A [`RecurringDate`]
//! repeats an anchor day daily, weekly, fortnightly, monthly or annually. It
//! answers "does it occur on this day", "when is the next/previous occurrence",
//! and "which occurrences fall in this range" without stepping through every
//! period.
//!
//! ## Modules
//!
//! - [`local_date`]: `LocalDate` construction, arithmetic, comparison, diff
//! - [`format`]: moment-style template tokens for rendering dates
//! - [`date_range`]: start date plus optional end date
//! - [`frequency`]: the five frequencies and their period lengths
//! - [`recurring`]: `RecurringDate` with phase test, next/previous, range enumeration
//! - [`config`]: default time zone configuration and handle
//! - [`error`]: Error types

pub mod config;
pub mod date_range;
pub mod error;
pub mod format;
pub mod frequency;
pub mod local_date;
pub mod recurring;

pub use config::{parse_timezone, DateConfig, DefaultTimeZoneRef};
pub use date_range::DateRange;
pub use error::DateError;
pub use format::DateFormat;
pub use frequency::{format_recurring_date_frequency, Frequency, Period};
pub use local_date::{DateSource, DateUnit, FromOptions, LocalDate, LOCAL_DATE_VALUE_FORMAT};
pub use recurring::{
    OccurrenceOptions, RecurringDate, RecurringDateInput, RecurringFormat,
    MAX_UNBOUNDED_OCCURRENCES,
};
