//! Recurring dates: an anchor day repeated at a fixed frequency.
//!
//! Occurrences are `anchor + k × period` for every integer `k`, positive or
//! negative. Membership is a phase test, not a walk. The signed, possibly
//! fractional number of periods between a date and the anchor must be an
//! exact integer. Every query is answered in constant time from the
//! `(frequency, anchor)` pair, and every result is computed from the anchor
//! directly, so repeated stepping never drifts (a monthly series anchored on
//! the 31st returns to the 31st after passing through February).
//!
//! # Boundaries
//!
//! `previous_occurrence` and `next_occurrence` skip an `as_of` that is itself
//! an occurrence unless [`OccurrenceOptions::inclusive`] is set. `next` is
//! defined through `previous` with the flag inverted, so the two never
//! disagree at a boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::error::{DateError, Result};
use crate::format::DateFormat;
use crate::frequency::{Frequency, Period};
use crate::local_date::LocalDate;

/// Most occurrences an enumeration with neither a limit nor an end date may collect.
pub const MAX_UNBOUNDED_OCCURRENCES: usize = 100;

/// Options for [`RecurringDate::next_occurrence`] and [`RecurringDate::previous_occurrence`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OccurrenceOptions {
    /// Return `as_of` itself when an occurrence falls on it.
    pub inclusive: bool,
}

impl OccurrenceOptions {
    pub const INCLUSIVE: Self = Self { inclusive: true };
    pub const EXCLUSIVE: Self = Self { inclusive: false };
}

/// Render types for [`RecurringDate::format`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RecurringFormat {
    /// `"X of Y"`: a sentence such as `"15th of each month"`.
    #[default]
    XOfY,
    /// `"/FF"`: a compact suffix such as `"/mo"`.
    Suffix,
}

impl RecurringFormat {
    pub const ALL: [RecurringFormat; 2] = [Self::XOfY, Self::Suffix];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::XOfY => "X of Y",
            Self::Suffix => "/FF",
        }
    }
}

impl FromStr for RecurringFormat {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| DateError::NotImplemented(format!("recurring date format type '{s}'")))
    }
}

// ── Input ───────────────────────────────────────────────────────────────────

/// Raw recurrence input as received from callers or storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringDateInput {
    pub frequency: Frequency,
    pub anchor_date: String,
}

impl RecurringDateInput {
    /// Resolve the anchor into a [`LocalDate`].
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] if `anchor_date` is not a canonical date.
    pub fn validate(&self) -> Result<(Frequency, LocalDate)> {
        Ok((self.frequency, LocalDate::new(&self.anchor_date)?))
    }
}

// ── RecurringDate ───────────────────────────────────────────────────────────

/// An anchor date repeated at a fixed [`Frequency`].
///
/// # Examples
///
/// ```
/// use recurring_date::{Frequency, LocalDate, OccurrenceOptions, RecurringDate};
///
/// let anchor = LocalDate::new("2020-01-01").unwrap();
/// let fortnightly = RecurringDate::new(Frequency::Fortnightly, anchor);
///
/// assert!(!fortnightly.has_occurrence_on(&LocalDate::new("2020-01-08").unwrap()));
/// assert!(fortnightly.has_occurrence_on(&LocalDate::new("2020-01-15").unwrap()));
///
/// let next = fortnightly
///     .next_occurrence(&LocalDate::new("2020-01-08").unwrap(), OccurrenceOptions::default())
///     .unwrap();
/// assert_eq!(next.to_string(), "2020-01-15");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RecurringDateInput", into = "RecurringDateInput")]
pub struct RecurringDate {
    frequency: Frequency,
    anchor_date: LocalDate,
}

impl RecurringDate {
    pub fn new(frequency: Frequency, anchor_date: LocalDate) -> Self {
        Self {
            frequency,
            anchor_date,
        }
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn anchor_date(&self) -> LocalDate {
        self.anchor_date
    }

    pub fn period(&self) -> Period {
        self.frequency.period()
    }

    /// Whether an occurrence falls on `date`.
    pub fn has_occurrence_on(&self, date: &LocalDate) -> bool {
        self.periods_from_anchor(date).fract() == 0.0
    }

    /// The latest occurrence before `as_of` (or on it, when inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`DateError::OutOfRange`] if the occurrence falls outside years 0000-9999.
    pub fn previous_occurrence(
        &self,
        as_of: &LocalDate,
        options: OccurrenceOptions,
    ) -> Result<LocalDate> {
        self.occurrence_at(self.previous_index(as_of, options.inclusive))
    }

    /// The earliest occurrence after `as_of` (or on it, when inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`DateError::OutOfRange`] if the occurrence falls outside years 0000-9999.
    pub fn next_occurrence(&self, as_of: &LocalDate, options: OccurrenceOptions) -> Result<LocalDate> {
        self.occurrence_at(self.previous_index(as_of, !options.inclusive) + 1)
    }

    /// The next occurrence after `as_of` that is also on or after
    /// `range.start`, or `None` if it lands after `range.end`.
    pub fn next_occurrence_in_date_range(
        &self,
        range: &DateRange,
        as_of: &LocalDate,
    ) -> Result<Option<LocalDate>> {
        // Before the range, an occurrence on `start` itself counts.
        let options = OccurrenceOptions {
            inclusive: as_of.is_before(&range.start),
        };
        let from = std::cmp::max(range.start, *as_of);
        let occurrence = self.next_occurrence(&from, options)?;
        match range.end {
            Some(end) if occurrence.is_after(&end) => Ok(None),
            _ => Ok(Some(occurrence)),
        }
    }

    /// Occurrences from `range.start` through `range.end`, both inclusive,
    /// in ascending order and at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::UnboundedEnumeration`] when the range has no end,
    /// no `limit` is given, and more than [`MAX_UNBOUNDED_OCCURRENCES`]
    /// occurrences would be returned. Pass a `limit` to enumerate an
    /// open-ended range.
    pub fn occurrences_in_date_range(
        &self,
        range: &DateRange,
        limit: Option<usize>,
    ) -> Result<Vec<LocalDate>> {
        let mut occurrences = Vec::new();
        let mut as_of = range.start;
        let mut options = OccurrenceOptions::INCLUSIVE;

        loop {
            if limit.is_some_and(|limit| occurrences.len() >= limit) {
                break;
            }
            if range.end.is_some_and(|end| as_of.is_after(&end)) {
                break;
            }

            let date = self.next_occurrence(&as_of, options)?;
            if range.end.is_some_and(|end| date.is_after(&end)) {
                break;
            }
            occurrences.push(date);

            if limit.is_none()
                && range.end.is_none()
                && occurrences.len() > MAX_UNBOUNDED_OCCURRENCES
            {
                tracing::warn!(
                    frequency = %self.frequency,
                    anchor = %self.anchor_date,
                    start = %range.start,
                    "refusing to enumerate an open-ended range without a limit"
                );
                return Err(DateError::UnboundedEnumeration(MAX_UNBOUNDED_OCCURRENCES));
            }

            // Stepping past the end could leave year 9999.
            if range.end.is_some_and(|end| date.is_same_or_after(&end)) {
                break;
            }
            as_of = date;
            options = OccurrenceOptions::EXCLUSIVE;
        }

        tracing::debug!(
            frequency = %self.frequency,
            start = %range.start,
            count = occurrences.len(),
            "enumerated occurrences"
        );
        Ok(occurrences)
    }

    /// Human-readable rendering.
    ///
    /// ```
    /// use recurring_date::{Frequency, LocalDate, RecurringDate, RecurringFormat};
    ///
    /// let anchor = LocalDate::new("2020-01-01").unwrap();
    /// let monthly = RecurringDate::new(Frequency::Monthly, anchor);
    /// assert_eq!(monthly.format(RecurringFormat::XOfY), "1st of each month");
    /// assert_eq!(monthly.format(RecurringFormat::Suffix), "/mo");
    /// ```
    pub fn format(&self, format: RecurringFormat) -> String {
        match format {
            RecurringFormat::Suffix => self.frequency.suffix().to_string(),
            RecurringFormat::XOfY => match self.frequency {
                Frequency::Daily => "Every day".to_string(),
                Frequency::Fortnightly => format!(
                    "Fortnightly starting with {}",
                    self.anchor_date.format_as(DateFormat::DayMonthYear)
                ),
                Frequency::Weekly => format!("{} each week", self.anchor_date.format("dddd")),
                Frequency::Monthly => format!("{} of each month", self.anchor_date.format("Do")),
                Frequency::Annually => {
                    format!("{} each year", self.anchor_date.format("Do MMMM"))
                }
            },
        }
    }

    /// [`format`](Self::format) with the render type given by name
    /// (`"X of Y"` or `"/FF"`).
    ///
    /// # Errors
    ///
    /// Returns [`DateError::NotImplemented`] for any other render type.
    pub fn format_str(&self, render_type: &str) -> Result<String> {
        let format = render_type.parse::<RecurringFormat>().map_err(|_| {
            DateError::NotImplemented(format!(
                ".format() not implemented for {} recurring date and format type '{render_type}'",
                self.frequency
            ))
        })?;
        Ok(self.format(format))
    }

    // ── Phase arithmetic ────────────────────────────────────────────────

    /// Signed, possibly fractional periods from the anchor to `date`.
    fn periods_from_anchor(&self, date: &LocalDate) -> f64 {
        let period = self.period();
        date.steps_from(&self.anchor_date, period.unit) / period.number as f64
    }

    /// Index `k` of the occurrence `anchor + k × period` at or before `as_of`.
    ///
    /// Floors rather than truncates: half a period before the anchor is index -1.
    fn previous_index(&self, as_of: &LocalDate, inclusive: bool) -> i64 {
        let periods = self.periods_from_anchor(as_of);
        if !inclusive && periods.fract() == 0.0 {
            periods as i64 - 1
        } else {
            periods.floor() as i64
        }
    }

    fn occurrence_at(&self, index: i64) -> Result<LocalDate> {
        let period = self.period();
        let amount = index.checked_mul(period.number).ok_or_else(|| {
            DateError::OutOfRange(format!("occurrence {index} of {}", self.frequency))
        })?;
        self.anchor_date.add(amount, period.unit)
    }
}

impl TryFrom<RecurringDateInput> for RecurringDate {
    type Error = DateError;

    fn try_from(input: RecurringDateInput) -> Result<Self> {
        let (frequency, anchor_date) = input.validate()?;
        Ok(Self::new(frequency, anchor_date))
    }
}

impl From<RecurringDate> for RecurringDateInput {
    fn from(recurring: RecurringDate) -> Self {
        Self {
            frequency: recurring.frequency,
            anchor_date: recurring.anchor_date.to_string(),
        }
    }
}

impl fmt::Display for RecurringDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(RecurringFormat::XOfY))
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
