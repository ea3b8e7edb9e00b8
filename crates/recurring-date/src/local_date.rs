//! Calendar-day values with no time of day and no instant.
//!
//! A [`LocalDate`] is a single day on the proleptic Gregorian calendar. Its
//! canonical form is `YYYY-MM-DD`, which is also its `Display`, serde, and
//! storage representation. Once built it does not depend on a time zone.
//! Time zones only matter when a date is taken from an instant
//! ([`LocalDate::from_instant`], [`LocalDate::today`]).
//!
//! All arithmetic returns a new value and leaves calendar normalization
//! (month-end clamping, leap years) to `chrono`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DateError, Result};
use crate::format::{self, DateFormat};

/// Template of the canonical value form.
pub const LOCAL_DATE_VALUE_FORMAT: &str = "YYYY-MM-DD";

const VALUE_LEN: usize = LOCAL_DATE_VALUE_FORMAT.len();
const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

// ── Units ───────────────────────────────────────────────────────────────────

/// Calendar unit for [`LocalDate::add`], [`LocalDate::subtract`] and [`LocalDate::diff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateUnit {
    Day,
    Week,
    Month,
    Year,
}

impl FromStr for DateUnit {
    type Err = DateError;

    /// Accepts singular, plural and abbreviated names. `M` is month; lowercase
    /// `m` is rejected since it conventionally means minutes.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" | "days" | "d" => Ok(Self::Day),
            "week" | "weeks" | "w" => Ok(Self::Week),
            "month" | "months" | "M" => Ok(Self::Month),
            "year" | "years" | "y" => Ok(Self::Year),
            _ => Err(DateError::UnknownUnit(format!("'{s}'"))),
        }
    }
}

impl fmt::Display for DateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        })
    }
}

// ── Construction sources ────────────────────────────────────────────────────

/// The shapes a [`LocalDate`] can be extracted from.
#[derive(Debug, Clone, Copy)]
pub enum DateSource<'a> {
    /// Canonical date text or an RFC 3339 timestamp.
    Text(&'a str),
    /// An instant; its day is read in the default time zone.
    Instant(DateTime<Utc>),
    /// A date-time carrying its own UTC offset.
    Zoned(DateTime<FixedOffset>),
    /// An existing date, returned unchanged.
    Date(LocalDate),
}

impl<'a> From<&'a str> for DateSource<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for DateSource<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Instant(value)
    }
}

impl From<SystemTime> for DateSource<'_> {
    fn from(value: SystemTime) -> Self {
        Self::Instant(value.into())
    }
}

impl From<DateTime<FixedOffset>> for DateSource<'_> {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Zoned(value)
    }
}

impl From<LocalDate> for DateSource<'_> {
    fn from(value: LocalDate) -> Self {
        Self::Date(value)
    }
}

/// Options for [`LocalDate::from_source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FromOptions {
    /// When true, a zoned timestamp yields its wall-clock day at its own
    /// offset. When false, the instant is first projected into the default
    /// time zone.
    pub keep_time_zone: bool,
}

impl Default for FromOptions {
    fn default() -> Self {
        Self {
            keep_time_zone: true,
        }
    }
}

// ── LocalDate ───────────────────────────────────────────────────────────────

/// A single calendar day, `0000-01-01` through `9999-12-31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDate(NaiveDate);

impl LocalDate {
    /// Build a date from its canonical `YYYY-MM-DD` form.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] if `value` is not exactly four
    /// digits, a dash, two digits, a dash and two digits, or names a day that
    /// does not exist (e.g. `2021-02-29`).
    ///
    /// # Examples
    ///
    /// ```
    /// use recurring_date::LocalDate;
    ///
    /// let date = LocalDate::new("2020-02-29").unwrap();
    /// assert_eq!(date.to_string(), "2020-02-29");
    /// assert!(LocalDate::new("2020-2-29").is_err());
    /// ```
    pub fn new(value: &str) -> Result<Self> {
        let invalid = || DateError::InvalidDate(value.to_string());
        if !is_canonical_shape(value) {
            return Err(invalid());
        }
        let year: i32 = value[0..4].parse().map_err(|_| invalid())?;
        let month: u32 = value[5..7].parse().map_err(|_| invalid())?;
        let day: u32 = value[8..10].parse().map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Extract the calendar day from any supported [`DateSource`].
    ///
    /// `default_zone` is consulted for instants, and for zoned timestamps
    /// when `options.keep_time_zone` is false.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] for text that is neither canonical
    /// nor RFC 3339, and [`DateError::OutOfRange`] for days outside years
    /// 0000-9999.
    pub fn from_source(source: DateSource<'_>, options: FromOptions, default_zone: Tz) -> Result<Self> {
        match source {
            DateSource::Date(date) => Ok(date),
            DateSource::Instant(instant) => Self::from_instant(instant, default_zone),
            DateSource::Zoned(dt) => Self::from_date_time(&dt, options, default_zone),
            DateSource::Text(text) => Self::from_text(text, options, default_zone),
        }
    }

    /// Extract the day from text.
    ///
    /// RFC 3339 timestamps are handled like [`DateSource::Zoned`]. Anything
    /// else must start with a canonical `YYYY-MM-DD`; trailing content such as
    /// an offset-less time is ignored.
    pub fn from_text(text: &str, options: FromOptions, default_zone: Tz) -> Result<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Self::from_date_time(&dt, options, default_zone);
        }
        Self::new(text.get(..VALUE_LEN).unwrap_or(text))
    }

    /// The day `instant` falls on in `zone`.
    pub fn from_instant(instant: DateTime<Utc>, zone: Tz) -> Result<Self> {
        Self::try_from(instant.with_timezone(&zone).date_naive())
    }

    /// The day a platform clock reading falls on in `zone`.
    pub fn from_system_time(time: SystemTime, zone: Tz) -> Result<Self> {
        Self::from_instant(time.into(), zone)
    }

    /// The day of a zoned date-time, honoring or discarding its zone per `options`.
    pub fn from_date_time<Z: TimeZone>(
        dt: &DateTime<Z>,
        options: FromOptions,
        default_zone: Tz,
    ) -> Result<Self> {
        let day = if options.keep_time_zone {
            dt.date_naive()
        } else {
            dt.with_timezone(&default_zone).date_naive()
        };
        Self::try_from(day)
    }

    /// Today in `zone`, read from the system clock.
    pub fn today(zone: Tz) -> Result<Self> {
        Self::today_at(Utc::now(), zone)
    }

    /// Yesterday in `zone`, read from the system clock.
    pub fn yesterday(zone: Tz) -> Result<Self> {
        Self::yesterday_at(Utc::now(), zone)
    }

    /// Tomorrow in `zone`, read from the system clock.
    pub fn tomorrow(zone: Tz) -> Result<Self> {
        Self::tomorrow_at(Utc::now(), zone)
    }

    /// The day `now` falls on in `zone`.
    pub fn today_at(now: DateTime<Utc>, zone: Tz) -> Result<Self> {
        Self::from_instant(now, zone)
    }

    pub fn yesterday_at(now: DateTime<Utc>, zone: Tz) -> Result<Self> {
        Self::today_at(now, zone)?.subtract(1, DateUnit::Day)
    }

    pub fn tomorrow_at(now: DateTime<Utc>, zone: Tz) -> Result<Self> {
        Self::today_at(now, zone)?.add(1, DateUnit::Day)
    }

    /// Earliest of `dates`, or `None` when there are none.
    pub fn min<I: IntoIterator<Item = LocalDate>>(dates: I) -> Option<LocalDate> {
        dates
            .into_iter()
            .reduce(|min, date| if min.is_before(&date) { min } else { date })
    }

    /// Latest of `dates`, or `None` when there are none.
    pub fn max<I: IntoIterator<Item = LocalDate>>(dates: I) -> Option<LocalDate> {
        dates
            .into_iter()
            .reduce(|max, date| if max.is_after(&date) { max } else { date })
    }

    /// Ascending comparator, usable with `sort_by`.
    pub fn compare(a: &LocalDate, b: &LocalDate) -> Ordering {
        a.cmp(b)
    }

    // ── Components ──────────────────────────────────────────────────────

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of the year, 1-based.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day_of_month(&self) -> u32 {
        self.0.day()
    }

    /// ISO day of week: Monday is 1, Sunday is 7.
    pub fn day_of_week(&self) -> u32 {
        self.0.weekday().number_from_monday()
    }

    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    // ── Arithmetic ──────────────────────────────────────────────────────

    /// Shift by `amount` units. Months and years clamp to the end of the
    /// target month, so `2020-01-31 + 1 month` is `2020-02-29`.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::OutOfRange`] if the result falls outside years
    /// 0000-9999.
    pub fn add(&self, amount: i64, unit: DateUnit) -> Result<Self> {
        let out_of_range = || DateError::OutOfRange(format!("{self} {amount:+} {unit}"));
        let shifted = match unit {
            DateUnit::Day => shift_days(self.0, amount),
            DateUnit::Week => amount.checked_mul(7).and_then(|days| shift_days(self.0, days)),
            DateUnit::Month => shift_months(self.0, amount),
            DateUnit::Year => amount
                .checked_mul(12)
                .and_then(|months| shift_months(self.0, months)),
        };
        shifted
            .ok_or_else(out_of_range)
            .and_then(|date| Self::try_from(date).map_err(|_| out_of_range()))
    }

    pub fn subtract(&self, amount: i64, unit: DateUnit) -> Result<Self> {
        let negated = amount
            .checked_neg()
            .ok_or_else(|| DateError::OutOfRange(format!("{self} - {amount} {unit}")))?;
        self.add(negated, unit)
    }

    /// Replace the month (1-based), keeping the day where it exists.
    ///
    /// The day clamps to the end of a shorter month. Months outside 1-12 roll
    /// into adjacent years: 13 is January of the next year.
    pub fn set_month(&self, month: i32) -> Result<Self> {
        self.add(i64::from(month) - i64::from(self.month()), DateUnit::Month)
    }

    /// Replace the day of the month. Overflow rolls into adjacent months:
    /// 0 is the last day of the previous month.
    pub fn set_day_of_month(&self, day: i32) -> Result<Self> {
        self.add(i64::from(day) - i64::from(self.day_of_month()), DateUnit::Day)
    }

    /// Move to `iso_weekday` (Monday = 1 … Sunday = 7) within the same ISO week.
    pub fn set_day_of_week(&self, iso_weekday: i32) -> Result<Self> {
        self.add(
            i64::from(iso_weekday) - i64::from(self.day_of_week()),
            DateUnit::Day,
        )
    }

    // ── Comparison ──────────────────────────────────────────────────────

    pub fn is_before(&self, other: &LocalDate) -> bool {
        self < other
    }

    pub fn is_after(&self, other: &LocalDate) -> bool {
        self > other
    }

    pub fn is_same(&self, other: &LocalDate) -> bool {
        self == other
    }

    pub fn is_same_or_before(&self, other: &LocalDate) -> bool {
        self <= other
    }

    pub fn is_same_or_after(&self, other: &LocalDate) -> bool {
        self >= other
    }

    /// Whole units from `other` to `self`, truncated toward zero.
    ///
    /// ```
    /// use recurring_date::{DateUnit, LocalDate};
    ///
    /// let a = LocalDate::new("2020-01-01").unwrap();
    /// let b = LocalDate::new("2021-01-01").unwrap();
    /// assert_eq!(a.diff(&b, DateUnit::Day), -366);
    /// assert_eq!(b.diff(&a, DateUnit::Year), 1);
    /// ```
    pub fn diff(&self, other: &LocalDate, unit: DateUnit) -> i64 {
        match unit {
            DateUnit::Day => self.days_since(other),
            DateUnit::Week => self.days_since(other) / 7,
            DateUnit::Month | DateUnit::Year => self.diff_fractional(other, unit).trunc() as i64,
        }
    }

    /// Signed, possibly fractional units from `other` to `self`.
    ///
    /// Months are measured from whichever date has the later day-of-month,
    /// so a month end that clamped (Jan 31 → Feb 29) counts as a whole month
    /// in both directions and `a.diff_fractional(b) == -b.diff_fractional(a)`.
    /// Years are months divided by twelve.
    pub fn diff_fractional(&self, other: &LocalDate, unit: DateUnit) -> f64 {
        match unit {
            DateUnit::Day => self.days_since(other) as f64,
            DateUnit::Week => self.days_since(other) as f64 / 7.0,
            DateUnit::Month => month_diff(self.0, other.0),
            DateUnit::Year => month_diff(self.0, other.0) / 12.0,
        }
    }

    /// Signed, possibly fractional count of `unit` steps taken from `anchor`
    /// to reach `self`.
    ///
    /// Unlike [`diff_fractional`](Self::diff_fractional) this is measured
    /// from `anchor` only. The result is an integer `k` exactly when
    /// `self == anchor.add(k, unit)`, and it increases strictly with `self`.
    /// Between two steps it interpolates linearly by days. For days and weeks
    /// the two measures agree.
    ///
    /// ```
    /// use recurring_date::{DateUnit, LocalDate};
    ///
    /// let anchor = LocalDate::new("2021-02-28").unwrap();
    /// let mar_28 = LocalDate::new("2021-03-28").unwrap();
    /// let mar_31 = LocalDate::new("2021-03-31").unwrap();
    /// assert_eq!(mar_28.steps_from(&anchor, DateUnit::Month), 1.0);
    /// assert!(mar_31.steps_from(&anchor, DateUnit::Month) > 1.0);
    /// ```
    pub fn steps_from(&self, anchor: &LocalDate, unit: DateUnit) -> f64 {
        match unit {
            DateUnit::Day | DateUnit::Week => self.diff_fractional(anchor, unit),
            DateUnit::Month => months_from_anchor(self.0, anchor.0),
            DateUnit::Year => months_from_anchor(self.0, anchor.0) / 12.0,
        }
    }

    fn days_since(&self, other: &LocalDate) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }

    // ── Formatting ──────────────────────────────────────────────────────

    /// Render with a template of moment-style tokens, e.g. `"DD MMM YYYY"`.
    ///
    /// See [`DateFormat`] for the supported set. Other templates are rendered
    /// token by token as well; unrecognized characters pass through.
    pub fn format(&self, template: &str) -> String {
        format::render(self.0, template)
    }

    pub fn format_as(&self, format: DateFormat) -> String {
        self.format(format.template())
    }
}

fn is_canonical_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == VALUE_LEN
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

fn days_in_month(year: i32, month: u32) -> i64 {
    let (next_year, next_month) = next_month(year, month);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map_or(31, |last_day| i64::from(last_day.day()))
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Whole months between the `(year, month)` of `a` and of `b`, i.e. `a - b`.
fn whole_months(a: NaiveDate, b: NaiveDate) -> i64 {
    (i64::from(a.year()) - i64::from(b.year())) * 12 + i64::from(a.month())
        - i64::from(b.month())
}

/// Months from `b` to `a` (i.e. `a - b`), possibly fractional.
fn month_diff(a: NaiveDate, b: NaiveDate) -> f64 {
    // Measure from the later day-of-month so a clamped month end is whole.
    if a.day() < b.day() {
        return -month_diff(b, a);
    }
    let whole = whole_months(b, a);

    // `a + whole months` lands in b's month on or after b.
    let anchor_day = i64::from(a.day()).min(days_in_month(b.year(), b.month()));
    let behind = i64::from(b.day()) - anchor_day;
    let adjust = if behind < 0 {
        let (prev_year, prev_month) = previous_month(b.year(), b.month());
        let prev_len = days_in_month(prev_year, prev_month);
        let span = prev_len - i64::from(a.day()).min(prev_len) + anchor_day;
        behind as f64 / span as f64
    } else {
        0.0
    };

    let months = -(whole as f64 + adjust);
    // No negative zero.
    if months == 0.0 {
        0.0
    } else {
        months
    }
}

/// Months stepped from `anchor` to reach `date`, possibly fractional.
fn months_from_anchor(date: NaiveDate, anchor: NaiveDate) -> f64 {
    let whole = whole_months(date, anchor);
    let (year, month) = (date.year(), date.month());
    let anchor_day = i64::from(anchor.day());

    // `anchor + whole months`, clamped into date's month.
    let step_day = anchor_day.min(days_in_month(year, month));
    let offset = i64::from(date.day()) - step_day;

    let span = match offset.cmp(&0) {
        Ordering::Equal => return whole as f64,
        Ordering::Greater => {
            let (next_year, next_month) = next_month(year, month);
            days_in_month(year, month) - step_day
                + anchor_day.min(days_in_month(next_year, next_month))
        }
        Ordering::Less => {
            let (prev_year, prev_month) = previous_month(year, month);
            let prev_len = days_in_month(prev_year, prev_month);
            prev_len - anchor_day.min(prev_len) + step_day
        }
    };
    whole as f64 + offset as f64 / span as f64
}

impl TryFrom<NaiveDate> for LocalDate {
    type Error = DateError;

    fn try_from(date: NaiveDate) -> Result<Self> {
        if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            Ok(Self(date))
        } else {
            Err(DateError::OutOfRange(date.to_string()))
        }
    }
}

impl From<LocalDate> for NaiveDate {
    fn from(date: LocalDate) -> Self {
        date.0
    }
}

impl FromStr for LocalDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl Serialize for LocalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LocalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(&value).map_err(serde::de::Error::custom)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> LocalDate {
        LocalDate::new(s).unwrap()
    }

    fn auckland() -> Tz {
        "Pacific/Auckland".parse().unwrap()
    }

    // ── construction ────────────────────────────────────────────────────

    #[test]
    fn test_new_round_trips_canonical_value() {
        for s in ["2020-01-01", "2020-02-29", "0000-01-01", "9999-12-31"] {
            assert_eq!(date(s).to_string(), s);
        }
    }

    #[test]
    fn test_new_rejects_non_canonical_shapes() {
        for s in [
            "",
            "2020-1-01",
            "20-01-01",
            "2020/01/01",
            "2020-01-01T00:00:00Z",
            " 2020-01-01",
            "2020-0a-01",
        ] {
            let err = LocalDate::new(s).unwrap_err();
            assert!(matches!(err, DateError::InvalidDate(_)), "{s}: {err}");
        }
    }

    #[test]
    fn test_new_rejects_impossible_days() {
        assert!(LocalDate::new("2021-02-29").is_err());
        assert!(LocalDate::new("2020-13-01").is_err());
        assert!(LocalDate::new("2020-04-31").is_err());
        let err = LocalDate::new("2020-00-10").unwrap_err().to_string();
        assert!(err.contains("2020-00-10"), "got: {err}");
    }

    #[test]
    fn test_from_timestamp_text_keeps_embedded_offset() {
        let result =
            LocalDate::from_text("2021-03-02T20:00:00Z", FromOptions::default(), auckland())
                .unwrap();
        assert_eq!(result.to_string(), "2021-03-02");
    }

    #[test]
    fn test_from_timestamp_text_projects_into_default_zone() {
        // Auckland is UTC+13 in March, so 20:00 UTC is already the next morning.
        let options = FromOptions {
            keep_time_zone: false,
        };
        let result = LocalDate::from_text("2021-03-02T20:00:00Z", options, auckland()).unwrap();
        assert_eq!(result.to_string(), "2021-03-03");
    }

    #[test]
    fn test_from_text_without_offset_takes_leading_date() {
        let options = FromOptions {
            keep_time_zone: false,
        };
        let result = LocalDate::from_text("2021-03-02T20:00:00", options, auckland()).unwrap();
        assert_eq!(result.to_string(), "2021-03-02");
    }

    #[test]
    fn test_from_zoned_date_time() {
        let dt = DateTime::parse_from_rfc3339("2021-03-02T23:30:00-05:00").unwrap();
        let kept = LocalDate::from_source(dt.into(), FromOptions::default(), Tz::UTC).unwrap();
        assert_eq!(kept.to_string(), "2021-03-02");

        let projected = LocalDate::from_source(
            dt.into(),
            FromOptions {
                keep_time_zone: false,
            },
            Tz::UTC,
        )
        .unwrap();
        assert_eq!(projected.to_string(), "2021-03-03");
    }

    #[test]
    fn test_from_instant_uses_zone() {
        let instant = Utc.with_ymd_and_hms(2021, 3, 2, 20, 0, 0).unwrap();
        assert_eq!(
            LocalDate::from_instant(instant, Tz::UTC).unwrap().to_string(),
            "2021-03-02"
        );
        assert_eq!(
            LocalDate::from_instant(instant, auckland()).unwrap().to_string(),
            "2021-03-03"
        );
    }

    #[test]
    fn test_from_date_source_is_identity() {
        let a = date("2020-01-01");
        let result = LocalDate::from_source(a.into(), FromOptions::default(), Tz::UTC).unwrap();
        assert_eq!(result, a);
    }

    #[test]
    fn test_today_yesterday_tomorrow_at() {
        let now = Utc.with_ymd_and_hms(2020, 9, 27, 10, 0, 0).unwrap();
        assert_eq!(LocalDate::today_at(now, Tz::UTC).unwrap(), date("2020-09-27"));
        assert_eq!(
            LocalDate::yesterday_at(now, Tz::UTC).unwrap(),
            date("2020-09-26")
        );
        assert_eq!(
            LocalDate::tomorrow_at(now, Tz::UTC).unwrap(),
            date("2020-09-28")
        );
        // 10:00 UTC is 23:00 in Auckland (UTC+13 from late September).
        assert_eq!(
            LocalDate::today_at(now, auckland()).unwrap(),
            date("2020-09-27")
        );
    }

    #[test]
    fn test_try_from_naive_date_enforces_four_digit_years() {
        let too_late = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        assert!(matches!(
            LocalDate::try_from(too_late),
            Err(DateError::OutOfRange(_))
        ));
        let fine = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(NaiveDate::from(LocalDate::try_from(fine).unwrap()), fine);
    }

    // ── min / max / compare ─────────────────────────────────────────────

    #[test]
    fn test_min_returns_earlier_date() {
        let a = date("2020-01-01");
        let b = date("2021-01-01");
        assert_eq!(LocalDate::min([]), None);
        assert_eq!(LocalDate::min([a]), Some(a));
        assert_eq!(LocalDate::min([a, b]), Some(a));
        assert_eq!(LocalDate::min([b, a]), Some(a));
    }

    #[test]
    fn test_max_returns_later_date() {
        let a = date("2020-01-01");
        let b = date("2021-01-01");
        assert_eq!(LocalDate::max([]), None);
        assert_eq!(LocalDate::max([b]), Some(b));
        assert_eq!(LocalDate::max([b, a]), Some(b));
        assert_eq!(LocalDate::max([a, b]), Some(b));
    }

    #[test]
    fn test_compare_sorts_ascending() {
        let a = date("2020-01-01");
        let b = date("2021-01-01");
        let mut dates = vec![b, a];
        dates.sort_by(LocalDate::compare);
        assert_eq!(dates, vec![a, b]);
    }

    #[test]
    fn test_comparisons_are_by_day() {
        let a = date("2020-01-01");
        let b = date("2020-01-02");
        assert!(a.is_before(&b));
        assert!(b.is_after(&a));
        assert!(a.is_same(&date("2020-01-01")));
        assert!(a.is_same_or_before(&a));
        assert!(a.is_same_or_before(&b));
        assert!(b.is_same_or_after(&a));
        assert!(!a.is_same_or_after(&b));
    }

    // ── diff ────────────────────────────────────────────────────────────

    #[test]
    fn test_diff_defaults_to_days_across_leap_year() {
        let a = date("2020-01-01");
        let b = date("2021-01-01");
        assert_eq!(a.diff(&b, DateUnit::Day), -366);
        assert_eq!(b.diff(&a, DateUnit::Day), 366);
    }

    #[test]
    fn test_diff_weeks_truncates_toward_zero() {
        let a = date("2020-01-01");
        assert_eq!(date("2020-01-10").diff(&a, DateUnit::Week), 1);
        assert_eq!(a.diff(&date("2020-01-10"), DateUnit::Week), -1);
        let fractional = date("2020-01-11").diff_fractional(&a, DateUnit::Week);
        assert!((fractional - 10.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_diff_months_whole_and_fractional() {
        let a = date("2020-01-15");
        assert_eq!(date("2020-03-15").diff_fractional(&a, DateUnit::Month), 2.0);
        assert_eq!(a.diff_fractional(&date("2020-03-15"), DateUnit::Month), -2.0);
        let partial = date("2020-02-01").diff_fractional(&a, DateUnit::Month);
        assert!(partial > 0.0 && partial < 1.0, "got {partial}");
        assert_eq!(date("2020-02-01").diff(&a, DateUnit::Month), 0);
    }

    #[test]
    fn test_diff_months_treats_clamped_month_end_as_whole() {
        let jan_31 = date("2020-01-31");
        assert_eq!(date("2020-02-29").diff_fractional(&jan_31, DateUnit::Month), 1.0);
        assert_eq!(date("2020-04-30").diff_fractional(&jan_31, DateUnit::Month), 3.0);
        assert_eq!(jan_31.diff_fractional(&date("2020-02-29"), DateUnit::Month), -1.0);
        assert_ne!(
            date("2020-02-28")
                .diff_fractional(&jan_31, DateUnit::Month)
                .fract(),
            0.0
        );
    }

    #[test]
    fn test_diff_years_from_leap_day() {
        let leap = date("2020-02-29");
        assert_eq!(date("2021-02-28").diff_fractional(&leap, DateUnit::Year), 1.0);
        assert_eq!(date("2024-02-29").diff_fractional(&leap, DateUnit::Year), 4.0);
        assert_ne!(
            date("2021-03-01")
                .diff_fractional(&leap, DateUnit::Year)
                .fract(),
            0.0
        );
        assert_eq!(date("2021-03-01").diff(&leap, DateUnit::Year), 1);
    }

    #[test]
    fn test_steps_from_is_anchor_relative() {
        let feb_28 = date("2021-02-28");
        assert_eq!(date("2021-03-28").steps_from(&feb_28, DateUnit::Month), 1.0);
        assert_eq!(date("2021-01-28").steps_from(&feb_28, DateUnit::Month), -1.0);
        for day in ["2021-03-29", "2021-03-30", "2021-03-31"] {
            let steps = date(day).steps_from(&feb_28, DateUnit::Month);
            assert!(steps > 1.0 && steps < 2.0, "{day}: {steps}");
        }
        // The symmetric measure treats Mar 31 - 1 month = Feb 28 as whole.
        assert_eq!(
            date("2021-03-31").diff_fractional(&feb_28, DateUnit::Month),
            1.0
        );
    }

    #[test]
    fn test_steps_from_month_end_anchor() {
        let jan_31 = date("2020-01-31");
        assert_eq!(date("2020-02-29").steps_from(&jan_31, DateUnit::Month), 1.0);
        assert_eq!(date("2020-03-31").steps_from(&jan_31, DateUnit::Month), 2.0);
        assert_eq!(date("2019-11-30").steps_from(&jan_31, DateUnit::Month), -2.0);
        let early_march = date("2020-03-01").steps_from(&jan_31, DateUnit::Month);
        assert!(early_march > 1.0 && early_march < 2.0, "got {early_march}");
        assert_eq!(date("2021-01-31").steps_from(&jan_31, DateUnit::Year), 1.0);
    }

    #[test]
    fn test_steps_from_days_and_weeks_match_diff() {
        let a = date("2020-01-01");
        let b = date("2020-03-17");
        for unit in [DateUnit::Day, DateUnit::Week] {
            assert_eq!(b.steps_from(&a, unit), b.diff_fractional(&a, unit));
        }
    }

    // ── arithmetic ──────────────────────────────────────────────────────

    #[test]
    fn test_add_each_unit() {
        let a = date("2020-01-31");
        assert_eq!(a.add(1, DateUnit::Day).unwrap(), date("2020-02-01"));
        assert_eq!(a.add(2, DateUnit::Week).unwrap(), date("2020-02-14"));
        assert_eq!(a.add(1, DateUnit::Month).unwrap(), date("2020-02-29"));
        assert_eq!(a.add(-2, DateUnit::Month).unwrap(), date("2019-11-30"));
        assert_eq!(
            date("2020-02-29").add(1, DateUnit::Year).unwrap(),
            date("2021-02-28")
        );
    }

    #[test]
    fn test_subtract_is_negated_add() {
        let a = date("2020-03-31");
        assert_eq!(a.subtract(1, DateUnit::Month).unwrap(), date("2020-02-29"));
        assert_eq!(a.subtract(1, DateUnit::Day).unwrap(), date("2020-03-30"));
        assert_eq!(
            a.subtract(-1, DateUnit::Week).unwrap(),
            a.add(1, DateUnit::Week).unwrap()
        );
    }

    #[test]
    fn test_add_out_of_range_errors() {
        let last = date("9999-12-31");
        assert!(matches!(
            last.add(1, DateUnit::Day),
            Err(DateError::OutOfRange(_))
        ));
        assert!(date("0000-01-01").subtract(1, DateUnit::Year).is_err());
        assert!(last.add(i64::MAX, DateUnit::Week).is_err());
        assert!(last.subtract(i64::MIN, DateUnit::Day).is_err());
    }

    #[test]
    fn test_set_month_clamps_and_rolls() {
        let a = date("2020-01-31");
        assert_eq!(a.set_month(2).unwrap(), date("2020-02-29"));
        assert_eq!(a.set_month(12).unwrap(), date("2020-12-31"));
        assert_eq!(a.set_month(13).unwrap(), date("2021-01-31"));
        assert_eq!(a.set_month(0).unwrap(), date("2019-12-31"));
    }

    #[test]
    fn test_set_day_of_month_rolls_over() {
        let a = date("2020-01-15");
        assert_eq!(a.set_day_of_month(1).unwrap(), date("2020-01-01"));
        assert_eq!(a.set_day_of_month(32).unwrap(), date("2020-02-01"));
        assert_eq!(a.set_day_of_month(0).unwrap(), date("2019-12-31"));
    }

    #[test]
    fn test_set_day_of_week_stays_in_iso_week() {
        // 2020-01-01 is a Wednesday.
        let wed = date("2020-01-01");
        assert_eq!(wed.day_of_week(), 3);
        assert_eq!(wed.set_day_of_week(1).unwrap(), date("2019-12-30"));
        assert_eq!(wed.set_day_of_week(7).unwrap(), date("2020-01-05"));
        let sun = date("2020-01-05");
        assert_eq!(sun.set_day_of_week(1).unwrap(), date("2019-12-30"));
        assert_eq!(sun.set_day_of_week(8).unwrap(), date("2020-01-06"));
    }

    // ── units ───────────────────────────────────────────────────────────

    #[test]
    fn test_unit_aliases() {
        for (s, unit) in [
            ("day", DateUnit::Day),
            ("days", DateUnit::Day),
            ("d", DateUnit::Day),
            ("weeks", DateUnit::Week),
            ("w", DateUnit::Week),
            ("month", DateUnit::Month),
            ("M", DateUnit::Month),
            ("years", DateUnit::Year),
            ("y", DateUnit::Year),
        ] {
            assert_eq!(s.parse::<DateUnit>().unwrap(), unit);
        }
        assert!(matches!(
            "m".parse::<DateUnit>(),
            Err(DateError::UnknownUnit(_))
        ));
    }

    // ── format / serde ──────────────────────────────────────────────────

    #[test]
    fn test_format_without_template_is_value_form() {
        let a = date("2020-01-01");
        assert_eq!(a.format(LOCAL_DATE_VALUE_FORMAT), "2020-01-01");
        assert_eq!(a.format_as(DateFormat::IsoDate), "2020-01-01");
    }

    #[test]
    fn test_format_type_can_be_customized() {
        let a = date("2020-01-01");
        assert_eq!(a.format("DD MMM YYYY"), "01 Jan 2020");
        assert_eq!(a.format_as(DateFormat::DayMonthYearPadded), "01 Jan 2020");
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let a = date("2020-02-29");
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"2020-02-29\"");
        let back: LocalDate = serde_json::from_str("\"2020-02-29\"").unwrap();
        assert_eq!(back, a);
        assert!(serde_json::from_str::<LocalDate>("\"2020-02-30\"").is_err());
    }
}
