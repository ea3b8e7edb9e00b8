//! Template rendering for [`LocalDate`](crate::LocalDate).
//!
//! Templates use moment-style tokens:
//!
//! | Token  | Output                   |
//! |--------|--------------------------|
//! | `YYYY` | 4-digit year             |
//! | `YY`   | 2-digit year             |
//! | `MMMM` | full month name          |
//! | `MMM`  | abbreviated month name   |
//! | `MM`   | zero-padded month        |
//! | `M`    | month                    |
//! | `DD`   | zero-padded day          |
//! | `Do`   | ordinal day (`1st`)      |
//! | `D`    | day                      |
//! | `dddd` | full weekday name        |
//! | `ddd`  | abbreviated weekday name |
//!
//! Text inside `[...]` is copied literally. Any other character passes through.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::DateError;

/// Longest tokens first so `MMMM` is not read as `MMM` + `M`.
const TOKENS: [&str; 11] = [
    "YYYY", "MMMM", "dddd", "MMM", "ddd", "YY", "MM", "DD", "Do", "M", "D",
];

/// The supported set of date templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `D` → `1`
    Day,
    /// `MMM` → `Jan`
    MonthShort,
    /// `D MMM` → `1 Jan`
    DayMonth,
    /// `DD MMM` → `01 Jan`
    DayMonthPadded,
    /// `DD MMMM` → `01 January`
    DayMonthLong,
    /// `DD MMM YY` → `01 Jan 20`
    DayMonthShortYear,
    /// `D MMM YYYY` → `1 Jan 2020`
    DayMonthYear,
    /// `DD MMMM YYYY` → `01 January 2020`
    DayMonthLongYear,
    /// `DD MMM YYYY` → `01 Jan 2020`
    DayMonthYearPadded,
    /// `YYYY-MM-DD` → `2020-01-01`
    IsoDate,
    /// `DD/MM/YYYY` → `01/01/2020`
    SlashDate,
    /// `Do [of] MMMM YYYY` → `1st of January 2020`
    OrdinalOfMonthYear,
}

impl DateFormat {
    pub const ALL: [DateFormat; 12] = [
        Self::Day,
        Self::MonthShort,
        Self::DayMonth,
        Self::DayMonthPadded,
        Self::DayMonthLong,
        Self::DayMonthShortYear,
        Self::DayMonthYear,
        Self::DayMonthLongYear,
        Self::DayMonthYearPadded,
        Self::IsoDate,
        Self::SlashDate,
        Self::OrdinalOfMonthYear,
    ];

    pub fn template(self) -> &'static str {
        match self {
            Self::Day => "D",
            Self::MonthShort => "MMM",
            Self::DayMonth => "D MMM",
            Self::DayMonthPadded => "DD MMM",
            Self::DayMonthLong => "DD MMMM",
            Self::DayMonthShortYear => "DD MMM YY",
            Self::DayMonthYear => "D MMM YYYY",
            Self::DayMonthLongYear => "DD MMMM YYYY",
            Self::DayMonthYearPadded => "DD MMM YYYY",
            Self::IsoDate => "YYYY-MM-DD",
            Self::SlashDate => "DD/MM/YYYY",
            Self::OrdinalOfMonthYear => "Do [of] MMMM YYYY",
        }
    }
}

impl FromStr for DateFormat {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.template() == s)
            .ok_or_else(|| DateError::NotImplemented(format!("date format '{s}'")))
    }
}

/// Render `date` with `template`.
pub(crate) fn render(date: NaiveDate, template: &str) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;

    while let Some(ch) = rest.chars().next() {
        if ch == '[' {
            if let Some(close) = rest.find(']') {
                out.push_str(&rest[1..close]);
                rest = &rest[close + 1..];
                continue;
            }
        }

        if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
            out.push_str(&render_token(date, token));
            rest = &rest[token.len()..];
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    out
}

fn render_token(date: NaiveDate, token: &str) -> String {
    match token {
        "YYYY" => format!("{:04}", date.year()),
        "YY" => format!("{:02}", date.year().rem_euclid(100)),
        "MMMM" => date.format("%B").to_string(),
        "MMM" => date.format("%b").to_string(),
        "MM" => format!("{:02}", date.month()),
        "M" => date.month().to_string(),
        "DD" => format!("{:02}", date.day()),
        "Do" => ordinal(date.day()),
        "D" => date.day().to_string(),
        "dddd" => date.format("%A").to_string(),
        "ddd" => date.format("%a").to_string(),
        other => other.to_string(),
    }
}

/// English ordinal: `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`.
pub(crate) fn ordinal(n: u32) -> String {
    let suffix = if (n % 100) / 10 == 1 {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_every_supported_format() {
        let date = day(2020, 1, 1);
        let expected = [
            "1",
            "Jan",
            "1 Jan",
            "01 Jan",
            "01 January",
            "01 Jan 20",
            "1 Jan 2020",
            "01 January 2020",
            "01 Jan 2020",
            "2020-01-01",
            "01/01/2020",
            "1st of January 2020",
        ];
        for (format, want) in DateFormat::ALL.into_iter().zip(expected) {
            assert_eq!(render(date, format.template()), want, "{format:?}");
        }
    }

    #[test]
    fn test_weekday_tokens() {
        // 2020-01-01 was a Wednesday.
        assert_eq!(render(day(2020, 1, 1), "dddd"), "Wednesday");
        assert_eq!(render(day(2020, 1, 1), "ddd D"), "Wed 1");
    }

    #[test]
    fn test_unknown_template_passes_through() {
        assert_eq!(render(day(2020, 3, 9), "M/D"), "3/9");
        assert_eq!(render(day(2020, 3, 9), "Q% x"), "Q% x");
        assert_eq!(render(day(2020, 3, 9), "[YYYY] YYYY"), "YYYY 2020");
        assert_eq!(render(day(2020, 3, 9), "[unclosed"), "[unclosed");
    }

    #[test]
    fn test_ordinals() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (31, "31st"),
        ];
        for (n, want) in cases {
            assert_eq!(ordinal(n), want);
        }
    }

    #[test]
    fn test_date_format_from_str() {
        assert_eq!(
            "DD MMM YYYY".parse::<DateFormat>().unwrap(),
            DateFormat::DayMonthYearPadded
        );
        assert!("HH:mm".parse::<DateFormat>().is_err());
    }
}
