//! Recurrence frequencies and their fixed period lengths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DateError;
use crate::local_date::DateUnit;

/// How often a [`RecurringDate`](crate::RecurringDate) repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Fortnightly,
    Monthly,
    Annually,
}

/// A fixed step: `number` × `unit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    pub number: i64,
    pub unit: DateUnit,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Self::Daily,
        Self::Weekly,
        Self::Fortnightly,
        Self::Monthly,
        Self::Annually,
    ];

    /// The period between consecutive occurrences.
    pub fn period(self) -> Period {
        let (number, unit) = match self {
            Self::Daily => (1, DateUnit::Day),
            Self::Weekly => (1, DateUnit::Week),
            Self::Fortnightly => (2, DateUnit::Week),
            Self::Monthly => (1, DateUnit::Month),
            Self::Annually => (1, DateUnit::Year),
        };
        Period { number, unit }
    }

    /// Compact suffix for prices and amounts, e.g. `/wk`.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Daily => "/day",
            Self::Weekly => "/wk",
            Self::Fortnightly => "/fn",
            Self::Monthly => "/mo",
            Self::Annually => "/yr",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Fortnightly => "fortnightly",
            Self::Monthly => "monthly",
            Self::Annually => "annually",
        }
    }
}

/// Render a frequency by its compact `/FF` suffix.
pub fn format_recurring_date_frequency(frequency: Frequency) -> &'static str {
    frequency.suffix()
}

impl FromStr for Frequency {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == s)
            .ok_or_else(|| DateError::UnknownFrequency(s.to_string()))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_lengths() {
        let periods: Vec<(i64, DateUnit)> = Frequency::ALL
            .into_iter()
            .map(|f| (f.period().number, f.period().unit))
            .collect();
        assert_eq!(
            periods,
            vec![
                (1, DateUnit::Day),
                (1, DateUnit::Week),
                (2, DateUnit::Week),
                (1, DateUnit::Month),
                (1, DateUnit::Year),
            ]
        );
    }

    #[test]
    fn test_suffixes() {
        let suffixes: Vec<&str> = Frequency::ALL
            .into_iter()
            .map(format_recurring_date_frequency)
            .collect();
        assert_eq!(suffixes, vec!["/day", "/wk", "/fn", "/mo", "/yr"]);
    }

    #[test]
    fn test_parse_and_display() {
        for frequency in Frequency::ALL {
            assert_eq!(frequency.to_string().parse::<Frequency>().unwrap(), frequency);
        }
        let err = "hourly".parse::<Frequency>().unwrap_err().to_string();
        assert!(err.contains("Unknown frequency: hourly"), "got: {err}");
    }

    #[test]
    fn test_serde_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&Frequency::Fortnightly).unwrap(),
            "\"fortnightly\""
        );
        let parsed: Frequency = serde_json::from_str("\"annually\"").unwrap();
        assert_eq!(parsed, Frequency::Annually);
        assert!(serde_json::from_str::<Frequency>("\"yearly\"").is_err());
    }
}
