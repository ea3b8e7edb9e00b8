//! Default time zone configuration.
//!
//! A [`LocalDate`] only needs a time zone when it is taken from an instant:
//! `today`, `yesterday`, `tomorrow`, or a timestamp projected with
//! `keep_time_zone: false`. Instead of an ambient global, callers hold a
//! [`DefaultTimeZoneRef`] and pass it where that zone is needed.

use std::sync::{Arc, PoisonError, RwLock};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{DateError, Result};
use crate::local_date::{DateSource, FromOptions, LocalDate};

/// Serializable settings, typically loaded once at process start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    /// IANA name of the zone used when none is given explicitly.
    pub default_time_zone: String,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            default_time_zone: "UTC".to_string(),
        }
    }
}

impl DateConfig {
    /// Parse settings from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidConfig`] if `json` is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DateError::InvalidConfig(e.to_string()))
    }

    /// The configured default zone.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidTimezone`] if the name is not a known IANA zone.
    pub fn time_zone(&self) -> Result<Tz> {
        parse_timezone(&self.default_time_zone)
    }
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| DateError::InvalidTimezone(format!("'{}'", s)))
}

/// Shared handle to the current default time zone.
///
/// Clones share the same zone. A [`set`](Self::set) through any clone is seen
/// by the next [`current`](Self::current) on every clone. Writers are not
/// ordered with respect to each other.
#[derive(Debug, Clone)]
pub struct DefaultTimeZoneRef {
    zone: Arc<RwLock<Tz>>,
}

impl Default for DefaultTimeZoneRef {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl DefaultTimeZoneRef {
    pub fn new(zone: Tz) -> Self {
        Self {
            zone: Arc::new(RwLock::new(zone)),
        }
    }

    pub fn from_config(config: &DateConfig) -> Result<Self> {
        Ok(Self::new(config.time_zone()?))
    }

    pub fn current(&self) -> Tz {
        // `Tz` is `Copy`, so a poisoned lock still holds a usable value.
        *self.zone.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Override the default zone for every holder of this handle.
    pub fn set(&self, zone: Tz) {
        let mut current = self.zone.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(from = current.name(), to = zone.name(), "default time zone changed");
        *current = zone;
    }

    pub fn today(&self) -> Result<LocalDate> {
        LocalDate::today(self.current())
    }

    pub fn yesterday(&self) -> Result<LocalDate> {
        LocalDate::yesterday(self.current())
    }

    pub fn tomorrow(&self) -> Result<LocalDate> {
        LocalDate::tomorrow(self.current())
    }

    /// [`LocalDate::from_source`] with this handle's current zone.
    pub fn local_date<'a>(
        &self,
        source: impl Into<DateSource<'a>>,
        options: FromOptions,
    ) -> Result<LocalDate> {
        LocalDate::from_source(source.into(), options, self.current())
    }
}
