//! Time-of-day value type.
//!
//! Settlement and execution times are compared numerically (minutes since
//! midnight), never as strings, so `"9:00"` and `"09:00"` are the same instant.

use core::fmt;
use core::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time with minute precision. Serialized as zero-padded `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Unchecked constructor for compile-time constants.
    ///
    /// Out-of-range input is clamped to 23:59.
    pub const fn hm(hour: u16, minute: u16) -> Self {
        let total = hour.saturating_mul(60).saturating_add(minute);
        if total >= MINUTES_PER_DAY {
            Self(MINUTES_PER_DAY - 1)
        } else {
            Self(total)
        }
    }

    pub fn new(hour: u32, minute: u32) -> DomainResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(DomainError::validation(format!(
                "time of day out of range: {hour}:{minute:02}"
            )));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.0 % 60)
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }
}

impl ValueObject for TimeOfDay {}

impl From<NaiveTime> for TimeOfDay {
    fn from(value: NaiveTime) -> Self {
        Self((value.hour() * 60 + value.minute()) as u16)
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    /// Accepts `H:MM`, `HH:MM` and `HH:MM:SS` (seconds are dropped).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::validation(format!("malformed time of day {s:?}"));

        let mut parts = s.trim().split(':');
        let hour = parts.next().ok_or_else(malformed)?;
        let minute = parts.next().ok_or_else(malformed)?;
        if let Some(second) = parts.next() {
            let second: u32 = second.parse().map_err(|_| malformed())?;
            if second > 59 {
                return Err(malformed());
            }
        }
        if parts.next().is_some() || minute.len() != 2 || hour.is_empty() || hour.len() > 2 {
            return Err(malformed());
        }

        let hour: u32 = hour.parse().map_err(|_| malformed())?;
        let minute: u32 = minute.parse().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}
