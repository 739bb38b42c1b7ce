//! Wall-clock time model.
//!
//! # Design
//!
//! Festival times are local wall-clock times with no zone attached.  They
//! are stored as a `Stamp`: whole seconds since 1970-01-01 00:00 on that
//! same naive clock.  Using an integer as the canonical unit keeps all
//! schedule arithmetic exact and makes stamps usable in form control names
//! (`Event,<seconds>,<venue>`).
//!
//! Conversions go through `chrono::NaiveDateTime` treated as UTC, so no
//! daylight-saving shift is ever applied.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

use crate::{FestError, FestResult};

pub const SECS_PER_MINUTE: i64 = 60;
pub const SECS_PER_HOUR:   i64 = 3_600;
pub const SECS_PER_DAY:    i64 = 86_400;

// ── Stamp ─────────────────────────────────────────────────────────────────────

/// An absolute wall-clock time in seconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stamp(pub i64);

impl Stamp {
    pub const ZERO: Stamp = Stamp(0);

    /// Interpret a naive date-time as a stamp.
    pub fn from_naive(at: NaiveDateTime) -> Stamp {
        Stamp(at.and_utc().timestamp())
    }

    /// Back to a calendar date-time.
    pub fn to_naive(self) -> FestResult<NaiveDateTime> {
        DateTime::from_timestamp(self.0, 0)
            .map(|dt| dt.naive_utc())
            .ok_or(FestError::TimeOutOfRange(self.0))
    }

    /// Calendar date this stamp falls on.
    pub fn date(self) -> FestResult<NaiveDate> {
        self.to_naive().map(|dt| dt.date())
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is
    /// actually later).
    #[inline]
    pub fn since(self, earlier: Stamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Time-of-day text: `HH:MM`, or `HH:MM:SS` when seconds are non-zero.
    pub fn time_text(self) -> FestResult<String> {
        let at = self.to_naive()?;
        Ok(if at.second() == 0 {
            at.format("%H:%M").to_string()
        } else {
            at.format("%H:%M:%S").to_string()
        })
    }

    /// Date line text, e.g. `2024-06-20 Thursday`.
    pub fn date_text(self) -> FestResult<String> {
        Ok(self.to_naive()?.format("%Y-%m-%d %A").to_string())
    }

    /// Full date and time, e.g. `2024-06-20 19:00`.
    pub fn date_time_text(self) -> FestResult<String> {
        let at = self.to_naive()?;
        Ok(format!("{} {}", at.format("%Y-%m-%d"), self.time_text()?))
    }
}

impl std::ops::Add<i64> for Stamp {
    type Output = Stamp;
    #[inline]
    fn add(self, secs: i64) -> Stamp {
        Stamp(self.0.saturating_add(secs))
    }
}

impl std::ops::Sub for Stamp {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: Stamp) -> i64 {
        self.0.saturating_sub(rhs.0)
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date_time_text() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "@{}", self.0),
        }
    }
}

/// Render a signed duration in seconds as `[-]H:MM`, rounding towards zero.
pub fn duration_text(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let abs = secs.unsigned_abs();
    format!("{sign}{}:{:02}", abs / 3_600, (abs % 3_600) / 60)
}
