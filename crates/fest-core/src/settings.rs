//! The settings store.
//!
//! Settings travel inside the state text as `Setting<TAB>name<TAB>value`
//! lines, so the store is a flat map of strings.  Lookups fall back to the
//! documented defaults below.  Code that needs typed values calls
//! [`Settings::snapshot`], which validates every known key, clamps it into a
//! sane range and writes the clamped value back so that the next encode
//! persists the corrected value.
//!
//! | Key                    | Default | Range                       |
//! |------------------------|---------|-----------------------------|
//! | `WalkingSpeedKmh`      | 4       | 0.1 ..= light speed         |
//! | `LineupMinutes`        | 10      | 0 ..= 1440                  |
//! | `DefaultShowMinutes`   | 60      | 1 ..= 1440                  |
//! | `DefaultTravelMinutes` | 15      | 0 ..= 1440                  |
//! | `NewDayGapHours`       | 5       | 1 ..= 168                   |
//! | `TabOnly`              | false   | flag                        |
//! | `ShowPaths`            | true    | flag                        |
//! | `LastUpdate`           | 0       | 0 ..                        |
//!
//! Unknown keys are kept verbatim; the rendering layer may use them.

use std::collections::BTreeMap;

use tracing::debug;

use crate::time::{SECS_PER_HOUR, SECS_PER_MINUTE};
use crate::{FestError, FestResult};

/// Setting names understood by the engine.
pub mod keys {
    pub const WALKING_SPEED_KMH:      &str = "WalkingSpeedKmh";
    pub const LINEUP_MINUTES:         &str = "LineupMinutes";
    pub const DEFAULT_SHOW_MINUTES:   &str = "DefaultShowMinutes";
    pub const DEFAULT_TRAVEL_MINUTES: &str = "DefaultTravelMinutes";
    pub const NEW_DAY_GAP_HOURS:      &str = "NewDayGapHours";
    pub const TAB_ONLY:               &str = "TabOnly";
    pub const SHOW_PATHS:             &str = "ShowPaths";
    pub const LAST_UPDATE:            &str = "LastUpdate";
}

const DEFAULTS: [(&str, &str); 8] = [
    (keys::WALKING_SPEED_KMH,      "4"),
    (keys::LINEUP_MINUTES,         "10"),
    (keys::DEFAULT_SHOW_MINUTES,   "60"),
    (keys::DEFAULT_TRAVEL_MINUTES, "15"),
    (keys::NEW_DAY_GAP_HOURS,      "5"),
    (keys::TAB_ONLY,               "false"),
    (keys::SHOW_PATHS,             "true"),
    (keys::LAST_UPDATE,            "0"),
];

/// Slowest accepted walking speed; keeps `metres / speed` finite.
pub const MIN_WALKING_SPEED_KMH: f64 = 0.1;
/// Nobody walks faster than light.
pub const MAX_WALKING_SPEED_KMH: f64 = 1_079_252_848.8;

/// Longest duration, in minutes, any minute-valued setting or show may take.
pub const MAX_MINUTES: f64 = 24.0 * 60.0;

// ── SettingsSnapshot ──────────────────────────────────────────────────────────

/// Validated, typed view of the settings the engine itself consumes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettingsSnapshot {
    pub walking_speed_kmh:   f64,
    pub lineup_secs:         i64,
    pub default_show_secs:   i64,
    pub default_travel_secs: i64,
    pub new_day_gap_secs:    i64,
    pub tab_only:            bool,
    pub show_paths:          bool,
    pub last_update:         i64,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Settings::new().snapshot()
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// String-keyed settings with documented defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The documented default for `key`, if it is a known setting.
    pub fn default_for(key: &str) -> Option<&'static str> {
        DEFAULTS.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// Current value: the explicit value if set, else the default, else `""`.
    pub fn get(&self, key: &str) -> &str {
        self.values
            .get(key)
            .map(String::as_str)
            .or_else(|| Self::default_for(key))
            .unwrap_or("")
    }

    /// Only the explicitly stored value.
    pub fn explicit(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Explicitly stored entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read the tab-only flag without clamping anything.  The codec calls
    /// this on every line because a `Setting` line may flip it mid-parse.
    pub fn tab_only(&self) -> bool {
        parse_flag(keys::TAB_ONLY, self.get(keys::TAB_ONLY)).unwrap_or(false)
    }

    /// Default duration for newly created shows, in seconds.
    pub fn default_show_secs(&mut self) -> i64 {
        self.minutes(keys::DEFAULT_SHOW_MINUTES, 1.0, MAX_MINUTES)
    }

    /// Validate every known key, write clamped values back, and return the
    /// typed view.
    pub fn snapshot(&mut self) -> SettingsSnapshot {
        let walking_speed_kmh = self.clamped(
            keys::WALKING_SPEED_KMH,
            MIN_WALKING_SPEED_KMH,
            MAX_WALKING_SPEED_KMH,
        );
        SettingsSnapshot {
            walking_speed_kmh,
            lineup_secs:         self.minutes(keys::LINEUP_MINUTES, 0.0, MAX_MINUTES),
            default_show_secs:   self.minutes(keys::DEFAULT_SHOW_MINUTES, 1.0, MAX_MINUTES),
            default_travel_secs: self.minutes(keys::DEFAULT_TRAVEL_MINUTES, 0.0, MAX_MINUTES),
            new_day_gap_secs:    (self.clamped(keys::NEW_DAY_GAP_HOURS, 1.0, 168.0)
                * SECS_PER_HOUR as f64)
                .round() as i64,
            tab_only:            self.flag(keys::TAB_ONLY),
            show_paths:          self.flag(keys::SHOW_PATHS),
            last_update:         self.clamped(keys::LAST_UPDATE, 0.0, i64::MAX as f64) as i64,
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn minutes(&mut self, key: &str, lo: f64, hi: f64) -> i64 {
        (self.clamped(key, lo, hi) * SECS_PER_MINUTE as f64).round() as i64
    }

    /// Parse `key` as a number within `[lo, hi]`.  Explicit values that fail
    /// to parse are replaced by the default; out-of-range ones are clamped.
    /// Either correction is written back.
    fn clamped(&mut self, key: &str, lo: f64, hi: f64) -> f64 {
        let default: f64 = Self::default_for(key)
            .and_then(|d| d.parse().ok())
            .unwrap_or(lo);
        let Some(raw) = self.values.get(key) else {
            return default;
        };
        let parsed = parse_number(key, raw);
        let value = match parsed {
            Ok(v) => v.clamp(lo, hi),
            Err(_) => default,
        };
        if parsed.as_ref().ok() != Some(&value) {
            debug!(key, raw = raw.as_str(), value, "setting clamped");
            self.values.insert(key.to_owned(), format_number(value));
        }
        value
    }

    fn flag(&mut self, key: &str) -> bool {
        let default = Self::default_for(key)
            .and_then(|d| parse_flag(key, d).ok())
            .unwrap_or(false);
        let Some(raw) = self.values.get(key) else {
            return default;
        };
        match parse_flag(key, raw) {
            Ok(v) => v,
            Err(_) => {
                debug!(key, raw = raw.as_str(), "unrecognised flag reset to default");
                self.values.insert(key.to_owned(), default.to_string());
                default
            }
        }
    }
}

/// Parse a boolean setting value.  Accepts the spellings a form or a hand
/// edit is likely to produce.
pub fn parse_flag(key: &str, raw: &str) -> FestResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" | "" => Ok(false),
        _ => Err(FestError::InvalidSetting { key: key.to_owned(), value: raw.to_owned() }),
    }
}

fn parse_number(key: &str, raw: &str) -> FestResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FestError::InvalidSetting { key: key.to_owned(), value: raw.to_owned() })
}

/// Format a number the way it is stored: integers without a fraction.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}
