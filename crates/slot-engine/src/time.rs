//! Time-of-day arithmetic on `"HH:MM"` strings and minutes since midnight.
//!
//! Every comparison in the engine happens on integer minutes. Values are not
//! normalized across midnight: `minutes_to_time(1470)` is `"24:30"`, and any
//! tick past 24:00 is simply absent from every generated slot set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Minutes in one day. Parsed times may reach but not exceed this value.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time within a single day, stored as minutes since midnight.
///
/// Displays and serializes as a zero-padded `"HH:MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Build from raw minutes since midnight. No range check is applied.
    pub const fn from_minutes(minutes: u32) -> Self {
        TimeOfDay(minutes)
    }

    /// Build from an hour and minute pair.
    pub const fn hm(hours: u32, minutes: u32) -> Self {
        TimeOfDay(hours * 60 + minutes)
    }

    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Shift forward by `minutes`, without wrapping at midnight. Saturates at
    /// `u32::MAX` minutes.
    pub const fn add_minutes(self, minutes: u32) -> Self {
        TimeOfDay(self.0.saturating_add(minutes))
    }

    /// Shift backward by `minutes`. `None` when the result would precede 00:00.
    pub fn checked_sub_minutes(self, minutes: u32) -> Option<Self> {
        self.0.checked_sub(minutes).map(TimeOfDay)
    }

    /// 12-hour rendering used in confirmation text, e.g. `"2:30 PM"`.
    pub fn format_12h(self) -> String {
        let hours = self.0 / 60;
        let mins = self.0 % 60;
        let suffix = if hours >= 12 { "PM" } else { "AM" };
        let display_hour = match hours {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        format!("{}:{:02} {}", display_hour, mins, suffix)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SchedulerError::InvalidTime(s.to_string());

        let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
        let digits_ok = |part: &str, max_len: usize| {
            !part.is_empty() && part.len() <= max_len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits_ok(hours, 2) || minutes.len() != 2 || !digits_ok(minutes, 2) {
            return Err(invalid());
        }

        let hours: u32 = hours.parse().map_err(|_| invalid())?;
        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }

        let total = hours * 60 + minutes;
        if total > MINUTES_PER_DAY {
            return Err(invalid());
        }
        Ok(TimeOfDay(total))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = SchedulerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Parse `"HH:MM"` into minutes since midnight.
pub fn time_to_minutes(time: &str) -> Result<u32> {
    time.parse::<TimeOfDay>().map(TimeOfDay::minutes)
}

/// Format minutes since midnight as zero-padded `"HH:MM"`.
pub fn minutes_to_time(minutes: u32) -> String {
    TimeOfDay::from_minutes(minutes).to_string()
}

/// The time `duration` minutes after `start`, e.g. for `"10:00 - 11:00"` labels.
pub fn end_time(start: TimeOfDay, duration: u32) -> TimeOfDay {
    start.add_minutes(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_zero_padded() {
        let t: TimeOfDay = "09:05".parse().unwrap();
        assert_eq!(t.minutes(), 545);
        assert_eq!(t.to_string(), "09:05");
    }

    #[test]
    fn accepts_single_digit_hour() {
        assert_eq!(time_to_minutes("9:30").unwrap(), 570);
    }

    #[test]
    fn midnight_end_is_allowed() {
        assert_eq!(time_to_minutes("24:00").unwrap(), MINUTES_PER_DAY);
        assert!(time_to_minutes("24:30").is_err());
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "0900", "9:5", "09:60", "ab:cd", "09:00:00", "-1:00", "25:00"] {
            assert!(time_to_minutes(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn minutes_past_midnight_are_not_normalized() {
        assert_eq!(minutes_to_time(1470), "24:30");
    }

    #[test]
    fn twelve_hour_format() {
        assert_eq!(TimeOfDay::hm(14, 30).format_12h(), "2:30 PM");
        assert_eq!(TimeOfDay::hm(0, 15).format_12h(), "12:15 AM");
        assert_eq!(TimeOfDay::hm(12, 0).format_12h(), "12:00 PM");
        assert_eq!(TimeOfDay::hm(9, 0).format_12h(), "9:00 AM");
    }

    #[test]
    fn serde_uses_hh_mm_strings() {
        let t: TimeOfDay = serde_json::from_str("\"16:30\"").unwrap();
        assert_eq!(t, TimeOfDay::hm(16, 30));
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"16:30\"");
        assert!(serde_json::from_str::<TimeOfDay>("\"4pm\"").is_err());
    }
}
