//! Timetable time handling.
//!
//! Every time in a schedule is a wall-clock minute within a single day
//! (0 = 00:00, 1439 = 23:59). There is no date component and no
//! cross-midnight wraparound: a train that would run past midnight simply
//! produces a value of 1440 or more, and it is up to presentation code to
//! clamp it.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Number of minutes in a timetable day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A point in the timetable day, in minutes since midnight.
///
/// Arithmetic is unchecked against the end of the day: the stop scheduler
/// may legitimately compute arrivals beyond 23:59 and leaves the decision of
/// what to do with them to the caller. It saturates at the bounds of `i32`
/// instead of overflowing.
///
/// # Examples
///
/// ```
/// use timetable_engine::domain::Minutes;
///
/// let t = Minutes::parse_hhmm("08:15").unwrap();
/// assert_eq!(t.get(), 495);
/// assert_eq!(t.to_string(), "08:15");
///
/// let later = t + 50;
/// assert_eq!(later.to_string(), "09:05");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(i32);

impl Minutes {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: Minutes = Minutes(0);

    /// Create a time from a raw minute count.
    pub const fn new(minutes: i32) -> Self {
        Self(minutes)
    }

    /// Create a time from hours and minutes.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        Ok(Self((hour * 60 + minute) as i32))
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_engine::domain::Minutes;
    ///
    /// assert!(Minutes::parse_hhmm("00:00").is_ok());
    /// assert!(Minutes::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(Minutes::parse_hhmm("1430").is_err());
    /// assert!(Minutes::parse_hhmm("14:3").is_err());
    /// assert!(Minutes::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::from_hm(hour, minute)
    }

    /// Returns the raw minute count.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Returns true if the time lies within the timetable day (00:00 to 23:59).
    pub fn is_within_day(self) -> bool {
        (0..MINUTES_PER_DAY).contains(&self.0)
    }

    /// Clamp to the last representable minute of the day.
    ///
    /// This is a presentation helper. Scheduling code never calls it.
    pub fn clamp_to_day(self) -> Self {
        Self(self.0.clamp(0, MINUTES_PER_DAY - 1))
    }

    /// Absolute number of minutes between two times.
    pub fn abs_diff(self, other: Self) -> i32 {
        self.0.saturating_sub(other.0).saturating_abs()
    }

    /// As a floating point coordinate for geometry.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl From<NaiveTime> for Minutes {
    fn from(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as i32)
    }
}

impl Add<i32> for Minutes {
    type Output = Self;

    fn add(self, rhs: i32) -> Self::Output {
        Self(self.0.saturating_add(rhs))
    }
}

impl Sub for Minutes {
    type Output = i32;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}

impl fmt::Debug for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Minutes({} = {})", self.0, self)
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        assert_eq!(Minutes::parse_hhmm("00:00").unwrap().get(), 0);
        assert_eq!(Minutes::parse_hhmm("23:59").unwrap().get(), 1439);
        assert_eq!(Minutes::parse_hhmm("14:30").unwrap().get(), 870);
    }

    #[test]
    fn parse_invalid_format() {
        assert!(Minutes::parse_hhmm("1430").is_err());
        assert!(Minutes::parse_hhmm("14:300").is_err());
        assert!(Minutes::parse_hhmm("14-30").is_err());
        assert!(Minutes::parse_hhmm("ab:cd").is_err());
        assert!(Minutes::parse_hhmm("1a:30").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(Minutes::parse_hhmm("24:00").is_err());
        assert!(Minutes::parse_hhmm("12:60").is_err());
        assert!(Minutes::parse_hhmm("12:99").is_err());
    }

    #[test]
    fn display_format() {
        assert_eq!(Minutes::new(0).to_string(), "00:00");
        assert_eq!(Minutes::new(545).to_string(), "09:05");
        assert_eq!(Minutes::new(1439).to_string(), "23:59");
        // Past midnight is still printed, not wrapped
        assert_eq!(Minutes::new(1450).to_string(), "24:10");
    }

    #[test]
    fn day_bounds() {
        assert!(Minutes::new(0).is_within_day());
        assert!(Minutes::new(1439).is_within_day());
        assert!(!Minutes::new(1440).is_within_day());
        assert!(!Minutes::new(-1).is_within_day());

        assert_eq!(Minutes::new(1500).clamp_to_day(), Minutes::new(1439));
        assert_eq!(Minutes::new(-5).clamp_to_day(), Minutes::MIDNIGHT);
        assert_eq!(Minutes::new(600).clamp_to_day(), Minutes::new(600));
    }

    #[test]
    fn arithmetic() {
        let t = Minutes::new(600);
        assert_eq!(t + 12, Minutes::new(612));
        assert_eq!(Minutes::new(612) - t, 12);
        assert_eq!(t.abs_diff(Minutes::new(612)), 12);
        assert_eq!(Minutes::new(612).abs_diff(t), 12);
    }

    #[test]
    fn arithmetic_saturates() {
        let late = Minutes::new(i32::MAX - 5);
        assert_eq!(late + 60, Minutes::new(i32::MAX));
        assert_eq!(Minutes::new(600) + i32::MAX, Minutes::new(i32::MAX));
        assert_eq!(Minutes::new(i32::MIN + 1) + -10, Minutes::new(i32::MIN));

        assert_eq!(late - Minutes::new(-100), i32::MAX);
        assert_eq!(Minutes::new(i32::MIN).abs_diff(Minutes::new(i32::MAX)), i32::MAX);
        assert_eq!(Minutes::new(i32::MIN).to_string(), "-35791394:08");
    }

    #[test]
    fn from_wall_clock() {
        let naive = NaiveTime::from_hms_opt(8, 15, 42).unwrap();
        assert_eq!(Minutes::from(naive), Minutes::new(8 * 60 + 15));
        let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        assert_eq!(Minutes::from(midnight), Minutes::MIDNIGHT);
    }

    #[test]
    fn serde_is_a_plain_number() {
        let json = serde_json::to_string(&Minutes::new(75)).unwrap();
        assert_eq!(json, "75");
        let back: Minutes = serde_json::from_str("75").unwrap();
        assert_eq!(back, Minutes::new(75));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every in-day minute prints and parses back to itself
        #[test]
        fn display_parse_roundtrip(m in 0i32..MINUTES_PER_DAY) {
            let t = Minutes::new(m);
            prop_assert_eq!(Minutes::parse_hhmm(&t.to_string()).unwrap(), t);
        }

        /// Clamping always lands inside the day
        #[test]
        fn clamp_is_within_day(m in -5000i32..5000) {
            prop_assert!(Minutes::new(m).clamp_to_day().is_within_day());
        }
    }
}
