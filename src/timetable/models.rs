//! Domain records supplied by the data loader.
//!
//! Both records are immutable for the duration of a run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identifier of a [`TimeSlot`]. Also the gene type of a timetable chromosome.
pub type SlotId = u32;

/// A course on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Student cohort (semester) the course belongs to.
    pub period: u32,
    /// Unique course code.
    pub code: String,
    pub name: String,
    /// Nominal workload in hours. Informational only.
    pub weekly_hours: u32,
    /// Professor identity. Courses sharing a professor may not overlap.
    pub professor: String,
    /// Number of lessons to place per week.
    pub weekly_lessons: u32,
}

impl Course {
    pub fn new(
        period: u32,
        code: impl Into<String>,
        name: impl Into<String>,
        weekly_hours: u32,
        professor: impl Into<String>,
        weekly_lessons: u32,
    ) -> Self {
        Self {
            period,
            code: code.into(),
            name: name.into(),
            weekly_hours,
            professor: professor.into(),
            weekly_lessons,
        }
    }
}

/// A bookable lesson slot in the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: SlotId,
    pub weekday: String,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeSlot {
    pub fn new(id: SlotId, weekday: impl Into<String>, start: ClockTime, end: ClockTime) -> Self {
        Self {
            id,
            weekday: weekday.into(),
            start,
            end,
        }
    }
}

/// Wall-clock time of day with minute resolution.
///
/// Parses `H:MM` or `HH:MM` and always displays as `HH:MM`, so loaded
/// strings such as `"7:30"` and `"07:30"` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Builds a time from hour and minute. Returns `None` outside 00:00–23:59.
    pub const fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u16 {
        self.0
    }

    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    pub const fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidClockTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u16 = h.parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let t: ClockTime = "7:30".parse().unwrap();
        assert_eq!(t.minutes(), 450);
        assert_eq!(t.to_string(), "07:30");
        assert_eq!(t, "07:30".parse().unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "730", "24:00", "12:60", "1:5", "ab:cd", "123:00"] {
            assert!(
                bad.parse::<ClockTime>().is_err(),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_ordering_follows_clock() {
        let a: ClockTime = "09:10".parse().unwrap();
        let b: ClockTime = "13:00".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_serde_as_string() {
        let slot = TimeSlot::new(
            4,
            "Monday",
            ClockTime::from_hm(7, 30).unwrap(),
            ClockTime::from_hm(8, 20).unwrap(),
        );
        let json = serde_json::to_string(&slot).unwrap();
        assert!(json.contains("\"start\":\"07:30\""));
        let back: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);

        let err = serde_json::from_str::<TimeSlot>(
            r#"{"id":1,"weekday":"Monday","start":"noon","end":"13:00"}"#,
        );
        assert!(err.is_err());
    }
}
