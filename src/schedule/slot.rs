use crate::error::AppError;
use crate::schedule::period::Semester;
use chrono::{Duration, NaiveTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    // Zero-padded 24-hour clock: 00:00 through 23:59
    static ref CLOCK_REGEX: Regex = Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").unwrap();
}

/// Day of the week a slot recurs on.
///
/// Names are lowercase English on the wire and are matched case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Position within a Monday-first week, Monday = 0 through Sunday = 6.
    pub fn index(self) -> i64 {
        self as i64
    }

    /// Position within a Sunday-first week, Sunday = 0 through Saturday = 6.
    pub fn sunday_first_index(self) -> i64 {
        (self.index() + 1) % 7
    }
}

impl From<chrono::Weekday> for Day {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Day::Monday,
            chrono::Weekday::Tue => Day::Tuesday,
            chrono::Weekday::Wed => Day::Wednesday,
            chrono::Weekday::Thu => Day::Thursday,
            chrono::Weekday::Fri => Day::Friday,
            chrono::Weekday::Sat => Day::Saturday,
            chrono::Weekday::Sun => Day::Sunday,
        }
    }
}

/// A minute-precision wall-clock time, written `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Drops seconds and sub-second precision from `time`.
    pub fn truncate(time: NaiveTime) -> Self {
        let minutes = i64::from(time.hour() * 60 + time.minute());
        ClockTime(NaiveTime::default() + Duration::minutes(minutes))
    }

    pub fn as_naive(self) -> NaiveTime {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidTimeFormat(format!("expected HH:MM, got {:?}", s));
        let caps = CLOCK_REGEX.captures(s).ok_or_else(invalid)?;
        let hour: u32 = caps[1].parse().map_err(|_| invalid())?;
        let minute: u32 = caps[2].parse().map_err(|_| invalid())?;
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(ClockTime)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> String {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// A weekly recurring time window tied to one semester of one academic year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SlotRepr")]
pub struct WeeklySlot {
    pub day: Day,
    pub from: ClockTime,
    pub to: ClockTime,
    pub semester: Semester,
    pub year: String,
}

#[derive(Deserialize)]
struct SlotRepr {
    day: Day,
    from: ClockTime,
    to: ClockTime,
    semester: Semester,
    year: String,
}

impl TryFrom<SlotRepr> for WeeklySlot {
    type Error = AppError;

    fn try_from(repr: SlotRepr) -> Result<Self, Self::Error> {
        WeeklySlot::with_times(repr.day, repr.from, repr.to, repr.semester, repr.year)
    }
}

impl WeeklySlot {
    /// Parses `from` and `to` and builds a slot, rejecting windows that do not
    /// start strictly before they end.
    pub fn new(
        day: Day,
        from: &str,
        to: &str,
        semester: Semester,
        year: impl Into<String>,
    ) -> Result<Self, AppError> {
        Self::with_times(day, from.parse()?, to.parse()?, semester, year.into())
    }

    fn with_times(
        day: Day,
        from: ClockTime,
        to: ClockTime,
        semester: Semester,
        year: String,
    ) -> Result<Self, AppError> {
        if from >= to {
            return Err(AppError::InvalidTimeFormat(format!(
                "slot must start before it ends, got {} to {}",
                from, to
            )));
        }
        Ok(Self {
            day,
            from,
            to,
            semester,
            year,
        })
    }
}

/// Anything that carries a weekly schedule and can be sorted into buckets.
pub trait Scheduled {
    fn slot(&self) -> &WeeklySlot;
}

impl Scheduled for WeeklySlot {
    fn slot(&self) -> &WeeklySlot {
        self
    }
}
