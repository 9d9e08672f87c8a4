//! Time-of-day model.
//!
//! Defines wall-clock times, half-open time ranges and the three fixed
//! daily shift windows inside which classes may be placed.
//!
//! # Time Model
//! All times are minutes since midnight on a single, unspecified day.
//! Every scheduling decision is made on a fixed 15-minute quantum.
//!
//! | Shift | Window |
//! |-------|--------|
//! | Morning | 07:30 – 12:50 |
//! | Afternoon | 13:30 – 18:15 |
//! | Evening | 18:15 – 21:45 |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduling granularity (minutes).
pub const QUANTUM_MINUTES: u16 = 15;

/// Minimum weekly quota for any subject (minutes).
pub const MIN_WEEKLY_MINUTES: u16 = 60;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error parsing a wall-clock time or shift name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// Input is not of the form `HH:MM`.
    #[error("invalid time '{0}', expected HH:MM")]
    Format(String),
    /// Hour or minute out of range.
    #[error("time '{0}' is out of range")]
    OutOfRange(String),
    /// Unknown shift name.
    #[error("unknown shift '{0}'")]
    UnknownShift(String),
}

/// A wall-clock time, stored as minutes since midnight.
///
/// Serialized as a plain number of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Creates a time from hours and minutes.
    ///
    /// Values past 23:59 are clamped to 24:00 (end of day), which is still a
    /// valid exclusive range end.
    pub const fn from_hm(hours: u16, minutes: u16) -> Self {
        let total = hours * 60 + minutes;
        if total > MINUTES_PER_DAY {
            ClockTime(MINUTES_PER_DAY)
        } else {
            ClockTime(total)
        }
    }

    /// Creates a time from minutes since midnight (clamped to 24:00).
    pub const fn from_minutes(minutes: u16) -> Self {
        if minutes > MINUTES_PER_DAY {
            ClockTime(MINUTES_PER_DAY)
        } else {
            ClockTime(minutes)
        }
    }

    /// Minutes since midnight.
    #[inline]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component.
    #[inline]
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Minute component.
    #[inline]
    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Adds minutes, saturating at 24:00.
    #[inline]
    pub fn add_minutes(self, minutes: u16) -> Self {
        Self::from_minutes(self.0.saturating_add(minutes))
    }

    /// Minutes from `earlier` to `self` (zero if `earlier` is later).
    #[inline]
    pub fn minutes_since(self, earlier: ClockTime) -> u16 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (h, m) = trimmed
            .split_once(':')
            .ok_or_else(|| TimeParseError::Format(s.to_string()))?;
        let hours: u16 = h
            .parse()
            .map_err(|_| TimeParseError::Format(s.to_string()))?;
        let minutes: u16 = m
            .parse()
            .map_err(|_| TimeParseError::Format(s.to_string()))?;
        if hours > 24 || minutes > 59 || (hours == 24 && minutes > 0) {
            return Err(TimeParseError::OutOfRange(s.to_string()));
        }
        Ok(ClockTime(hours * 60 + minutes))
    }
}

/// A time-of-day interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Interval start (inclusive).
    pub start: ClockTime,
    /// Interval end (exclusive).
    pub end: ClockTime,
}

impl TimeRange {
    /// Creates a new range.
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Creates a range from `(hour, minute)` pairs.
    pub fn hm(start: (u16, u16), end: (u16, u16)) -> Self {
        Self::new(
            ClockTime::from_hm(start.0, start.1),
            ClockTime::from_hm(end.0, end.1),
        )
    }

    /// Duration in minutes (zero for inverted ranges).
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes_since(self.start)
    }

    /// Whether `end <= start`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether a time falls within this range.
    #[inline]
    pub fn contains(&self, time: ClockTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether two ranges overlap. Touching ranges do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely inside this range.
    pub fn covers(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// One of the three fixed daily teaching windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shift {
    /// 07:30 – 12:50.
    Morning,
    /// 13:30 – 18:15.
    Afternoon,
    /// 18:15 – 21:45.
    Evening,
}

impl Shift {
    /// All shifts in daily order.
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Evening];

    /// The time window of this shift.
    pub fn window(self) -> TimeRange {
        match self {
            Shift::Morning => TimeRange::hm((7, 30), (12, 50)),
            Shift::Afternoon => TimeRange::hm((13, 30), (18, 15)),
            Shift::Evening => TimeRange::hm((18, 15), (21, 45)),
        }
    }

    /// Shift a time of day belongs to, judged by its start.
    ///
    /// Anything before 13:30 is Morning, before 18:15 Afternoon,
    /// everything later Evening.
    pub fn for_start(time: ClockTime) -> Self {
        if time < ClockTime::from_hm(13, 30) {
            Shift::Morning
        } else if time < ClockTime::from_hm(18, 15) {
            Shift::Afternoon
        } else {
            Shift::Evening
        }
    }

    /// Canonical English name.
    pub fn name(self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Evening => "Evening",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shift {
    type Err = TimeParseError;

    /// Case-insensitive. Accepts English names and the Spanish labels
    /// used by existing institution data.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" | "mañana" | "manana" => Ok(Shift::Morning),
            "afternoon" | "tarde" => Ok(Shift::Afternoon),
            "evening" | "night" | "noche" => Ok(Shift::Evening),
            _ => Err(TimeParseError::UnknownShift(s.to_string())),
        }
    }
}

/// Rounds minutes down to a whole number of quanta.
#[inline]
pub fn floor_to_quantum(minutes: u16) -> u16 {
    minutes - minutes % QUANTUM_MINUTES
}
