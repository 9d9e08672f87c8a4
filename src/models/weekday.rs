//! Days of the week.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unknown weekday name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown weekday '{0}'")]
pub struct WeekdayParseError(pub String);

/// A day of the week.
///
/// Ordering follows [`Weekday::rank`]: Monday (1) through Sunday (7).
/// The rank is the canonical tie-breaker when ordering candidate days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Rank 1.
    Monday,
    /// Rank 2.
    Tuesday,
    /// Rank 3.
    Wednesday,
    /// Rank 4.
    Thursday,
    /// Rank 5.
    Friday,
    /// Rank 6.
    Saturday,
    /// Rank 7.
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Canonical rank, 1 (Monday) to 7 (Sunday).
    pub fn rank(self) -> u8 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        }
    }

    /// Weekday for a canonical rank.
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(usize::from(rank).checked_sub(1)?).copied()
    }

    /// English name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = WeekdayParseError;

    /// Case-insensitive English or Spanish names, or two-letter codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let day = match s.trim().to_lowercase().as_str() {
            "monday" | "mon" | "lunes" | "lu" => Weekday::Monday,
            "tuesday" | "tue" | "martes" | "ma" => Weekday::Tuesday,
            "wednesday" | "wed" | "miercoles" | "miércoles" | "mi" => Weekday::Wednesday,
            "thursday" | "thu" | "jueves" | "ju" => Weekday::Thursday,
            "friday" | "fri" | "viernes" | "vi" => Weekday::Friday,
            "saturday" | "sat" | "sabado" | "sábado" | "sa" => Weekday::Saturday,
            "sunday" | "sun" | "domingo" | "do" => Weekday::Sunday,
            _ => return Err(WeekdayParseError(s.to_string())),
        };
        Ok(day)
    }
}
