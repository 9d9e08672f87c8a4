//! Blocked periods: teacher unavailability and breaks.
//!
//! Both are negative availability. They differ in who they bind:
//! - [`TeacherUnavailability`] blocks one teacher on one weekday.
//! - [`Break`] blocks every class on one weekday, independent of
//!   teacher or room, and splits the day's availability into sub-ranges.
//!
//! # Precedence
//! A slot is assignable iff it overlaps neither kind of block (and no
//! existing entry, see [`AvailabilityIndex`](crate::availability::AvailabilityIndex)).

use serde::{Deserialize, Serialize};

use super::{ClockTime, Shift, TeacherId, TimeRange, Weekday};

/// A window in which a teacher must not be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherUnavailability {
    /// Blocked teacher.
    pub teacher: TeacherId,
    /// Weekday of the blackout.
    pub weekday: Weekday,
    /// Shift the blackout was declared in.
    pub shift: Shift,
    /// Blocked time range.
    pub range: TimeRange,
}

impl TeacherUnavailability {
    /// Creates a blackout window.
    pub fn new(
        teacher: impl Into<TeacherId>,
        weekday: Weekday,
        shift: Shift,
        range: TimeRange,
    ) -> Self {
        Self {
            teacher: teacher.into(),
            weekday,
            shift,
            range,
        }
    }

    /// Blackout covering an entire shift.
    pub fn whole_shift(teacher: impl Into<TeacherId>, weekday: Weekday, shift: Shift) -> Self {
        Self::new(teacher, weekday, shift, shift.window())
    }
}

/// A non-assignable window applied to every class on a weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Break {
    /// Owner scope. `None` = applies to every scope.
    pub owner: Option<String>,
    /// Weekday of the break.
    pub weekday: Weekday,
    /// Break time range.
    pub range: TimeRange,
}

impl Break {
    /// Creates a break visible to every scope.
    pub fn new(weekday: Weekday, range: TimeRange) -> Self {
        Self {
            owner: None,
            weekday,
            range,
        }
    }

    /// Restricts the break to one owner scope.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Shift the break belongs to, judged by its start time.
    pub fn shift(&self) -> Shift {
        Shift::for_start(self.range.start)
    }

    /// Whether the break overlaps `range`.
    #[inline]
    pub fn blocks(&self, range: &TimeRange) -> bool {
        self.range.overlaps(range)
    }

    /// Whether the break contains `time`.
    #[inline]
    pub fn contains(&self, time: ClockTime) -> bool {
        self.range.contains(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_shift_unavailability() {
        let u = TeacherUnavailability::whole_shift(1, Weekday::Monday, Shift::Morning);
        assert_eq!(u.range, Shift::Morning.window());
        assert_eq!(u.teacher, TeacherId(1));
    }

    #[test]
    fn test_break_blocks() {
        let b = Break::new(Weekday::Tuesday, TimeRange::hm((10, 0), (10, 30)));
        assert!(b.blocks(&TimeRange::hm((9, 45), (10, 15))));
        assert!(!b.blocks(&TimeRange::hm((10, 30), (11, 0)))); // touching
        assert!(b.contains(ClockTime::from_hm(10, 0)));
        assert!(!b.contains(ClockTime::from_hm(10, 30)));
    }

    #[test]
    fn test_break_shift() {
        let morning = Break::new(Weekday::Monday, TimeRange::hm((10, 0), (10, 20)));
        let afternoon = Break::new(Weekday::Monday, TimeRange::hm((15, 0), (15, 20)));
        let evening = Break::new(Weekday::Monday, TimeRange::hm((19, 30), (19, 45)));
        assert_eq!(morning.shift(), Shift::Morning);
        assert_eq!(afternoon.shift(), Shift::Afternoon);
        assert_eq!(evening.shift(), Shift::Evening);
    }

    #[test]
    fn test_break_owner() {
        let b = Break::new(Weekday::Friday, TimeRange::hm((9, 0), (9, 15))).with_owner("u1");
        assert_eq!(b.owner.as_deref(), Some("u1"));
    }
}
