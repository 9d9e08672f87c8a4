//! Timetable (output) model.
//!
//! A timetable is the set of placed class entries plus the break slots
//! shown alongside them. It may carry violations when audited.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Break, CohortId, RoomId, Shift, SubjectId, TeacherId, TimeRange, Weekday};
use crate::validation::audit_timetable;

/// One placed class segment.
///
/// Records that a subject is taught by a teacher in a room during a time
/// range on a weekday.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Scheduled subject.
    pub subject: SubjectId,
    /// Teaching teacher.
    pub teacher: TeacherId,
    /// Assigned room.
    pub room: RoomId,
    /// Cohort of the subject (denormalized for conflict lookups).
    pub cohort: CohortId,
    /// Weekday.
    pub weekday: Weekday,
    /// Shift the entry belongs to.
    pub shift: Shift,
    /// Time range [start, end).
    pub range: TimeRange,
}

impl ScheduleEntry {
    /// Duration in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.range.duration_minutes()
    }

    /// Whether two entries on the same weekday overlap in time.
    pub fn clashes_with(&self, other: &Self) -> bool {
        self.weekday == other.weekday && self.range.overlaps(&other.range)
    }
}

/// A break rendered into the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BreakSlot {
    /// Weekday.
    pub weekday: Weekday,
    /// Shift, derived from the break start.
    pub shift: Shift,
    /// Time range.
    pub range: TimeRange,
}

/// A complete timetable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timetable {
    /// Placed class entries.
    pub entries: Vec<ScheduleEntry>,
    /// Break slots.
    pub breaks: Vec<BreakSlot>,
    /// Violations recorded by the last [`Timetable::audit`].
    pub violations: Vec<Violation>,
}

/// A constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (teacher, room, cohort or subject).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of constraint violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A teacher teaches two overlapping classes.
    TeacherOverlap,
    /// A room hosts two overlapping classes.
    RoomOverlap,
    /// A cohort attends two overlapping classes.
    CohortOverlap,
    /// A class overlaps a break.
    BreakOverlap,
    /// A class falls in a teacher's unavailability window.
    TeacherUnavailable,
    /// A class starts outside its shift window.
    OutsideShift,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a timetable from entries.
    pub fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Checks the entries against each other and against the timetable's
    /// break slots, replacing previously recorded violations.
    ///
    /// Returns whether the timetable is valid.
    pub fn audit(&mut self) -> bool {
        let breaks: Vec<Break> = self
            .breaks
            .iter()
            .map(|slot| Break::new(slot.weekday, slot.range))
            .collect();
        self.violations = audit_timetable(&self.entries, &breaks);
        self.is_valid()
    }

    /// Whether the last audit found no violations.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// All entries for a subject.
    pub fn entries_for_subject(&self, subject: SubjectId) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.subject == subject).collect()
    }

    /// All entries taught by a teacher.
    pub fn entries_for_teacher(&self, teacher: TeacherId) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.teacher == teacher).collect()
    }

    /// All entries in a room.
    pub fn entries_for_room(&self, room: RoomId) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.room == room).collect()
    }

    /// All entries of a cohort, sorted by weekday then start time.
    pub fn entries_for_cohort(&self, cohort: CohortId) -> Vec<&ScheduleEntry> {
        let mut out: Vec<&ScheduleEntry> =
            self.entries.iter().filter(|e| e.cohort == cohort).collect();
        out.sort_by_key(|e| (e.weekday, e.range.start));
        out
    }

    /// Total placed minutes for a subject.
    pub fn minutes_for_subject(&self, subject: SubjectId) -> u32 {
        self.entries_for_subject(subject)
            .iter()
            .map(|e| u32::from(e.duration_minutes()))
            .sum()
    }

    /// Placed minutes per weekday.
    pub fn minutes_by_weekday(&self) -> HashMap<Weekday, u32> {
        let mut out: HashMap<Weekday, u32> = HashMap::new();
        for e in &self.entries {
            *out.entry(e.weekday).or_insert(0) += u32::from(e.duration_minutes());
        }
        out
    }

    /// Busy minutes per room.
    pub fn busy_minutes_by_room(&self) -> HashMap<RoomId, u32> {
        let mut out: HashMap<RoomId, u32> = HashMap::new();
        for e in &self.entries {
            *out.entry(e.room).or_insert(0) += u32::from(e.duration_minutes());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(subject: u64, teacher: u64, room: u64, day: Weekday, r: TimeRange) -> ScheduleEntry {
        ScheduleEntry {
            subject: SubjectId(subject),
            teacher: TeacherId(teacher),
            room: RoomId(room),
            cohort: CohortId(1),
            weekday: day,
            shift: Shift::Morning,
            range: r,
        }
    }

    fn sample_timetable() -> Timetable {
        Timetable::from_entries(vec![
            entry(1, 10, 100, Weekday::Monday, TimeRange::hm((7, 30), (9, 0))),
            entry(1, 10, 100, Weekday::Tuesday, TimeRange::hm((7, 30), (8, 0))),
            entry(2, 11, 101, Weekday::Monday, TimeRange::hm((9, 0), (10, 0))),
        ])
    }

    #[test]
    fn test_entries_for_subject_and_minutes() {
        let t = sample_timetable();
        assert_eq!(t.entries_for_subject(SubjectId(1)).len(), 2);
        assert_eq!(t.minutes_for_subject(SubjectId(1)), 120);
        assert_eq!(t.minutes_for_subject(SubjectId(99)), 0);
    }

    #[test]
    fn test_entries_for_teacher_and_room() {
        let t = sample_timetable();
        assert_eq!(t.entries_for_teacher(TeacherId(11)).len(), 1);
        assert_eq!(t.entries_for_room(RoomId(100)).len(), 2);
    }

    #[test]
    fn test_entries_for_cohort_sorted() {
        let t = sample_timetable();
        let c = t.entries_for_cohort(CohortId(1));
        assert_eq!(c.len(), 3);
        assert_eq!(c[0].weekday, Weekday::Monday);
        assert_eq!(c[1].range.start.to_string(), "09:00");
        assert_eq!(c[2].weekday, Weekday::Tuesday);
    }

    #[test]
    fn test_minutes_by_weekday() {
        let t = sample_timetable();
        let m = t.minutes_by_weekday();
        assert_eq!(m[&Weekday::Monday], 150);
        assert_eq!(m[&Weekday::Tuesday], 30);
    }

    #[test]
    fn test_clashes_with() {
        let a = entry(1, 10, 100, Weekday::Monday, TimeRange::hm((8, 0), (9, 0)));
        let b = entry(2, 11, 101, Weekday::Monday, TimeRange::hm((8, 45), (9, 30)));
        let c = entry(2, 11, 101, Weekday::Tuesday, TimeRange::hm((8, 45), (9, 30)));
        assert!(a.clashes_with(&b));
        assert!(!a.clashes_with(&c));
    }

    #[test]
    fn test_audit_flags_clashes_and_breaks() {
        let mut t = sample_timetable();
        assert!(t.audit());

        // same room as subject 1 on Tuesday, and across a break
        t.entries
            .push(entry(3, 12, 100, Weekday::Tuesday, TimeRange::hm((7, 45), (8, 45))));
        t.breaks.push(BreakSlot {
            weekday: Weekday::Tuesday,
            shift: Shift::Morning,
            range: TimeRange::hm((8, 15), (8, 30)),
        });
        assert!(!t.audit());
        assert!(!t.is_valid());
        let types: Vec<_> = t.violations.iter().map(|v| v.violation_type.clone()).collect();
        assert!(types.contains(&ViolationType::RoomOverlap));
        assert!(types.contains(&ViolationType::BreakOverlap));

        // a re-audit after fixing the entry clears the old findings
        t.entries.pop();
        assert!(t.audit());
        assert!(t.violations.is_empty());
    }

    #[test]
    fn test_empty_timetable() {
        let mut t = Timetable::new();
        assert!(t.audit());
        assert_eq!(t.entry_count(), 0);
        assert!(t.minutes_by_weekday().is_empty());
    }
}
