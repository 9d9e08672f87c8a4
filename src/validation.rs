//! Validation for timetabling requests and entries.
//!
//! - [`validate_input`] checks the structural integrity of a request
//!   before scheduling: duplicate IDs and inverted time ranges.
//! - [`validate_entry`] checks a single hand-made entry.
//! - [`audit_timetable`] checks a complete entry set against the overlap
//!   and break constraints.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

use crate::models::{
    Break, ScheduleEntry, TeacherUnavailability, TimeRange, Violation, ViolationType, Weekday,
};
use crate::scheduler::TimetableRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A time range ends at or before its start.
    InvalidTimeRange,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn check_unique<I: Hash + Eq + Display>(
    what: &str,
    ids: impl IntoIterator<Item = I>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if seen.contains(&id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {what} ID: {id}"),
            ));
        } else {
            seen.insert(id);
        }
    }
}

fn check_range(what: &str, weekday: Weekday, range: &TimeRange, errors: &mut Vec<ValidationError>) {
    if range.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTimeRange,
            format!("{what} on {weekday} has an empty or inverted range {range}"),
        ));
    }
}

/// Validates a scheduling request.
///
/// Checks:
/// 1. No duplicate subject, cohort, teacher or room IDs
/// 2. Unavailability windows, breaks and existing entries have `start < end`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(request: &TimetableRequest) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique("subject", request.subjects.iter().map(|s| s.id), &mut errors);
    check_unique("cohort", request.cohorts.iter().map(|c| c.id), &mut errors);
    check_unique("teacher", request.teachers.iter().map(|t| t.id), &mut errors);
    check_unique("room", request.rooms.iter().map(|r| r.id), &mut errors);

    for u in &request.unavailabilities {
        check_range(&format!("Unavailability of {}", u.teacher), u.weekday, &u.range, &mut errors);
    }
    for b in &request.breaks {
        check_range("Break", b.weekday, &b.range, &mut errors);
    }
    for e in &request.existing_entries {
        check_range(&format!("Entry of {}", e.subject), e.weekday, &e.range, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a single entry entered by hand.
///
/// The start time must lie inside the entry's shift window (both bounds
/// inclusive) and the teacher must not be unavailable at that time.
pub fn validate_entry(
    entry: &ScheduleEntry,
    unavailabilities: &[TeacherUnavailability],
) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    let window = entry.shift.window();
    if entry.range.start < window.start || entry.range.start > window.end {
        violations.push(Violation::new(
            ViolationType::OutsideShift,
            entry.subject.to_string(),
            format!(
                "Start {} is outside the {} shift ({window})",
                entry.range.start, entry.shift
            ),
        ));
    }

    if let Some(u) = unavailabilities.iter().find(|u| {
        u.teacher == entry.teacher && u.weekday == entry.weekday && u.range.overlaps(&entry.range)
    }) {
        violations.push(Violation::new(
            ViolationType::TeacherUnavailable,
            entry.teacher.to_string(),
            format!(
                "Teacher {} is unavailable on {} {}",
                entry.teacher, entry.weekday, u.range
            ),
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Checks an entry set for overlaps and break violations.
///
/// Reports one violation per clashing pair and shared resource: a pair
/// taught by the same teacher in the same room yields two violations.
pub fn audit_timetable(entries: &[ScheduleEntry], breaks: &[Break]) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut by_day: HashMap<Weekday, Vec<&ScheduleEntry>> = HashMap::new();
    for e in entries {
        by_day.entry(e.weekday).or_default().push(e);
    }
    let mut days: Vec<_> = by_day.into_iter().collect();
    days.sort_by_key(|(d, _)| *d);

    for (day, mut list) in days {
        list.sort_by_key(|e| e.range.start);
        for (i, a) in list.iter().enumerate() {
            // sorted by start: stop at the first entry starting after a ends
            for b in list[i + 1..].iter().take_while(|b| b.range.start < a.range.end) {
                let when = format!("{day} {} / {}", a.range, b.range);
                if a.teacher == b.teacher {
                    violations.push(Violation::new(
                        ViolationType::TeacherOverlap,
                        a.teacher.to_string(),
                        format!("Teacher {} double-booked: {when}", a.teacher),
                    ));
                }
                if a.room == b.room {
                    violations.push(Violation::new(
                        ViolationType::RoomOverlap,
                        a.room.to_string(),
                        format!("Room {} double-booked: {when}", a.room),
                    ));
                }
                if a.cohort == b.cohort {
                    violations.push(Violation::new(
                        ViolationType::CohortOverlap,
                        a.cohort.to_string(),
                        format!("Cohort {} has simultaneous classes: {when}", a.cohort),
                    ));
                }
            }
        }
    }

    for e in entries {
        if let Some(b) = breaks
            .iter()
            .find(|b| b.weekday == e.weekday && b.blocks(&e.range))
        {
            violations.push(Violation::new(
                ViolationType::BreakOverlap,
                e.subject.to_string(),
                format!(
                    "Class {} on {} {} crosses break {}",
                    e.subject, e.weekday, e.range, b.range
                ),
            ));
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Cohort, CohortId, Room, RoomId, Shift, Subject, SubjectId, Teacher, TeacherId,
    };

    fn entry(subject: u64, teacher: u64, room: u64, cohort: u64, r: TimeRange) -> ScheduleEntry {
        ScheduleEntry {
            subject: SubjectId(subject),
            teacher: TeacherId(teacher),
            room: RoomId(room),
            cohort: CohortId(cohort),
            weekday: Weekday::Monday,
            shift: Shift::Morning,
            range: r,
        }
    }

    fn sample_request() -> TimetableRequest {
        TimetableRequest::new()
            .with_cohort(Cohort::new(1).with_day(Weekday::Monday))
            .with_teacher(Teacher::new(1))
            .with_room(Room::new(1))
            .with_room(Room::new(2))
            .with_subject(Subject::new(1).with_hours(2, 1).with_teacher(1).with_cohort(1))
            .with_subject(Subject::new(2).with_hours(2, 1).with_teacher(1).with_cohort(1))
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_request()).is_ok());
    }

    #[test]
    fn test_duplicate_subject_id() {
        let request = sample_request().with_subject(Subject::new(1));
        let errors = validate_input(&request).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("subject")));
    }

    #[test]
    fn test_duplicate_room_id() {
        let request = sample_request().with_room(Room::new(2));
        let errors = validate_input(&request).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Duplicate room ID: R2");
    }

    #[test]
    fn test_inverted_ranges() {
        let request = sample_request()
            .with_break(Break::new(Weekday::Monday, TimeRange::hm((10, 0), (9, 0))))
            .with_unavailability(TeacherUnavailability::new(
                1,
                Weekday::Tuesday,
                Shift::Morning,
                TimeRange::hm((8, 0), (8, 0)),
            ));
        let errors = validate_input(&request).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidTimeRange));
    }

    #[test]
    fn test_multiple_errors() {
        let request = sample_request()
            .with_cohort(Cohort::new(1))
            .with_teacher(Teacher::new(1))
            .with_existing_entry(entry(9, 9, 9, 9, TimeRange::hm((9, 0), (8, 0))));
        let errors = validate_input(&request).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_validate_entry_shift_bounds() {
        // start may equal the shift end
        let at_end = entry(1, 1, 1, 1, TimeRange::hm((12, 50), (13, 0)));
        assert!(validate_entry(&at_end, &[]).is_ok());

        let early = entry(1, 1, 1, 1, TimeRange::hm((7, 0), (8, 0)));
        let v = validate_entry(&early, &[]).unwrap_err();
        assert_eq!(v[0].violation_type, ViolationType::OutsideShift);
    }

    #[test]
    fn test_validate_entry_teacher_unavailable() {
        let e = entry(1, 1, 1, 1, TimeRange::hm((8, 0), (9, 0)));
        let blocked = [TeacherUnavailability::new(
            1,
            Weekday::Monday,
            Shift::Morning,
            TimeRange::hm((8, 30), (10, 0)),
        )];
        let v = validate_entry(&e, &blocked).unwrap_err();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::TeacherUnavailable);
        assert_eq!(v[0].entity_id, "T1");

        let other_teacher = entry(1, 2, 1, 1, TimeRange::hm((8, 0), (9, 0)));
        assert!(validate_entry(&other_teacher, &blocked).is_ok());
    }

    #[test]
    fn test_audit_clean() {
        let entries = vec![
            entry(1, 1, 1, 1, TimeRange::hm((7, 30), (9, 0))),
            entry(2, 1, 1, 1, TimeRange::hm((9, 0), (10, 0))), // touching
            entry(3, 2, 2, 2, TimeRange::hm((7, 30), (9, 0))),
        ];
        assert!(audit_timetable(&entries, &[]).is_empty());
    }

    #[test]
    fn test_audit_overlaps() {
        let entries = vec![
            entry(1, 1, 1, 1, TimeRange::hm((7, 30), (9, 0))),
            entry(2, 1, 2, 2, TimeRange::hm((8, 0), (8, 30))),
            entry(3, 3, 1, 3, TimeRange::hm((8, 45), (9, 30))),
            entry(4, 4, 4, 1, TimeRange::hm((10, 0), (11, 0))),
            entry(5, 5, 5, 1, TimeRange::hm((10, 30), (11, 30))),
        ];
        let v = audit_timetable(&entries, &[]);
        let kinds: Vec<_> = v.iter().map(|v| v.violation_type.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationType::TeacherOverlap,
                ViolationType::RoomOverlap,
                ViolationType::CohortOverlap,
            ]
        );
        assert_eq!(v[0].entity_id, "T1");
        assert_eq!(v[1].entity_id, "R1");
        assert_eq!(v[2].entity_id, "C1");
    }

    #[test]
    fn test_audit_break_overlap() {
        let entries = vec![entry(1, 1, 1, 1, TimeRange::hm((9, 0), (10, 30)))];
        let breaks = [Break::new(Weekday::Monday, TimeRange::hm((10, 0), (10, 15)))];
        let v = audit_timetable(&entries, &breaks);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::BreakOverlap);

        let elsewhere = [Break::new(Weekday::Tuesday, TimeRange::hm((10, 0), (10, 15)))];
        assert!(audit_timetable(&entries, &elsewhere).is_empty());
    }
}
