//! Subject model.
//!
//! A subject is a unit of teaching that must accumulate a weekly quota of
//! instructional minutes, taught by one teacher to one cohort.

use serde::{Deserialize, Serialize};

use super::{CohortId, RoomId, SubjectId, TeacherId};

/// A subject to be placed in the timetable.
///
/// The shift is kept as the raw name supplied by the caller and resolved
/// at run time, so an unknown name surfaces as a per-subject failure
/// rather than a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: SubjectId,
    /// Human-readable name.
    pub name: String,
    /// Total credit-hours over the whole term.
    pub credit_hours: i32,
    /// Number of teaching weeks in the term.
    pub weeks: i32,
    /// Shift name (e.g. "Morning").
    pub shift: String,
    /// Assigned teachers. Only the first one is scheduled.
    pub teachers: Vec<TeacherId>,
    /// Pre-assigned room, if any.
    pub room: Option<RoomId>,
    /// Owning cohort (semester).
    pub cohort: Option<CohortId>,
}

impl Subject {
    /// Creates a subject with the given ID in the Morning shift.
    pub fn new(id: impl Into<SubjectId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            credit_hours: 0,
            weeks: 0,
            shift: "Morning".to_string(),
            teachers: Vec::new(),
            room: None,
            cohort: None,
        }
    }

    /// Sets the subject name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets credit-hours and weeks.
    pub fn with_hours(mut self, credit_hours: i32, weeks: i32) -> Self {
        self.credit_hours = credit_hours;
        self.weeks = weeks;
        self
    }

    /// Sets the shift name.
    pub fn with_shift(mut self, shift: impl Into<String>) -> Self {
        self.shift = shift.into();
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: impl Into<TeacherId>) -> Self {
        self.teachers.push(teacher.into());
        self
    }

    /// Sets the pre-assigned room.
    pub fn with_room(mut self, room: impl Into<RoomId>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Sets the owning cohort.
    pub fn with_cohort(mut self, cohort: impl Into<CohortId>) -> Self {
        self.cohort = Some(cohort.into());
        self
    }

    /// The teacher the engine schedules.
    pub fn primary_teacher(&self) -> Option<TeacherId> {
        self.teachers.first().copied()
    }

    /// Display label: the name, or the id when unnamed.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.id.to_string()
        } else {
            self.name.clone()
        }
    }
}
