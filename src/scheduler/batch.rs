//! Batch driver.
//!
//! # Algorithm
//!
//! 1. Validate configuration and request structure.
//! 2. Filter rooms and breaks to the run's owner scope.
//! 3. Build the availability index from the existing entries,
//!    unavailabilities and in-scope breaks.
//! 4. Process subjects ordered by cohort (name, then id) and subject name,
//!    in chunks of `chunk_size`:
//!    resolve teacher, cohort, days, quota, shift and rooms; order the
//!    cohort's days; walk each day until the quota is consumed; fold the
//!    segments into the index.
//! 5. Commit each chunk through the [`EntryStore`]. A rejected chunk is
//!    rolled back from the index and its placed subjects are reported as
//!    persistence failures; later chunks continue.
//! 6. Optionally materialize the in-scope breaks as break slots.
//!
//! Per-subject problems never abort the run.
//!
//! # Complexity
//! O(s * d * q * r * e) where s = subjects, d = valid days per cohort,
//! q = quanta per shift, r = candidate rooms, e = entries per day.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityIndex;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{
    Break, BreakSlot, Cohort, CohortId, Room, RoomId, ScheduleEntry, Shift, Subject, Teacher,
    TeacherId, TeacherUnavailability, Weekday,
};
use crate::quota::{quota_detail, QuotaDetail};
use crate::store::EntryStore;
use crate::validation::validate_input;

use super::committer::PlacementCommitter;
use super::days::order_days;
use super::outcome::{BatchReport, FailureReason, OutcomeStatus, SubjectOutcome};
use super::walker::{walk_day, PlacementRequest, Segment};

/// Everything one scheduling run needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableRequest {
    /// Subjects to place. The batch orders them by cohort and name.
    pub subjects: Vec<Subject>,
    /// Cohorts referenced by the subjects.
    pub cohorts: Vec<Cohort>,
    /// Teachers referenced by the subjects.
    pub teachers: Vec<Teacher>,
    /// Room pool (filtered by owner scope).
    pub rooms: Vec<Room>,
    /// Teacher blackout windows.
    pub unavailabilities: Vec<TeacherUnavailability>,
    /// Breaks (filtered by owner scope).
    pub breaks: Vec<Break>,
    /// Entries that already exist and must be respected.
    pub existing_entries: Vec<ScheduleEntry>,
    /// Run scope. `None` sees only shared rooms and breaks.
    pub owner: Option<String>,
}

impl TimetableRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Adds several subjects.
    pub fn with_subjects(mut self, subjects: impl IntoIterator<Item = Subject>) -> Self {
        self.subjects.extend(subjects);
        self
    }

    /// Adds a cohort.
    pub fn with_cohort(mut self, cohort: Cohort) -> Self {
        self.cohorts.push(cohort);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a teacher blackout window.
    pub fn with_unavailability(mut self, unavailability: TeacherUnavailability) -> Self {
        self.unavailabilities.push(unavailability);
        self
    }

    /// Adds a break.
    pub fn with_break(mut self, brk: Break) -> Self {
        self.breaks.push(brk);
        self
    }

    /// Adds an entry that already occupies its slot.
    pub fn with_existing_entry(mut self, entry: ScheduleEntry) -> Self {
        self.existing_entries.push(entry);
        self
    }

    /// Sets the owner scope.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Subjects in processing order: by cohort name, cohort id, then
    /// subject name. Subjects without a known cohort come first. The sort
    /// is stable, so ties keep request order.
    pub fn processing_order(&self) -> Vec<&Subject> {
        let cohorts: HashMap<CohortId, &Cohort> =
            self.cohorts.iter().map(|c| (c.id, c)).collect();
        let mut subjects: Vec<&Subject> = self.subjects.iter().collect();
        subjects.sort_by(|a, b| order_key(a, &cohorts).cmp(&order_key(b, &cohorts)));
        subjects
    }

    fn in_scope(&self, owner: Option<&str>) -> bool {
        owner.is_none() || owner == self.owner.as_deref()
    }

    /// Rooms visible to the run's scope, in request order.
    pub fn scoped_rooms(&self) -> Vec<RoomId> {
        self.rooms
            .iter()
            .filter(|r| self.in_scope(r.owner.as_deref()))
            .map(|r| r.id)
            .collect()
    }

    /// Breaks visible to the run's scope.
    pub fn scoped_breaks(&self) -> Vec<&Break> {
        self.breaks
            .iter()
            .filter(|b| self.in_scope(b.owner.as_deref()))
            .collect()
    }
}

fn order_key<'a>(
    subject: &'a Subject,
    cohorts: &HashMap<CohortId, &'a Cohort>,
) -> (Option<(&'a str, CohortId)>, &'a str) {
    let cohort = subject
        .cohort
        .and_then(|id| cohorts.get(&id))
        .map(|c| (c.name.as_str(), c.id));
    (cohort, subject.name.as_str())
}

/// Lookups resolved once at batch start.
struct Scope<'a> {
    cohorts: HashMap<CohortId, &'a Cohort>,
    teachers: HashMap<TeacherId, &'a Teacher>,
    rooms: Vec<RoomId>,
}

/// A subject that passed every precondition.
struct Plan<'a> {
    request: PlacementRequest<'a>,
    days: &'a [Weekday],
    detail: QuotaDetail,
}

/// Greedy weekly timetable builder.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Cohort, Room, Subject, Teacher, Weekday};
/// use u_timetable::scheduler::{OutcomeStatus, TimetableRequest, TimetableScheduler};
/// use u_timetable::store::InMemoryStore;
///
/// let request = TimetableRequest::new()
///     .with_cohort(Cohort::new(1).with_day(Weekday::Monday))
///     .with_teacher(Teacher::new(1))
///     .with_room(Room::new(1))
///     .with_subject(Subject::new(1).with_hours(2, 1).with_teacher(1).with_cohort(1));
///
/// let mut store = InMemoryStore::new();
/// let report = TimetableScheduler::new().schedule(&request, &mut store).unwrap();
///
/// assert_eq!(report.outcomes[0].status, OutcomeStatus::Success);
/// assert_eq!(store.entries()[0].range.to_string(), "07:30-09:00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableScheduler {
    config: EngineConfig,
}

impl TimetableScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with a custom configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Places every subject of the request and persists the result.
    ///
    /// # Errors
    /// Returns [`EngineError`] only for an invalid configuration or a
    /// structurally invalid request. Subjects that cannot be placed and
    /// rejected chunks are reported in the [`BatchReport`].
    #[tracing::instrument(
        level = "info",
        name = "Timetable Batch",
        skip(self, request, store),
        fields(subjects = request.subjects.len(), owner = ?request.owner)
    )]
    pub fn schedule<S: EntryStore + ?Sized>(
        &self,
        request: &TimetableRequest,
        store: &mut S,
    ) -> Result<BatchReport, EngineError> {
        self.config.validate()?;
        validate_input(request).map_err(EngineError::InvalidInput)?;

        let scope = Scope {
            cohorts: request.cohorts.iter().map(|c| (c.id, c)).collect(),
            teachers: request.teachers.iter().map(|t| (t.id, t)).collect(),
            rooms: request.scoped_rooms(),
        };
        let breaks = request.scoped_breaks();
        let mut index = AvailabilityIndex::build(
            &request.existing_entries,
            &request.unavailabilities,
            breaks.iter().copied(),
        );

        tracing::info!(
            subjects = request.subjects.len(),
            rooms = scope.rooms.len(),
            breaks = breaks.len(),
            existing = index.len(),
            "starting timetable generation"
        );

        let mut report = BatchReport::new(self.config.max_reported_failures);
        let mut committer = PlacementCommitter::new();

        let subjects = request.processing_order();
        for (n, chunk) in subjects.chunks(self.config.chunk_size).enumerate() {
            committer.begin_chunk(&index);
            let first = report.outcomes.len();

            for &subject in chunk {
                let outcome =
                    self.place_subject(subject, &scope, &mut index, &mut committer, &mut report);
                tracing::debug!(
                    subject = %subject.id,
                    status = ?outcome.status,
                    assigned = outcome.assigned_minutes,
                    target = outcome.target_minutes,
                    "subject processed"
                );
                report.outcomes.push(outcome);
            }

            match committer.commit(&mut index, &mut *store) {
                Ok(entries) => {
                    tracing::info!(chunk = n, entries = entries.len(), "chunk committed");
                    report.entries.extend(entries);
                }
                Err(err) => {
                    tracing::warn!(chunk = n, error = %err, "chunk rolled back");
                    for outcome in &mut report.outcomes[first..] {
                        if outcome.assigned_minutes > 0 {
                            outcome.status = OutcomeStatus::Failure;
                            outcome.assigned_minutes = 0;
                            outcome.reason = Some(FailureReason::Persistence(err.to_string()));
                        }
                    }
                }
            }
        }

        if self.config.materialize_breaks && !breaks.is_empty() {
            let slots: Vec<BreakSlot> = breaks
                .iter()
                .map(|b| BreakSlot {
                    weekday: b.weekday,
                    shift: b.shift(),
                    range: b.range,
                })
                .collect();
            match store.commit_breaks(&slots) {
                Ok(()) => report.breaks = slots,
                Err(err) => {
                    tracing::warn!(error = %err, "break slots not persisted");
                    report.notes.push(format!("break slots not persisted: {err}"));
                }
            }
        }

        tracing::info!(
            success = report.success_count(),
            partial = report.partial_count(),
            failure = report.failure_count(),
            entries = report.entries.len(),
            "timetable generation finished"
        );
        Ok(report)
    }

    fn place_subject(
        &self,
        subject: &Subject,
        scope: &Scope<'_>,
        index: &mut AvailabilityIndex,
        committer: &mut PlacementCommitter,
        report: &mut BatchReport,
    ) -> SubjectOutcome {
        let plan = match self.resolve(subject, scope, report) {
            Ok(plan) => plan,
            Err(outcome) => return outcome,
        };
        let target = plan.detail.adjusted_minutes;
        let days = order_days(plan.days, index, subject.id, &self.config.rotation);

        let mut remaining = target;
        for day in days {
            if remaining == 0 {
                break;
            }
            let segments = walk_day(index, &plan.request, day, remaining);
            let placed: u32 = segments.iter().map(Segment::minutes).sum();
            tracing::debug!(subject = %subject.id, weekday = %day, placed, "day walked");
            committer.place(index, &plan.request, &segments);
            remaining -= placed;
        }

        SubjectOutcome::from_placement(subject.id, subject.label(), target, target - remaining)
            .with_detail(plan.detail)
    }

    fn resolve<'a>(
        &self,
        subject: &Subject,
        scope: &'a Scope<'a>,
        report: &mut BatchReport,
    ) -> Result<Plan<'a>, SubjectOutcome> {
        let fail = |target: u32, reason: FailureReason| {
            SubjectOutcome::failure(subject.id, subject.label(), target, reason)
        };

        let teacher = subject
            .primary_teacher()
            .ok_or_else(|| fail(0, FailureReason::NoTeacherAssigned))?;
        if let Some(t) = scope.teachers.get(&teacher) {
            tracing::debug!(subject = %subject.id, teacher = %t.name, "teacher resolved");
        }

        let cohort = subject
            .cohort
            .and_then(|id| scope.cohorts.get(&id).copied())
            .ok_or_else(|| fail(0, FailureReason::NoCohort))?;
        if cohort.valid_days.is_empty() {
            return Err(fail(0, FailureReason::NoValidDays));
        }

        let detail = quota_detail(
            subject.credit_hours,
            self.config.hour_length_minutes,
            subject.weeks,
        )
        .map_err(|e| fail(0, FailureReason::InvalidQuota(e.to_string())))?;
        let target = detail.adjusted_minutes;

        let shift: Shift = subject
            .shift
            .parse()
            .map_err(|_| fail(target, FailureReason::InvalidShift(subject.shift.clone())))?;

        if scope.rooms.is_empty() {
            return Err(fail(target, FailureReason::NoRoomsAvailable));
        }
        let rooms: &'a [RoomId] = match subject.room {
            None => &scope.rooms,
            Some(room) => match scope.rooms.iter().find(|&&r| r == room) {
                Some(r) => std::slice::from_ref(r),
                None => {
                    tracing::warn!(subject = %subject.id, %room, "pre-assigned room out of scope, using pool");
                    report.notes.push(format!(
                        "{}: room {room} is not available to this scope, using the room pool",
                        subject.label()
                    ));
                    &scope.rooms
                }
            },
        };

        Ok(Plan {
            request: PlacementRequest {
                subject: subject.id,
                teacher,
                cohort: cohort.id,
                shift,
                rooms,
            },
            days: &cohort.valid_days,
            detail,
        })
    }
}
