//! Availability index.
//!
//! Holds the current snapshot of occupied slots and blocked windows and
//! answers the placement feasibility question for a candidate
//! (teacher, room, cohort, weekday, range).
//!
//! The index is owned by the batch driver for the whole run and updated
//! with every committed entry, so subjects placed later in the batch see
//! the slots taken by earlier ones.
//!
//! # Feasibility
//! A candidate is feasible iff none of the following overlap its range on
//! its weekday:
//! 1. an unavailability window of the teacher,
//! 2. an entry taught by the teacher,
//! 3. an entry in the room,
//! 4. an entry of the cohort (any subject),
//! 5. a break.
//!
//! All checks use half-open overlap: touching ranges do not conflict.

use std::collections::HashMap;

use crate::models::{
    Break, CohortId, RoomId, ScheduleEntry, TeacherId, TeacherUnavailability, TimeRange, Weekday,
};

/// Why a candidate slot is not feasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// Teacher declared unavailable.
    TeacherUnavailable(TimeRange),
    /// Teacher already teaches another entry.
    TeacherBusy(TimeRange),
    /// Room already hosts another entry.
    RoomBusy(TimeRange),
    /// Cohort already attends another entry.
    CohortBusy(TimeRange),
    /// Range crosses a break.
    Break(TimeRange),
}

/// A candidate placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotQuery {
    /// Teacher who would teach the slot.
    pub teacher: TeacherId,
    /// Room that would host it.
    pub room: RoomId,
    /// Cohort that would attend it.
    pub cohort: CohortId,
    /// Weekday.
    pub weekday: Weekday,
    /// Candidate time range.
    pub range: TimeRange,
}

/// Lookup structures over existing entries, unavailability and breaks.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    entries: Vec<ScheduleEntry>,
    by_weekday: HashMap<Weekday, Vec<usize>>,
    by_teacher: HashMap<TeacherId, Vec<usize>>,
    by_cohort: HashMap<CohortId, Vec<usize>>,
    unavailability: HashMap<(TeacherId, Weekday), Vec<TimeRange>>,
    breaks: HashMap<Weekday, Vec<TimeRange>>,
}

impl AvailabilityIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from a snapshot.
    ///
    /// Breaks are kept sorted by start time per weekday.
    pub fn build<'a>(
        entries: impl IntoIterator<Item = &'a ScheduleEntry>,
        unavailabilities: impl IntoIterator<Item = &'a TeacherUnavailability>,
        breaks: impl IntoIterator<Item = &'a Break>,
    ) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.insert(entry.clone());
        }
        for u in unavailabilities {
            index.add_unavailability(u);
        }
        for b in breaks {
            index.add_break(b);
        }
        index
    }

    /// Folds a new entry into every lookup.
    pub fn insert(&mut self, entry: ScheduleEntry) {
        let idx = self.entries.len();
        self.by_weekday.entry(entry.weekday).or_default().push(idx);
        self.by_teacher.entry(entry.teacher).or_default().push(idx);
        self.by_cohort.entry(entry.cohort).or_default().push(idx);
        self.entries.push(entry);
    }

    /// Registers a teacher blackout window.
    pub fn add_unavailability(&mut self, u: &TeacherUnavailability) {
        self.unavailability
            .entry((u.teacher, u.weekday))
            .or_default()
            .push(u.range);
    }

    /// Registers a break.
    pub fn add_break(&mut self, b: &Break) {
        let day = self.breaks.entry(b.weekday).or_default();
        let pos = day.partition_point(|r| r.start <= b.range.start);
        day.insert(pos, b.range);
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All indexed entries in insertion order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Number of entries placed on a weekday (the day's load).
    pub fn entry_count(&self, weekday: Weekday) -> usize {
        self.by_weekday.get(&weekday).map_or(0, Vec::len)
    }

    /// Breaks on a weekday, sorted by start time.
    pub fn breaks_on(&self, weekday: Weekday) -> &[TimeRange] {
        self.breaks
            .get(&weekday)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Earliest-starting break on `weekday` that overlaps `range`.
    pub fn break_overlapping(&self, weekday: Weekday, range: &TimeRange) -> Option<TimeRange> {
        self.breaks_on(weekday)
            .iter()
            .find(|b| b.overlaps(range))
            .copied()
    }

    /// First conflict preventing the placement, if any.
    pub fn conflict(&self, q: &SlotQuery) -> Option<Conflict> {
        if let Some(r) = self
            .unavailability
            .get(&(q.teacher, q.weekday))
            .and_then(|ranges| ranges.iter().find(|r| r.overlaps(&q.range)))
        {
            return Some(Conflict::TeacherUnavailable(*r));
        }

        if let Some(e) = self.overlapping(self.by_teacher.get(&q.teacher), q) {
            return Some(Conflict::TeacherBusy(e.range));
        }

        if let Some(e) = self
            .by_weekday
            .get(&q.weekday)
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
            .find(|e| e.room == q.room && e.range.overlaps(&q.range))
        {
            return Some(Conflict::RoomBusy(e.range));
        }

        if let Some(e) = self.overlapping(self.by_cohort.get(&q.cohort), q) {
            return Some(Conflict::CohortBusy(e.range));
        }

        self.break_overlapping(q.weekday, &q.range)
            .map(Conflict::Break)
    }

    /// Whether the placement violates none of the constraints.
    #[inline]
    pub fn feasible(&self, q: &SlotQuery) -> bool {
        self.conflict(q).is_none()
    }

    fn overlapping(&self, bucket: Option<&Vec<usize>>, q: &SlotQuery) -> Option<&ScheduleEntry> {
        bucket
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
            .find(|e| e.weekday == q.weekday && e.range.overlaps(&q.range))
    }
}
