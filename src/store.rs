//! Persistence seam.
//!
//! The engine never talks to a database directly. Each chunk of new entries
//! is handed to an [`EntryStore`] in one call, which must apply it
//! atomically: either every entry of the chunk is persisted or none is.
//!
//! Deleting the previous entries of the run's scope is the caller's job
//! and happens before the engine is invoked.

use crate::error::StoreError;
use crate::models::{BreakSlot, ScheduleEntry, Timetable};

/// Transactional sink for generated timetable rows.
pub trait EntryStore {
    /// Persists one chunk of entries as a single transaction.
    fn commit_chunk(&mut self, entries: &[ScheduleEntry]) -> Result<(), StoreError>;

    /// Persists break slots shown alongside the classes.
    fn commit_breaks(&mut self, breaks: &[BreakSlot]) -> Result<(), StoreError>;
}

impl<S: EntryStore + ?Sized> EntryStore for &mut S {
    fn commit_chunk(&mut self, entries: &[ScheduleEntry]) -> Result<(), StoreError> {
        (**self).commit_chunk(entries)
    }

    fn commit_breaks(&mut self, breaks: &[BreakSlot]) -> Result<(), StoreError> {
        (**self).commit_breaks(breaks)
    }
}

/// Store keeping everything in memory.
///
/// Never fails. Useful for previews and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Vec<ScheduleEntry>,
    breaks: Vec<BreakSlot>,
    commits: usize,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Persisted entries, in commit order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Persisted break slots.
    pub fn breaks(&self) -> &[BreakSlot] {
        &self.breaks
    }

    /// Number of successful chunk commits.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// Deletes everything (full regeneration).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.breaks.clear();
        self.commits = 0;
    }

    /// Converts the stored rows into a timetable.
    pub fn into_timetable(self) -> Timetable {
        Timetable {
            entries: self.entries,
            breaks: self.breaks,
            violations: Vec::new(),
        }
    }
}

impl EntryStore for InMemoryStore {
    fn commit_chunk(&mut self, entries: &[ScheduleEntry]) -> Result<(), StoreError> {
        self.entries.extend_from_slice(entries);
        self.commits += 1;
        Ok(())
    }

    fn commit_breaks(&mut self, breaks: &[BreakSlot]) -> Result<(), StoreError> {
        self.breaks.extend_from_slice(breaks);
        Ok(())
    }
}
