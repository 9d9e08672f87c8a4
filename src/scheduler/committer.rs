//! Placement committer.
//!
//! Turns walker segments into [`ScheduleEntry`] rows, folds them into the
//! availability index right away so the next subject sees them, and
//! persists them per chunk.
//!
//! A checkpoint of the index is taken when a chunk begins. If the store
//! rejects the chunk, the index is restored from it, so the rolled-back
//! slots become free again for the following chunks.

use crate::availability::AvailabilityIndex;
use crate::error::StoreError;
use crate::models::ScheduleEntry;
use crate::store::EntryStore;

use super::walker::{PlacementRequest, Segment};

/// Accumulates one chunk's entries until they are committed.
#[derive(Debug, Default)]
pub struct PlacementCommitter {
    checkpoint: Option<AvailabilityIndex>,
    pending: Vec<ScheduleEntry>,
}

impl PlacementCommitter {
    /// Creates an idle committer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a chunk, remembering the index state to roll back to.
    pub fn begin_chunk(&mut self, index: &AvailabilityIndex) {
        self.checkpoint = Some(index.clone());
        self.pending.clear();
    }

    /// Entries placed since the chunk began.
    pub fn pending(&self) -> &[ScheduleEntry] {
        &self.pending
    }

    /// Records a subject's segments and makes them visible in the index.
    ///
    /// Returns the number of entries created.
    pub fn place(
        &mut self,
        index: &mut AvailabilityIndex,
        request: &PlacementRequest<'_>,
        segments: &[Segment],
    ) -> usize {
        for seg in segments {
            let entry = ScheduleEntry {
                subject: request.subject,
                teacher: request.teacher,
                room: seg.room,
                cohort: request.cohort,
                weekday: seg.weekday,
                shift: request.shift,
                range: seg.range,
            };
            index.insert(entry.clone());
            self.pending.push(entry);
        }
        segments.len()
    }

    /// Persists the chunk.
    ///
    /// On success returns the committed entries. On failure the index is
    /// restored to its state at [`begin_chunk`](Self::begin_chunk) and the
    /// pending entries are discarded.
    pub fn commit<S: EntryStore + ?Sized>(
        &mut self,
        index: &mut AvailabilityIndex,
        store: &mut S,
    ) -> Result<Vec<ScheduleEntry>, StoreError> {
        let checkpoint = self.checkpoint.take();
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return Ok(pending);
        }

        match store.commit_chunk(&pending) {
            Ok(()) => Ok(pending),
            Err(err) => {
                if let Some(saved) = checkpoint {
                    *index = saved;
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BreakSlot, CohortId, RoomId, Shift, SubjectId, TeacherId, TimeRange, Weekday};
    use crate::store::InMemoryStore;

    struct RejectingStore;

    impl EntryStore for RejectingStore {
        fn commit_chunk(&mut self, _: &[ScheduleEntry]) -> Result<(), StoreError> {
            Err(StoreError::Rejected("disk full".into()))
        }
        fn commit_breaks(&mut self, _: &[BreakSlot]) -> Result<(), StoreError> {
            Ok(())
        }
    }

    const ROOMS: [RoomId; 1] = [RoomId(1)];

    fn request() -> PlacementRequest<'static> {
        PlacementRequest {
            subject: SubjectId(4),
            teacher: TeacherId(2),
            cohort: CohortId(3),
            shift: Shift::Morning,
            rooms: &ROOMS,
        }
    }

    fn segments() -> Vec<Segment> {
        vec![
            Segment {
                weekday: Weekday::Monday,
                room: RoomId(1),
                range: TimeRange::hm((7, 30), (8, 0)),
            },
            Segment {
                weekday: Weekday::Monday,
                room: RoomId(1),
                range: TimeRange::hm((8, 30), (9, 30)),
            },
        ]
    }

    #[test]
    fn test_place_folds_into_index() {
        let mut index = AvailabilityIndex::new();
        let mut committer = PlacementCommitter::new();
        committer.begin_chunk(&index);

        assert_eq!(committer.place(&mut index, &request(), &segments()), 2);
        assert_eq!(index.entry_count(Weekday::Monday), 2);
        assert_eq!(committer.pending().len(), 2);

        let e = &committer.pending()[1];
        assert_eq!(e.subject, SubjectId(4));
        assert_eq!(e.teacher, TeacherId(2));
        assert_eq!(e.cohort, CohortId(3));
        assert_eq!(e.shift, Shift::Morning);
        assert_eq!(e.range, TimeRange::hm((8, 30), (9, 30)));
    }

    #[test]
    fn test_commit_success() {
        let mut index = AvailabilityIndex::new();
        let mut store = InMemoryStore::new();
        let mut committer = PlacementCommitter::new();
        committer.begin_chunk(&index);
        committer.place(&mut index, &request(), &segments());

        let committed = committer.commit(&mut index, &mut store).unwrap();
        assert_eq!(committed.len(), 2);
        assert_eq!(store.entries().len(), 2);
        assert_eq!(index.len(), 2);
        assert!(committer.pending().is_empty());
    }

    #[test]
    fn test_commit_failure_rolls_back_index() {
        let mut index = AvailabilityIndex::new();
        let mut committer = PlacementCommitter::new();
        committer.begin_chunk(&index);
        committer.place(&mut index, &request(), &segments());
        assert_eq!(index.len(), 2);

        let err = committer.commit(&mut index, &mut RejectingStore).unwrap_err();
        assert_eq!(err, StoreError::Rejected("disk full".into()));
        assert!(index.is_empty());
        assert!(committer.pending().is_empty());
    }

    #[test]
    fn test_empty_chunk_skips_store() {
        let mut index = AvailabilityIndex::new();
        let mut committer = PlacementCommitter::new();
        committer.begin_chunk(&index);
        // the rejecting store is never called
        let committed = committer.commit(&mut index, &mut RejectingStore).unwrap();
        assert!(committed.is_empty());
    }
}
