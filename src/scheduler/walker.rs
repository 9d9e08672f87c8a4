//! Slot walker: places a subject's remaining minutes within one day.
//!
//! # Algorithm
//!
//! Walks the shift window in 15-minute quanta, maintaining at most one open
//! segment (start time + room):
//!
//! 1. If the next quantum crosses a break, close the open segment at the
//!    break start and jump the cursor to the break end, even when that end
//!    is off the quantum grid.
//! 2. With no open segment, try every candidate room for the quantum with
//!    the subject's teacher; the first feasible room opens a segment. If
//!    none fits, skip the quantum and retry at the next one.
//! 3. With an open segment, extend it to the next quantum boundary if the
//!    enlarged interval is still feasible in the same room. Otherwise close
//!    it and retry opening at the same cursor.
//! 4. A segment closes as soon as it covers the remaining quota, and any
//!    segment still open at shift end is closed there.
//!
//! Closing converts elapsed minutes into consumed quota, rounded down to
//! whole quanta and capped at the remaining quota. Every produced segment
//! is therefore a positive multiple of 15 minutes.
//!
//! # Complexity
//! O(q * r * e) per day where q = quanta in the shift, r = candidate rooms,
//! e = entries indexed for the day.

use crate::availability::{AvailabilityIndex, SlotQuery};
use crate::models::time::floor_to_quantum;
use crate::models::{
    ClockTime, CohortId, RoomId, Shift, SubjectId, TeacherId, TimeRange, Weekday,
    QUANTUM_MINUTES,
};

/// Resolved placement inputs for one subject.
#[derive(Debug, Clone, Copy)]
pub struct PlacementRequest<'a> {
    /// Subject being placed.
    pub subject: SubjectId,
    /// Teacher used for every segment.
    pub teacher: TeacherId,
    /// Cohort whose other classes must not overlap.
    pub cohort: CohortId,
    /// Shift bounding the walk.
    pub shift: Shift,
    /// Candidate rooms, tried in order.
    pub rooms: &'a [RoomId],
}

impl PlacementRequest<'_> {
    fn query(&self, room: RoomId, weekday: Weekday, range: TimeRange) -> SlotQuery {
        SlotQuery {
            teacher: self.teacher,
            room,
            cohort: self.cohort,
            weekday,
            range,
        }
    }
}

/// One contiguous placed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Weekday.
    pub weekday: Weekday,
    /// Room hosting the whole segment.
    pub room: RoomId,
    /// Time range.
    pub range: TimeRange,
}

impl Segment {
    /// Duration in minutes.
    #[inline]
    pub fn minutes(&self) -> u32 {
        u32::from(self.range.duration_minutes())
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenSegment {
    start: ClockTime,
    room: RoomId,
}

struct DayWalk {
    weekday: Weekday,
    remaining: u32,
    segments: Vec<Segment>,
}

impl DayWalk {
    fn close(&mut self, seg: OpenSegment, end: ClockTime) {
        let elapsed = u32::from(floor_to_quantum(end.minutes_since(seg.start)));
        let minutes = elapsed.min(self.remaining);
        if minutes == 0 {
            return;
        }
        // minutes <= elapsed, which fits in a day
        let range = TimeRange::new(seg.start, seg.start.add_minutes(minutes as u16));
        tracing::trace!(weekday = %self.weekday, room = %seg.room, %range, "segment closed");
        self.segments.push(Segment {
            weekday: self.weekday,
            room: seg.room,
            range,
        });
        self.remaining -= minutes;
    }
}

/// Places up to `remaining` minutes on `weekday`.
///
/// The index is only read; committing the returned segments is the
/// caller's job.
pub fn walk_day(
    index: &AvailabilityIndex,
    request: &PlacementRequest<'_>,
    weekday: Weekday,
    remaining: u32,
) -> Vec<Segment> {
    let window = request.shift.window();
    let mut walk = DayWalk {
        weekday,
        remaining,
        segments: Vec::new(),
    };
    let mut cursor = window.start;
    let mut open: Option<OpenSegment> = None;

    while cursor < window.end && walk.remaining > 0 {
        let next = cursor.add_minutes(QUANTUM_MINUTES).min(window.end);
        let quantum = TimeRange::new(cursor, next);

        if let Some(brk) = index.break_overlapping(weekday, &quantum) {
            if let Some(seg) = open.take() {
                walk.close(seg, brk.start.max(seg.start));
            }
            // overlapping, so brk.end > cursor
            cursor = brk.end;
            continue;
        }

        match open {
            None => {
                open = request
                    .rooms
                    .iter()
                    .copied()
                    .find(|&room| index.feasible(&request.query(room, weekday, quantum)))
                    .map(|room| OpenSegment {
                        start: cursor,
                        room,
                    });
                cursor = next;
            }
            Some(seg) => {
                let grown = TimeRange::new(seg.start, next);
                if index.feasible(&request.query(seg.room, weekday, grown)) {
                    cursor = next;
                } else {
                    walk.close(seg, cursor);
                    open = None;
                    continue;
                }
            }
        }

        if let Some(seg) = open {
            if u32::from(cursor.minutes_since(seg.start)) >= walk.remaining {
                walk.close(seg, cursor);
                open = None;
            }
        }
    }

    if let Some(seg) = open {
        walk.close(seg, cursor.min(window.end));
    }

    walk.segments
}
