//! Greedy timetable construction and KPI evaluation.
//!
//! # Pipeline
//!
//! For each subject the batch driver computes the weekly quota, orders the
//! cohort's days ([`order_days`]), walks each day in 15-minute quanta
//! ([`walk_day`]) and folds the resulting segments into the availability
//! index before the next subject is considered. Chunks of subjects are
//! persisted atomically through an [`EntryStore`](crate::store::EntryStore).
//!
//! The heuristic is first-fit: it is deterministic and fast, not optimal.
//!
//! # KPI
//!
//! [`TimetableKpi`] reports quota coverage, outcome rates, weekday load and
//! room utilization.

mod batch;
mod committer;
mod days;
mod kpi;
mod outcome;
mod walker;

pub use batch::{TimetableRequest, TimetableScheduler};
pub use committer::PlacementCommitter;
pub use days::{order_days, RotationPolicy};
pub use kpi::TimetableKpi;
pub use outcome::{BatchReport, FailureReason, OutcomeStatus, SubjectOutcome};
pub use walker::{walk_day, PlacementRequest, Segment};
