//! Timetable quality metrics (KPIs).
//!
//! Computes indicators from a generated timetable and the per-subject
//! outcomes of the run that produced it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placed minutes | Sum of entry durations |
//! | Quota coverage | placed / target over all subjects |
//! | Success rate | Fraction of subjects fully placed |
//! | Room utilization | busy minutes / teaching capacity |
//! | Weekday load | Placed minutes per weekday |
//!
//! Teaching capacity is the summed window length of every (weekday, shift)
//! pair used by at least one entry.

use std::collections::{HashMap, HashSet};

use crate::models::{RoomId, Timetable, Weekday};

use super::outcome::{OutcomeStatus, SubjectOutcome};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Total placed minutes.
    pub placed_minutes: u32,
    /// Total target minutes of all subjects.
    pub target_minutes: u32,
    /// placed / target (1.0 when nothing was requested).
    pub quota_coverage: f64,
    /// Fully placed subjects.
    pub success_count: usize,
    /// Partially placed subjects.
    pub partial_count: usize,
    /// Subjects with nothing placed.
    pub failure_count: usize,
    /// Fraction of subjects fully placed (1.0 for an empty run).
    pub success_rate: f64,
    /// Placed minutes per weekday.
    pub minutes_by_weekday: HashMap<Weekday, u32>,
    /// Per-room utilization (0.0..1.0).
    pub utilization_by_room: HashMap<RoomId, f64>,
    /// Mean room utilization.
    pub avg_utilization: f64,
}

impl TimetableKpi {
    /// Computes KPIs from a timetable and the outcomes of its run.
    pub fn calculate(timetable: &Timetable, outcomes: &[SubjectOutcome]) -> Self {
        let placed_minutes: u32 = timetable
            .entries
            .iter()
            .map(|e| u32::from(e.duration_minutes()))
            .sum();
        let target_minutes: u32 = outcomes.iter().map(|o| o.target_minutes).sum();

        let count = |status: OutcomeStatus| outcomes.iter().filter(|o| o.status == status).count();
        let success_count = count(OutcomeStatus::Success);
        let partial_count = count(OutcomeStatus::PartialSuccess);
        let failure_count = count(OutcomeStatus::Failure);

        let success_rate = if outcomes.is_empty() {
            1.0
        } else {
            success_count as f64 / outcomes.len() as f64
        };

        let assigned: u32 = outcomes.iter().map(|o| o.assigned_minutes).sum();
        let quota_coverage = if target_minutes == 0 {
            1.0
        } else {
            f64::from(assigned) / f64::from(target_minutes)
        };

        let windows: HashSet<_> = timetable.entries.iter().map(|e| (e.weekday, e.shift)).collect();
        let capacity: u32 = windows
            .iter()
            .map(|(_, shift)| u32::from(shift.window().duration_minutes()))
            .sum();

        let utilization_by_room: HashMap<RoomId, f64> = timetable
            .busy_minutes_by_room()
            .into_iter()
            .map(|(room, busy)| {
                let u = if capacity == 0 {
                    0.0
                } else {
                    f64::from(busy) / f64::from(capacity)
                };
                (room, u)
            })
            .collect();
        let avg_utilization = if utilization_by_room.is_empty() {
            0.0
        } else {
            utilization_by_room.values().sum::<f64>() / utilization_by_room.len() as f64
        };

        Self {
            placed_minutes,
            target_minutes,
            quota_coverage,
            success_count,
            partial_count,
            failure_count,
            success_rate,
            minutes_by_weekday: timetable.minutes_by_weekday(),
            utilization_by_room,
            avg_utilization,
        }
    }

    /// Whether the run meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_success_rate: f64, min_coverage: f64) -> bool {
        self.success_rate >= min_success_rate && self.quota_coverage >= min_coverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CohortId, ScheduleEntry, Shift, SubjectId, TeacherId, TimeRange};

    fn entry(subject: u64, room: u64, day: Weekday, r: TimeRange) -> ScheduleEntry {
        ScheduleEntry {
            subject: SubjectId(subject),
            teacher: TeacherId(subject),
            room: RoomId(room),
            cohort: CohortId(1),
            weekday: day,
            shift: Shift::Morning,
            range: r,
        }
    }

    #[test]
    fn test_kpi_basic() {
        let timetable = Timetable::from_entries(vec![
            entry(1, 1, Weekday::Monday, TimeRange::hm((7, 30), (9, 0))),
            entry(2, 2, Weekday::Monday, TimeRange::hm((9, 0), (9, 40))),
        ]);
        let outcomes = vec![
            SubjectOutcome::from_placement(SubjectId(1), "A", 90, 90),
            SubjectOutcome::from_placement(SubjectId(2), "B", 80, 40),
            SubjectOutcome::from_placement(SubjectId(3), "C", 30, 0),
        ];

        let kpi = TimetableKpi::calculate(&timetable, &outcomes);
        assert_eq!(kpi.placed_minutes, 130);
        assert_eq!(kpi.target_minutes, 200);
        assert!((kpi.quota_coverage - 0.65).abs() < 1e-10);
        assert_eq!(kpi.success_count, 1);
        assert_eq!(kpi.partial_count, 1);
        assert_eq!(kpi.failure_count, 1);
        assert!((kpi.success_rate - 1.0 / 3.0).abs() < 1e-10);
        assert_eq!(kpi.minutes_by_weekday[&Weekday::Monday], 130);
    }

    #[test]
    fn test_kpi_room_utilization() {
        // Morning window is 320 minutes, one (weekday, shift) pair in use
        let timetable = Timetable::from_entries(vec![
            entry(1, 1, Weekday::Monday, TimeRange::hm((7, 30), (10, 10))),
            entry(2, 2, Weekday::Monday, TimeRange::hm((7, 30), (8, 50))),
        ]);
        let kpi = TimetableKpi::calculate(&timetable, &[]);
        assert!((kpi.utilization_by_room[&RoomId(1)] - 0.5).abs() < 1e-10);
        assert!((kpi.utilization_by_room[&RoomId(2)] - 0.25).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.375).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = TimetableKpi::calculate(&Timetable::new(), &[]);
        assert_eq!(kpi.placed_minutes, 0);
        assert!((kpi.success_rate - 1.0).abs() < 1e-10);
        assert!((kpi.quota_coverage - 1.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_meets_thresholds() {
        let outcomes = vec![
            SubjectOutcome::from_placement(SubjectId(1), "A", 60, 60),
            SubjectOutcome::from_placement(SubjectId(2), "B", 60, 30),
        ];
        let kpi = TimetableKpi::calculate(&Timetable::new(), &outcomes);
        assert!(kpi.meets_thresholds(0.5, 0.75));
        assert!(!kpi.meets_thresholds(0.6, 0.0));
        assert!(!kpi.meets_thresholds(0.0, 0.8));
    }
}
