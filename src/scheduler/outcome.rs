//! Per-subject outcomes and the batch report.
//!
//! A subject that cannot be placed is not an error: the batch records why
//! and moves on to the next subject.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BreakSlot, ScheduleEntry, SubjectId, Timetable};
use crate::quota::QuotaDetail;

/// Why a subject received fewer minutes than its quota.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FailureReason {
    /// The subject has no teacher.
    #[error("no teacher assigned")]
    NoTeacherAssigned,
    /// The subject does not resolve to a cohort.
    #[error("no cohort (semester) assigned")]
    NoCohort,
    /// The cohort has no valid weekdays.
    #[error("cohort has no valid days")]
    NoValidDays,
    /// The shift name does not resolve to a shift.
    #[error("unknown shift '{0}'")]
    InvalidShift(String),
    /// Credit-hours, weeks or hour length are not positive.
    #[error("invalid quota: {0}")]
    InvalidQuota(String),
    /// No room is visible to the run's scope.
    #[error("no rooms available")]
    NoRoomsAvailable,
    /// The valid days did not have room for the quota.
    #[error("no space available ({placed}/{required} minutes placed)")]
    InsufficientCapacity {
        /// Target minutes.
        required: u32,
        /// Minutes actually placed.
        placed: u32,
    },
    /// The chunk containing the subject was rolled back.
    #[error("persistence failed: {0}")]
    Persistence(String),
}

/// Classification of a subject's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeStatus {
    /// Quota fully placed.
    Success,
    /// Some but not all of the quota placed.
    PartialSuccess,
    /// Nothing placed.
    Failure,
}

/// Result of scheduling one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectOutcome {
    /// Subject identifier.
    pub subject_id: SubjectId,
    /// Subject display name.
    pub subject_name: String,
    /// Overall status.
    pub status: OutcomeStatus,
    /// Weekly quota (0 when it could not be computed).
    pub target_minutes: u32,
    /// Minutes placed and persisted.
    pub assigned_minutes: u32,
    /// Reason for a non-success status.
    pub reason: Option<FailureReason>,
    /// Quota breakdown, when the quota was computable.
    pub detail: Option<QuotaDetail>,
}

impl SubjectOutcome {
    /// Outcome for a subject that placed nothing.
    pub fn failure(
        subject_id: SubjectId,
        subject_name: impl Into<String>,
        target_minutes: u32,
        reason: FailureReason,
    ) -> Self {
        Self {
            subject_id,
            subject_name: subject_name.into(),
            status: OutcomeStatus::Failure,
            target_minutes,
            assigned_minutes: 0,
            reason: Some(reason),
            detail: None,
        }
    }

    /// Outcome from placed versus target minutes.
    ///
    /// Zero placed minutes is a [`FailureReason::InsufficientCapacity`]
    /// failure, a shortfall is a partial success.
    pub fn from_placement(
        subject_id: SubjectId,
        subject_name: impl Into<String>,
        target_minutes: u32,
        assigned_minutes: u32,
    ) -> Self {
        let (status, reason) = if assigned_minutes >= target_minutes {
            (OutcomeStatus::Success, None)
        } else {
            let status = if assigned_minutes == 0 {
                OutcomeStatus::Failure
            } else {
                OutcomeStatus::PartialSuccess
            };
            let reason = FailureReason::InsufficientCapacity {
                required: target_minutes,
                placed: assigned_minutes,
            };
            (status, Some(reason))
        };
        Self {
            subject_id,
            subject_name: subject_name.into(),
            status,
            target_minutes,
            assigned_minutes,
            reason,
            detail: None,
        }
    }

    /// Attaches the quota breakdown.
    pub fn with_detail(mut self, detail: QuotaDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Whether the quota was fully placed.
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// Placed share of the quota (0.0..=1.0).
    pub fn completion(&self) -> f64 {
        if self.target_minutes == 0 {
            0.0
        } else {
            f64::from(self.assigned_minutes) / f64::from(self.target_minutes)
        }
    }

    /// One-line human-readable summary of a non-success outcome.
    pub fn warning(&self) -> Option<String> {
        let reason = self.reason.as_ref()?;
        Some(match self.status {
            OutcomeStatus::PartialSuccess => format!(
                "{} → partial ({}/{} minutes): {}",
                self.subject_name, self.assigned_minutes, self.target_minutes, reason
            ),
            _ => format!("{} → {}", self.subject_name, reason),
        })
    }
}

/// Result of a whole batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Outcomes in processing order.
    pub outcomes: Vec<SubjectOutcome>,
    /// Newly persisted entries.
    pub entries: Vec<ScheduleEntry>,
    /// Materialized break slots.
    pub breaks: Vec<BreakSlot>,
    /// Run-level notes (ignored rooms, break persistence problems).
    pub notes: Vec<String>,
    /// Maximum number of failure lines in [`warnings`](Self::warnings).
    pub max_reported: usize,
}

impl BatchReport {
    /// Creates an empty report.
    pub fn new(max_reported: usize) -> Self {
        Self {
            max_reported,
            ..Self::default()
        }
    }

    /// Number of fully placed subjects.
    pub fn success_count(&self) -> usize {
        self.count(OutcomeStatus::Success)
    }

    /// Number of partially placed subjects.
    pub fn partial_count(&self) -> usize {
        self.count(OutcomeStatus::PartialSuccess)
    }

    /// Number of subjects that placed nothing.
    pub fn failure_count(&self) -> usize {
        self.count(OutcomeStatus::Failure)
    }

    fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Outcomes that are not a full success.
    pub fn failures(&self) -> impl Iterator<Item = &SubjectOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Outcome of one subject.
    pub fn outcome(&self, subject: SubjectId) -> Option<&SubjectOutcome> {
        self.outcomes.iter().find(|o| o.subject_id == subject)
    }

    /// Bounded list of human-readable failure lines followed by run notes.
    ///
    /// At most `max_reported` subject lines are listed; the rest are
    /// summarized as `"... (N more subjects without space)"`.
    pub fn warnings(&self) -> Vec<String> {
        let lines: Vec<String> = self.failures().filter_map(SubjectOutcome::warning).collect();
        let hidden = lines.len().saturating_sub(self.max_reported);

        let mut out: Vec<String> = lines.into_iter().take(self.max_reported).collect();
        if hidden > 0 {
            out.push(format!("... ({hidden} more subjects without space)"));
        }
        out.extend(self.notes.iter().cloned());
        out
    }

    /// Whether every subject succeeded and nothing was noted.
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none() && self.notes.is_empty()
    }

    /// Total minutes placed in this run.
    pub fn assigned_minutes(&self) -> u32 {
        self.outcomes.iter().map(|o| o.assigned_minutes).sum()
    }

    /// The new entries and breaks as a timetable.
    pub fn timetable(&self) -> Timetable {
        Timetable {
            entries: self.entries.clone(),
            breaks: self.breaks.clone(),
            violations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_placement_statuses() {
        let ok = SubjectOutcome::from_placement(SubjectId(1), "A", 90, 90);
        assert_eq!(ok.status, OutcomeStatus::Success);
        assert!(ok.reason.is_none());
        assert!(ok.warning().is_none());

        let partial = SubjectOutcome::from_placement(SubjectId(2), "B", 90, 45);
        assert_eq!(partial.status, OutcomeStatus::PartialSuccess);
        assert!((partial.completion() - 0.5).abs() < 1e-10);
        assert_eq!(
            partial.warning().unwrap(),
            "B → partial (45/90 minutes): no space available (45/90 minutes placed)"
        );

        let none = SubjectOutcome::from_placement(SubjectId(3), "C", 90, 0);
        assert_eq!(none.status, OutcomeStatus::Failure);
        assert_eq!(
            none.reason,
            Some(FailureReason::InsufficientCapacity {
                required: 90,
                placed: 0
            })
        );
    }

    #[test]
    fn test_failure_reason_display() {
        assert_eq!(
            FailureReason::InvalidShift("Noon".into()).to_string(),
            "unknown shift 'Noon'"
        );
        assert_eq!(FailureReason::NoCohort.to_string(), "no cohort (semester) assigned");
    }

    #[test]
    fn test_warnings_are_bounded() {
        let mut report = BatchReport::new(2);
        for i in 0..5 {
            report.outcomes.push(SubjectOutcome::failure(
                SubjectId(i),
                format!("S{i}"),
                60,
                FailureReason::NoTeacherAssigned,
            ));
        }
        report.outcomes.push(SubjectOutcome::from_placement(SubjectId(9), "ok", 60, 60));
        report.notes.push("room R7 ignored".into());

        let w = report.warnings();
        assert_eq!(
            w,
            vec![
                "S0 → no teacher assigned".to_string(),
                "S1 → no teacher assigned".to_string(),
                "... (3 more subjects without space)".to_string(),
                "room R7 ignored".to_string(),
            ]
        );
        assert_eq!(report.failure_count(), 5);
        assert_eq!(report.success_count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_clean_report() {
        let mut report = BatchReport::new(20);
        report.outcomes.push(SubjectOutcome::from_placement(SubjectId(1), "A", 60, 60));
        assert!(report.is_clean());
        assert!(report.warnings().is_empty());
        assert_eq!(report.assigned_minutes(), 60);
        assert!(report.outcome(SubjectId(1)).is_some());
    }

    #[test]
    fn test_outcome_serializes() {
        let o = SubjectOutcome::failure(SubjectId(4), "Chem", 0, FailureReason::NoValidDays);
        let json = serde_json::to_string(&o).unwrap();
        let back: SubjectOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, o);
    }
}
