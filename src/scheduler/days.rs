//! Day selection.
//!
//! Orders a cohort's valid weekdays for one subject: least-loaded days
//! first, canonical weekday order on ties, then rotated by a per-subject
//! offset so subjects of the same batch do not all start on the same day.
//!
//! The rotation is deterministic: identical inputs and policy always yield
//! the same order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityIndex;
use crate::models::{SubjectId, Weekday};

/// How the rotation offset is derived from the subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RotationPolicy {
    /// `subject_id mod number_of_days`.
    #[default]
    SubjectId,
    /// Offset drawn from a generator seeded with `seed ^ subject_id`.
    Seeded {
        /// Run seed.
        seed: u64,
    },
}

impl RotationPolicy {
    /// Rotation offset in `0..days`. Zero when `days == 0`.
    pub fn offset(&self, subject: SubjectId, days: usize) -> usize {
        if days == 0 {
            return 0;
        }
        match *self {
            RotationPolicy::SubjectId => (subject.get() % days as u64) as usize,
            RotationPolicy::Seeded { seed } => {
                let mut rng = StdRng::seed_from_u64(seed ^ subject.get());
                rng.random_range(0..days)
            }
        }
    }
}

/// Orders candidate days for a subject.
///
/// # Algorithm
/// 1. Deduplicate `valid_days`.
/// 2. Sort ascending by `(entries already placed that day, weekday rank)`.
/// 3. Rotate left by `policy.offset(subject, n)`.
///
/// Returns an empty list when `valid_days` is empty.
pub fn order_days(
    valid_days: &[Weekday],
    index: &AvailabilityIndex,
    subject: SubjectId,
    policy: &RotationPolicy,
) -> Vec<Weekday> {
    let mut days: Vec<Weekday> = Vec::with_capacity(valid_days.len());
    for &day in valid_days {
        if !days.contains(&day) {
            days.push(day);
        }
    }
    days.sort_by_key(|&d| (index.entry_count(d), d.rank()));

    let offset = policy.offset(subject, days.len());
    days.rotate_left(offset);
    days
}
