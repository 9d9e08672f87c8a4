//! Weekly quota calculation.
//!
//! Converts a subject's term load into the number of minutes it must be
//! taught each week, quantized to the scheduling quantum.
//!
//! # Formula
//!
//! ```text
//! raw    = H * D / W                         (minutes per week)
//! target = max(60, round_half_up(raw / 15) * 15)
//! ```
//!
//! where `H` is credit-hours, `D` the institutional hour length in minutes
//! and `W` the number of weeks. The rounding is computed exactly in integer
//! arithmetic: `round_half_up(n / d) = (2n + d) / 2d`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{MIN_WEEKLY_MINUTES, QUANTUM_MINUTES};

/// Invalid quota inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaError {
    /// Credit-hours must be positive.
    #[error("credit-hours must be positive, got {0}")]
    NonPositiveHours(i32),
    /// Weeks must be positive.
    #[error("weeks must be positive, got {0}")]
    NonPositiveWeeks(i32),
    /// Hour length must be positive.
    #[error("hour length must be positive, got {0} minutes")]
    NonPositiveHourLength(i32),
}

/// Quantized weekly quota.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyQuota {
    /// Target minutes per week. Always `>= 60` and a multiple of 15.
    pub target_minutes: u32,
    /// Unquantized minutes per week.
    pub raw_minutes: f64,
    /// Whether `raw_minutes` already was a multiple of 15 and at least 60.
    pub exact: bool,
}

/// Advisory breakdown of a quota computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaDetail {
    /// Credit-hours input.
    pub credit_hours: i32,
    /// Weeks input.
    pub weeks: i32,
    /// Institutional hour length (minutes).
    pub hour_length_minutes: i32,
    /// Total minutes over the term (`H * D`).
    pub total_minutes: i64,
    /// Unquantized minutes per week.
    pub raw_minutes_per_week: f64,
    /// Unquantized hours per week.
    pub hours_per_week: f64,
    /// Quantized minutes per week.
    pub adjusted_minutes: u32,
    /// Adjustment per week (adjusted - raw).
    pub diff_per_week: f64,
    /// Adjustment over the whole term.
    pub diff_total: f64,
    /// Exactness flag, see [`WeeklyQuota::exact`].
    pub exact: bool,
}

/// Computes the weekly quota for a subject.
///
/// # Errors
/// Returns [`QuotaError`] if any input is not strictly positive.
///
/// # Example
/// ```
/// use u_timetable::quota::weekly_quota;
///
/// let q = weekly_quota(2, 45, 1).unwrap();
/// assert_eq!(q.target_minutes, 90);
/// assert!(q.exact);
///
/// // 64 h * 45 min / 18 weeks = 160 min → rounds to 165
/// assert_eq!(weekly_quota(64, 45, 18).unwrap().target_minutes, 165);
/// ```
pub fn weekly_quota(
    credit_hours: i32,
    hour_length_minutes: i32,
    weeks: i32,
) -> Result<WeeklyQuota, QuotaError> {
    if credit_hours <= 0 {
        return Err(QuotaError::NonPositiveHours(credit_hours));
    }
    if weeks <= 0 {
        return Err(QuotaError::NonPositiveWeeks(weeks));
    }
    if hour_length_minutes <= 0 {
        return Err(QuotaError::NonPositiveHourLength(hour_length_minutes));
    }

    let total = i64::from(credit_hours) * i64::from(hour_length_minutes);
    let weeks = i64::from(weeks);
    let quantum = i64::from(QUANTUM_MINUTES);
    let floor = i64::from(MIN_WEEKLY_MINUTES);

    let divisor = quantum * weeks;
    let blocks = (2 * total + divisor) / (2 * divisor);
    let target = (blocks * quantum).max(floor);

    let exact = total % weeks == 0 && {
        let per_week = total / weeks;
        per_week % quantum == 0 && per_week >= floor
    };

    Ok(WeeklyQuota {
        target_minutes: u32::try_from(target).unwrap_or(u32::MAX),
        raw_minutes: total as f64 / weeks as f64,
        exact,
    })
}

/// Computes the quota together with its advisory breakdown.
pub fn quota_detail(
    credit_hours: i32,
    hour_length_minutes: i32,
    weeks: i32,
) -> Result<QuotaDetail, QuotaError> {
    let quota = weekly_quota(credit_hours, hour_length_minutes, weeks)?;
    let diff = f64::from(quota.target_minutes) - quota.raw_minutes;
    Ok(QuotaDetail {
        credit_hours,
        weeks,
        hour_length_minutes,
        total_minutes: i64::from(credit_hours) * i64::from(hour_length_minutes),
        raw_minutes_per_week: quota.raw_minutes,
        hours_per_week: quota.raw_minutes / 60.0,
        adjusted_minutes: quota.target_minutes,
        diff_per_week: diff,
        diff_total: diff * f64::from(weeks),
        exact: quota.exact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_quota() {
        let q = weekly_quota(2, 45, 1).unwrap();
        assert_eq!(q.target_minutes, 90);
        assert!((q.raw_minutes - 90.0).abs() < 1e-10);
        assert!(q.exact);
    }

    #[test]
    fn test_rounds_half_up() {
        // 7 * 45 / 3 = 105 → exact
        assert_eq!(weekly_quota(7, 45, 3).unwrap().target_minutes, 105);
        // 5 * 45 / 2 = 112.5 → 112.5 / 15 = 7.5 → rounds up to 8 → 120
        assert_eq!(weekly_quota(5, 45, 2).unwrap().target_minutes, 120);
        // 97 / 1 with D=1 → 6.47 blocks → 6 → 90
        assert_eq!(weekly_quota(97, 1, 1).unwrap().target_minutes, 90);
        // 98 / 15 = 6.53 → 7 → 105
        assert_eq!(weekly_quota(98, 1, 1).unwrap().target_minutes, 105);
    }

    #[test]
    fn test_floor_of_one_hour() {
        let q = weekly_quota(1, 45, 16).unwrap();
        assert_eq!(q.target_minutes, 60);
        assert!(!q.exact);

        // 45 minutes is a multiple of 15 but below the floor
        let q = weekly_quota(1, 45, 1).unwrap();
        assert_eq!(q.target_minutes, 60);
        assert!(!q.exact);
    }

    #[test]
    fn test_non_integer_raw_is_not_exact() {
        let q = weekly_quota(64, 45, 18).unwrap(); // 160.0
        assert!(!q.exact);
        let q = weekly_quota(10, 45, 4).unwrap(); // 112.5
        assert!(!q.exact);
        assert_eq!(q.target_minutes, 120);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(weekly_quota(0, 45, 10), Err(QuotaError::NonPositiveHours(0)));
        assert_eq!(weekly_quota(10, 45, -1), Err(QuotaError::NonPositiveWeeks(-1)));
        assert_eq!(
            weekly_quota(10, 0, 10),
            Err(QuotaError::NonPositiveHourLength(0))
        );
    }

    #[test]
    fn test_quantization_law() {
        for h in 1..=80 {
            for w in 1..=20 {
                for d in [40, 45, 50, 60] {
                    let t = weekly_quota(h, d, w).unwrap().target_minutes;
                    assert!(t >= 60, "h={h} d={d} w={w} → {t}");
                    assert_eq!(t % 15, 0, "h={h} d={d} w={w} → {t}");
                }
            }
        }
    }

    #[test]
    fn test_quota_detail() {
        let d = quota_detail(64, 45, 18).unwrap();
        assert_eq!(d.total_minutes, 2880);
        assert!((d.raw_minutes_per_week - 160.0).abs() < 1e-10);
        assert_eq!(d.adjusted_minutes, 165);
        assert!((d.diff_per_week - 5.0).abs() < 1e-10);
        assert!((d.diff_total - 90.0).abs() < 1e-10);
        assert!((d.hours_per_week - 160.0 / 60.0).abs() < 1e-10);
    }
}
