use serde::{Deserialize, Serialize};

use crate::model::stats::Tally;

/// Minimum share of lectures that must be attended, as a fraction (3/4 = 75%).
const REQUIRED_NUMERATOR: u64 = 3;
const REQUIRED_DENOMINATOR: u64 = 4;

pub const ATTENDANCE_THRESHOLD: f64 = REQUIRED_NUMERATOR as f64 / REQUIRED_DENOMINATOR as f64;

/// Below this ratio a subject is flagged as critical rather than merely short.
pub const WARNING_THRESHOLD: f64 = 0.60;

/// `ceil(total * 0.75)`, computed in integers.
pub fn required_lectures(total: u32) -> u32 {
    let total = u64::from(total);
    let required = (total * REQUIRED_NUMERATOR).div_ceil(REQUIRED_DENOMINATOR);
    // required <= total, so this always fits
    u32::try_from(required).unwrap_or(u32::MAX)
}

pub fn max_allowed_absences(total: u32) -> u32 {
    total - required_lectures(total)
}

/// Absences still tolerable in a scope before attendance drops below the threshold.
/// Floored at zero for anyone already over budget.
pub fn bunks_left(total: u32, absent: u32) -> u32 {
    max_allowed_absences(total).saturating_sub(absent)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceBand {
    Safe,
    Short,
    Critical,
}

/// Classifies a bucket on its unrounded ratio. A displayed "75.0%" can hide
/// 74.96%, which is short.
pub fn band(tally: &Tally) -> Option<AttendanceBand> {
    tally.ratio().map(|ratio| {
        if ratio >= ATTENDANCE_THRESHOLD {
            AttendanceBand::Safe
        } else if ratio >= WARNING_THRESHOLD {
            AttendanceBand::Short
        } else {
            AttendanceBand::Critical
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bunk_budget() {
        assert_eq!(required_lectures(20), 15);
        assert_eq!(max_allowed_absences(20), 5);
        assert_eq!(bunks_left(20, 3), 2);
    }

    #[test]
    fn test_required_rounds_up() {
        assert_eq!(required_lectures(1), 1);
        assert_eq!(required_lectures(5), 4);
        assert_eq!(max_allowed_absences(5), 1);
        assert_eq!(required_lectures(7), 6);
    }

    #[test]
    fn test_zero_total() {
        assert_eq!(required_lectures(0), 0);
        assert_eq!(max_allowed_absences(0), 0);
        assert_eq!(bunks_left(0, 0), 0);
        assert_eq!(bunks_left(0, 4), 0);
    }

    #[test]
    fn test_bunks_never_negative() {
        for total in 0..60 {
            for absent in 0..80 {
                let left = bunks_left(total, absent);
                assert!(left <= max_allowed_absences(total));
            }
        }
        assert_eq!(bunks_left(20, 9), 0);
        assert_eq!(bunks_left(u32::MAX, u32::MAX), 0);
    }

    #[test]
    fn test_band_uses_unrounded_ratio() {
        // 7499/10000 = 74.99% displays as 75.0% but is short.
        let tally = Tally { total: 10000, attended: 7499, absent: 2501 };
        assert_eq!(tally.percentage(), Some(75.0));
        assert_eq!(band(&tally), Some(AttendanceBand::Short));

        let tally = Tally { total: 4, attended: 3, absent: 1 };
        assert_eq!(band(&tally), Some(AttendanceBand::Safe));

        let tally = Tally { total: 10, attended: 5, absent: 5 };
        assert_eq!(band(&tally), Some(AttendanceBand::Critical));

        assert_eq!(band(&Tally::default()), None);
    }
}
