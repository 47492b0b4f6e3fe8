//! The attendance accounting engine.
//!
//! Everything here is a pure function of a [`SemesterConfig`], an
//! [`AttendanceLedger`] snapshot and an explicit as-of date. Nothing reads the
//! clock, touches storage or keeps state between calls.

pub mod aggregate;
pub mod counter;
pub mod day;
pub mod mutation;
pub mod policy;

#[cfg(test)]
mod aggregate_test;

use chrono::NaiveDate;

use crate::model::ledger::AttendanceLedger;
use crate::model::semester::SemesterConfig;
use crate::model::stats::{StatsReport, SubjectStats};
use crate::time::month_bounds;

pub use aggregate::{aggregate, Attendance, SubjectTally};
pub use counter::{count_lectures, is_working_day, scheduled_lectures};
pub use day::{day_view, DayKind, DayView, LectureView};
pub use mutation::{check_mutation, plan_lecture_status, plan_mark_leave, plan_toggle_holiday};
pub use policy::{band, bunks_left, AttendanceBand, ATTENDANCE_THRESHOLD};

/// Full stats report as of `today`.
///
/// Bunk budgets are planned against whole intervals, future lectures included:
/// the semester, the calendar month containing `today` (clamped to the semester),
/// and each subject's semester. Absences only count up to `today`.
pub fn compute_report(
    config: &SemesterConfig,
    ledger: &AttendanceLedger,
    today: NaiveDate,
) -> StatsReport {
    let holidays = ledger.holidays();
    let attendance = aggregate(config, ledger, today);
    let (start, end) = (config.start_date(), config.end_date());

    let semester_total = count_lectures(config, holidays, start, end, None);
    let (month_start, month_end) = month_bounds(today);
    let month_total = count_lectures(config, holidays, month_start, month_end, None);

    let subjects = attendance
        .subjects
        .into_iter()
        .map(|SubjectTally { subject, tally }| {
            let total = count_lectures(config, holidays, start, end, Some(&subject));
            SubjectStats {
                bunks_left: bunks_left(total, tally.absent),
                subject,
                tally,
            }
        })
        .collect();

    StatsReport {
        started: today >= start,
        overall: attendance.overall,
        monthly: attendance.monthly,
        subjects,
        semester_bunks_left: bunks_left(semester_total, attendance.overall.absent),
        monthly_bunks_left: bunks_left(month_total, attendance.monthly.absent),
    }
}
