use chrono::NaiveDate;

use crate::engine::counter::{is_working_day, scheduled_lectures};
use crate::error::MutationError;
use crate::model::lecture::{LectureId, LectureStatus};
use crate::model::ledger::{AttendanceLedger, LedgerMutation};
use crate::model::semester::SemesterConfig;

/// Flips the holiday flag for `date`. Lecture entries stay in the ledger; the
/// aggregator ignores them while the flag is set.
pub fn plan_toggle_holiday(ledger: &AttendanceLedger, date: NaiveDate) -> LedgerMutation {
    LedgerMutation::SetHoliday {
        date,
        holiday: !ledger.is_holiday(date),
    }
}

/// Write set for taking the whole day off: `absent` for every lecture the
/// aggregator would read on `date`. `None` when there is nothing to write, i.e. on
/// weekends, holidays, dates outside the semester or days without lectures.
pub fn plan_mark_leave(
    config: &SemesterConfig,
    ledger: &AttendanceLedger,
    date: NaiveDate,
) -> Option<LedgerMutation> {
    if !config.contains(date) || !is_working_day(config, ledger.holidays(), date) {
        return None;
    }
    let lectures: Vec<LectureId> = scheduled_lectures(config, date).collect();
    if lectures.is_empty() {
        return None;
    }
    Some(LedgerMutation::MarkDayAbsent { date, lectures })
}

pub fn plan_lecture_status(
    date: NaiveDate,
    lecture: LectureId,
    status: LectureStatus,
) -> LedgerMutation {
    LedgerMutation::SetLectureStatus {
        date,
        lecture,
        status,
    }
}

/// Rejects writes the accounting rules could never read back: future dates,
/// dates outside the semester, and lecture marks on non-instructional days or for
/// lectures that are not scheduled.
pub fn check_mutation(
    config: &SemesterConfig,
    ledger: &AttendanceLedger,
    today: NaiveDate,
    mutation: &LedgerMutation,
) -> Result<(), MutationError> {
    let date = mutation.date();
    if date > today {
        return Err(MutationError::FutureDate { date, today });
    }
    if !config.contains(date) {
        return Err(MutationError::OutsideSemester {
            date,
            start: config.start_date(),
            end: config.end_date(),
        });
    }

    let lectures: &[LectureId] = match mutation {
        LedgerMutation::SetHoliday { .. } => return Ok(()),
        LedgerMutation::SetLectureStatus { lecture, .. } => std::slice::from_ref(lecture),
        LedgerMutation::MarkDayAbsent { lectures, .. } => lectures,
    };

    if !is_working_day(config, ledger.holidays(), date) {
        return Err(MutationError::NonInstructionalDay(date));
    }
    let scheduled: Vec<LectureId> = scheduled_lectures(config, date).collect();
    if let Some(unknown) = lectures.iter().find(|l| !scheduled.contains(*l)) {
        return Err(MutationError::UnknownLecture {
            date,
            lecture: unknown.clone(),
        });
    }
    Ok(())
}
