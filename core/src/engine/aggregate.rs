use chrono::NaiveDate;

use crate::engine::counter::{is_working_day, scheduled_lectures};
use crate::model::ledger::AttendanceLedger;
use crate::model::semester::SemesterConfig;
use crate::model::stats::Tally;
use crate::time::{days_inclusive, same_month};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectTally {
    pub subject: String,
    pub tally: Tally,
}

/// Attended/absent counts as of one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendance {
    pub overall: Tally,
    pub monthly: Tally,
    pub subjects: Vec<SubjectTally>,
}

/// Walks every accountable day, `[start_date, min(end_date, today)]`, and tallies each
/// scheduled lecture. Weekends and holidays are skipped whatever the ledger holds
/// for them; a lecture without a `present` entry is absent.
pub fn aggregate(
    config: &SemesterConfig,
    ledger: &AttendanceLedger,
    today: NaiveDate,
) -> Attendance {
    let subjects = config.subjects();
    let mut attendance = Attendance {
        overall: Tally::default(),
        monthly: Tally::default(),
        subjects: subjects
            .iter()
            .map(|s| SubjectTally {
                subject: s.clone(),
                tally: Tally::default(),
            })
            .collect(),
    };

    if today < config.start_date() {
        return attendance;
    }

    let last = config.end_date().min(today);
    for day in days_inclusive(config.start_date(), last) {
        if !is_working_day(config, ledger.holidays(), day) {
            continue;
        }
        let in_month = same_month(day, today);

        for lecture in scheduled_lectures(config, day) {
            let present = ledger.is_present(day, &lecture);
            attendance.overall.record(present);
            if in_month {
                attendance.monthly.record(present);
            }
            if let Some(bucket) = attendance
                .subjects
                .iter_mut()
                .find(|s| s.subject == lecture.subject)
            {
                bucket.tally.record(present);
            }
        }
    }

    attendance
}
