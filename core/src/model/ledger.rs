use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::lecture::{LectureId, LectureStatus};

/// A write set against the ledger. The accounting engine plans these; a repository
/// applies one as a single update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerMutation {
    SetLectureStatus {
        date: NaiveDate,
        lecture: LectureId,
        status: LectureStatus,
    },
    SetHoliday {
        date: NaiveDate,
        holiday: bool,
    },
    MarkDayAbsent {
        date: NaiveDate,
        lectures: Vec<LectureId>,
    },
}

impl LedgerMutation {
    pub fn date(&self) -> NaiveDate {
        match self {
            LedgerMutation::SetLectureStatus { date, .. }
            | LedgerMutation::SetHoliday { date, .. }
            | LedgerMutation::MarkDayAbsent { date, .. } => *date,
        }
    }
}

/// Sparse attendance record. A missing entry is not neutral: the accounting
/// engine reads it as absent for any accountable date.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceLedger {
    #[serde(default)]
    holidays: BTreeSet<NaiveDate>,
    #[serde(default)]
    days: BTreeMap<NaiveDate, BTreeMap<LectureId, LectureStatus>>,
}

impl AttendanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn holidays(&self) -> &BTreeSet<NaiveDate> {
        &self.holidays
    }

    pub fn status(&self, date: NaiveDate, lecture: &LectureId) -> Option<LectureStatus> {
        self.days.get(&date).and_then(|day| day.get(lecture)).copied()
    }

    pub fn is_present(&self, date: NaiveDate, lecture: &LectureId) -> bool {
        self.status(date, lecture) == Some(LectureStatus::Present)
    }

    pub fn entries(&self, date: NaiveDate) -> Option<&BTreeMap<LectureId, LectureStatus>> {
        self.days.get(&date)
    }

    pub fn set_status(&mut self, date: NaiveDate, lecture: LectureId, status: LectureStatus) {
        self.days.entry(date).or_default().insert(lecture, status);
    }

    pub fn set_holiday(&mut self, date: NaiveDate, holiday: bool) {
        if holiday {
            self.holidays.insert(date);
        } else {
            self.holidays.remove(&date);
        }
    }

    pub fn apply(&mut self, mutation: &LedgerMutation) {
        match mutation {
            LedgerMutation::SetLectureStatus {
                date,
                lecture,
                status,
            } => self.set_status(*date, lecture.clone(), *status),
            LedgerMutation::SetHoliday { date, holiday } => self.set_holiday(*date, *holiday),
            LedgerMutation::MarkDayAbsent { date, lectures } => {
                let day = self.days.entry(*date).or_default();
                for lecture in lectures {
                    day.insert(lecture.clone(), LectureStatus::Absent);
                }
            }
        }
    }
}
