use chrono::{NaiveDate, Weekday};
use thiserror::Error;

use crate::model::lecture::LectureId;

/// Rejections raised while building or loading a semester configuration.
/// Nothing is computed from a configuration that fails any of these checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("at least one subject is required")]
    NoSubjects,

    #[error("subject names must not be blank")]
    BlankSubject,

    #[error("subject '{0}' is listed more than once")]
    DuplicateSubject(String),

    #[error("weekday index {0} is out of range (expected 0=Sunday..6=Saturday)")]
    InvalidWeekday(i64),

    #[error("unknown weekday name '{0}'")]
    UnknownWeekdayName(String),

    #[error("every weekday is marked as weekend")]
    AllDaysWeekend,

    #[error("no lecture count for '{subject}' on {weekday}")]
    MissingScheduleEntry { weekday: Weekday, subject: String },

    #[error("lecture count for '{subject}' on {weekday} is negative ({count})")]
    NegativeLectureCount {
        weekday: Weekday,
        subject: String,
        count: i64,
    },

    #[error("lecture count for '{subject}' on {weekday} is too large ({count})")]
    LectureCountOverflow {
        weekday: Weekday,
        subject: String,
        count: i64,
    },

    #[error("{weekday} has {count} lectures, more than the {max} a day can hold")]
    TooManyLectures { weekday: Weekday, count: u64, max: u32 },
    #[error("subject '{0}' has leading or trailing whitespace")]
    UntrimmedSubject(String),
    #[error("schedule for {weekday} mentions unknown subject '{subject}'")]
    UnknownSubject { weekday: Weekday, subject: String },

    #[error("{0} is a weekend day and cannot carry a schedule")]
    ScheduleOnWeekend(Weekday),
}

/// Rejections for ledger writes that the accounting rules would never read back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("{date} is after today ({today})")]
    FutureDate { date: NaiveDate, today: NaiveDate },

    #[error("{date} is outside the semester ({start} to {end})")]
    OutsideSemester {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("{0} is a weekend or holiday")]
    NonInstructionalDay(NaiveDate),

    #[error("lecture {lecture} is not scheduled on {date}")]
    UnknownLecture { date: NaiveDate, lecture: LectureId },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid lecture identifier '{0}' (expected <subject>#<n>)")]
pub struct LectureIdError(pub String);
