use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::counter::scheduled_lectures;
use crate::model::lecture::{LectureId, LectureStatus};
use crate::model::ledger::AttendanceLedger;
use crate::model::semester::SemesterConfig;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    OutsideSemester,
    Weekend,
    Holiday,
    Instructional,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureView {
    pub id: LectureId,
    /// `Present` only when the ledger says so; unmarked lectures read as absent.
    pub status: LectureStatus,
    pub marked: bool,
}

/// Everything a shell needs to render one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub date: NaiveDate,
    pub kind: DayKind,
    pub future: bool,
    pub lectures: Vec<LectureView>,
}

impl DayView {
    pub fn is_instructional(&self) -> bool {
        self.kind == DayKind::Instructional
    }

    /// Whether "mark as leave" would write anything for this day.
    pub fn can_mark_leave(&self) -> bool {
        self.is_instructional() && !self.future && !self.lectures.is_empty()
    }
}

pub fn day_view(
    config: &SemesterConfig,
    ledger: &AttendanceLedger,
    date: NaiveDate,
    today: NaiveDate,
) -> DayView {
    let kind = if !config.contains(date) {
        DayKind::OutsideSemester
    } else if config.is_weekend(date) {
        DayKind::Weekend
    } else if ledger.is_holiday(date) {
        DayKind::Holiday
    } else {
        DayKind::Instructional
    };

    let lectures = if kind == DayKind::Instructional {
        scheduled_lectures(config, date)
            .map(|id| {
                let marked = ledger.status(date, &id);
                LectureView {
                    status: marked.unwrap_or(LectureStatus::Absent),
                    marked: marked.is_some(),
                    id,
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    DayView {
        date,
        kind,
        future: date > today,
        lectures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::semester::{WeekendDays, WeeklySchedule};
    use chrono::Weekday;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn config() -> SemesterConfig {
        let schedule = WeeklySchedule::new()
            .with(Weekday::Mon, "Math", 2)
            .with(Weekday::Tue, "Math", 0)
            .with(Weekday::Wed, "Math", 1)
            .with(Weekday::Thu, "Math", 1)
            .with(Weekday::Fri, "Math", 1);
        SemesterConfig::new(
            date("2025-01-06"),
            date("2025-01-31"),
            vec!["Math".to_string()],
            WeekendDays::default(),
            schedule,
        )
        .unwrap()
    }

    #[test]
    fn test_instructional_day_lists_lectures() {
        let config = config();
        let mut ledger = AttendanceLedger::new();
        ledger.set_status(date("2025-01-06"), LectureId::new("Math", 2), LectureStatus::Present);

        let view = day_view(&config, &ledger, date("2025-01-06"), date("2025-01-10"));
        assert_eq!(view.kind, DayKind::Instructional);
        assert!(!view.future);
        assert_eq!(view.lectures.len(), 2);
        assert_eq!(view.lectures[0].status, LectureStatus::Absent);
        assert!(!view.lectures[0].marked);
        assert_eq!(view.lectures[1].status, LectureStatus::Present);
        assert!(view.can_mark_leave());
    }

    #[test]
    fn test_day_kinds() {
        let config = config();
        let mut ledger = AttendanceLedger::new();
        ledger.set_holiday(date("2025-01-08"), true);
        let today = date("2025-01-20");

        assert_eq!(day_view(&config, &ledger, date("2025-01-08"), today).kind, DayKind::Holiday);
        assert_eq!(day_view(&config, &ledger, date("2025-01-11"), today).kind, DayKind::Weekend);
        assert_eq!(
            day_view(&config, &ledger, date("2025-02-03"), today).kind,
            DayKind::OutsideSemester
        );

        let empty = day_view(&config, &ledger, date("2025-01-07"), today);
        assert_eq!(empty.kind, DayKind::Instructional);
        assert!(!empty.can_mark_leave());

        let future = day_view(&config, &ledger, date("2025-01-27"), today);
        assert!(future.future);
        assert!(!future.can_mark_leave());
    }
}
