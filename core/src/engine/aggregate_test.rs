
#[cfg(test)]
mod tests {
    use crate::engine::{aggregate, compute_report, plan_mark_leave, scheduled_lectures};
    use crate::model::lecture::{LectureId, LectureStatus};
    use crate::model::ledger::AttendanceLedger;
    use crate::model::semester::{SemesterConfig, WeekendDays, WeeklySchedule};
    use crate::model::stats::Tally;
    use crate::time::days_inclusive;
    use chrono::{NaiveDate, Weekday};

    const WEEKDAYS: [Weekday; 5] = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn semester(start: &str, end: &str, counts: &[(&str, u32)]) -> SemesterConfig {
        let mut schedule = WeeklySchedule::new();
        for weekday in WEEKDAYS {
            for (subject, count) in counts {
                schedule.set(weekday, *subject, *count);
            }
        }
        SemesterConfig::new(
            date(start),
            date(end),
            counts.iter().map(|(s, _)| s.to_string()).collect(),
            WeekendDays::default(),
            schedule,
        )
        .unwrap()
    }

    fn present(ledger: &mut AttendanceLedger, day: &str, lecture: &str) {
        ledger.set_status(date(day), lecture.parse().unwrap(), LectureStatus::Present);
    }

    #[test]
    fn test_unmarked_past_lectures_are_absent() {
        let config = semester("2025-01-06", "2025-01-10", &[("Math", 1)]);
        let mut ledger = AttendanceLedger::new();
        present(&mut ledger, "2025-01-06", "Math#1");

        let report = compute_report(&config, &ledger, date("2025-01-10"));
        assert_eq!(report.overall, Tally { total: 5, attended: 1, absent: 4 });
        assert_eq!(report.overall.percentage(), Some(20.0));
        assert!(report.started);
    }

    #[test]
    fn test_holiday_excluded_even_with_stray_entry() {
        let config = semester("2025-01-06", "2025-01-10", &[("Math", 1)]);
        let mut ledger = AttendanceLedger::new();
        present(&mut ledger, "2025-01-06", "Math#1");
        present(&mut ledger, "2025-01-08", "Math#1");
        ledger.set_holiday(date("2025-01-08"), true);

        let attendance = aggregate(&config, &ledger, date("2025-01-10"));
        assert_eq!(attendance.overall, Tally { total: 4, attended: 1, absent: 3 });
    }

    #[test]
    fn test_weekend_entries_ignored() {
        let config = semester("2025-01-06", "2025-01-12", &[("Math", 1)]);
        let mut ledger = AttendanceLedger::new();
        present(&mut ledger, "2025-01-11", "Math#1");
        present(&mut ledger, "2025-01-12", "Math#1");

        let attendance = aggregate(&config, &ledger, date("2025-01-12"));
        assert_eq!(attendance.overall, Tally { total: 5, attended: 0, absent: 5 });
    }

    #[test]
    fn test_future_dates_excluded() {
        let config = semester("2025-01-06", "2025-01-10", &[("Math", 1)]);
        let mut ledger = AttendanceLedger::new();
        present(&mut ledger, "2025-01-09", "Math#1");

        let attendance = aggregate(&config, &ledger, date("2025-01-08"));
        assert_eq!(attendance.overall, Tally { total: 3, attended: 0, absent: 3 });
    }

    #[test]
    fn test_subject_without_lectures_is_not_applicable() {
        let config = semester("2025-01-06", "2025-01-10", &[("Math", 1), ("Art", 0)]);
        let report = compute_report(&config, &AttendanceLedger::new(), date("2025-01-10"));

        let art = report.subject("Art").unwrap();
        assert_eq!(art.tally, Tally::default());
        assert_eq!(art.tally.percentage(), None);
        assert_eq!(art.bunks_left, 0);
    }

    #[test]
    fn test_before_semester_start_reports_zero() {
        let config = semester("2025-01-06", "2025-01-10", &[("Math", 1)]);
        let mut ledger = AttendanceLedger::new();
        present(&mut ledger, "2025-01-06", "Math#1");

        let report = compute_report(&config, &ledger, date("2025-01-01"));
        assert!(!report.started);
        assert_eq!(report.overall, Tally::default());
        assert_eq!(report.monthly, Tally::default());
        assert!(report.subjects.iter().all(|s| s.tally == Tally::default()));
    }

    #[test]
    fn test_after_semester_end_stops_at_end_date() {
        let config = semester("2025-01-06", "2025-01-10", &[("Math", 1)]);
        let attendance = aggregate(&config, &AttendanceLedger::new(), date("2025-03-01"));
        assert_eq!(attendance.overall.total, 5);
        assert_eq!(attendance.monthly, Tally::default());
    }

    #[test]
    fn test_monthly_and_bunk_budgets() {
        // Jan 6..31 and Feb 3..28 hold 20 weekdays each.
        let config = semester("2025-01-06", "2025-02-28", &[("Math", 1)]);
        let mut ledger = AttendanceLedger::new();
        for day in days_inclusive(date("2025-01-06"), date("2025-01-31")) {
            ledger.set_status(day, LectureId::new("Math", 1), LectureStatus::Present);
        }

        let report = compute_report(&config, &ledger, date("2025-02-05"));
        assert_eq!(report.overall, Tally { total: 23, attended: 20, absent: 3 });
        assert_eq!(report.monthly, Tally { total: 3, attended: 0, absent: 3 });
        // Semester: 40 lectures, 10 bunkable, 3 used.
        assert_eq!(report.semester_bunks_left, 7);
        // February: 20 lectures, 5 bunkable, 3 used.
        assert_eq!(report.monthly_bunks_left, 2);
        assert_eq!(report.subject("Math").unwrap().bunks_left, 7);
    }

    #[test]
    fn test_subject_budgets_are_independent() {
        let config = semester("2025-01-06", "2025-01-17", &[("Math", 2), ("Physics", 1)]);
        let mut ledger = AttendanceLedger::new();
        for day in days_inclusive(date("2025-01-06"), date("2025-01-17")) {
            for lecture in scheduled_lectures(&config, day) {
                if lecture.subject == "Physics" {
                    ledger.set_status(day, lecture, LectureStatus::Present);
                }
            }
        }

        let report = compute_report(&config, &ledger, date("2025-01-08"));
        let math = report.subject("Math").unwrap();
        let physics = report.subject("Physics").unwrap();
        assert_eq!(math.tally, Tally { total: 6, attended: 0, absent: 6 });
        assert_eq!(physics.tally, Tally { total: 3, attended: 3, absent: 0 });
        // Math: 20 lectures, 5 bunkable, 6 used -> floored.
        assert_eq!(math.bunks_left, 0);
        // Physics: 10 lectures, ceil(7.5) = 8 required, 2 bunkable.
        assert_eq!(physics.bunks_left, 2);
        // Overall: 30 lectures, 7 bunkable, 6 used.
        assert_eq!(report.semester_bunks_left, 1);
    }

    #[test]
    fn test_report_is_idempotent() {
        let config = semester("2025-01-06", "2025-03-28", &[("Math", 2), ("Physics", 1)]);
        let mut ledger = AttendanceLedger::new();
        present(&mut ledger, "2025-01-07", "Math#2");
        ledger.set_holiday(date("2025-02-14"), true);
        let snapshot = ledger.clone();

        let first = compute_report(&config, &ledger, date("2025-02-20"));
        let second = compute_report(&config, &ledger, date("2025-02-20"));
        assert_eq!(first, second);
        assert_eq!(ledger, snapshot);
    }

    #[test]
    fn test_mark_leave_matches_aggregator() {
        let config = semester("2025-01-06", "2025-01-10", &[("Math", 2), ("Physics", 1)]);
        let mut ledger = AttendanceLedger::new();
        present(&mut ledger, "2025-01-06", "Math#1");
        present(&mut ledger, "2025-01-06", "Physics#1");

        let leave = plan_mark_leave(&config, &ledger, date("2025-01-06")).unwrap();
        ledger.apply(&leave);

        let attendance = aggregate(&config, &ledger, date("2025-01-06"));
        assert_eq!(attendance.overall, Tally { total: 3, attended: 0, absent: 3 });
        assert_eq!(ledger.entries(date("2025-01-06")).map(|e| e.len()), Some(3));

        assert_eq!(plan_mark_leave(&config, &ledger, date("2025-01-11")), None);
    }
}
