use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

use crate::model::lecture::LectureId;
use crate::model::semester::SemesterConfig;
use crate::time::days_inclusive;

/// A date is a working day when its weekday is not a weekend day and it is not
/// flagged as a holiday. Semester bounds are checked separately.
pub fn is_working_day(
    config: &SemesterConfig,
    holidays: &BTreeSet<NaiveDate>,
    date: NaiveDate,
) -> bool {
    !config.is_weekend(date) && !holidays.contains(&date)
}

/// Lecture slots the weekly schedule puts on `date`, in subject order, ignoring
/// holidays. Both the aggregator and the leave planner derive identifiers here.
pub fn scheduled_lectures<'a>(
    config: &'a SemesterConfig,
    date: NaiveDate,
) -> impl Iterator<Item = LectureId> + 'a {
    let weekday = date.weekday();
    config.subjects().iter().flat_map(move |subject| {
        let count = config.lectures_per_weekday(weekday, subject);
        (1..=count).map(move |ordinal| LectureId::new(subject.clone(), ordinal))
    })
}

/// Number of lectures scheduled in `[from, to]`, clamped independently to the
/// semester bounds. `subject` restricts the count to one subject.
pub fn count_lectures(
    config: &SemesterConfig,
    holidays: &BTreeSet<NaiveDate>,
    from: NaiveDate,
    to: NaiveDate,
    subject: Option<&str>,
) -> u32 {
    let from = from.max(config.start_date());
    let to = to.min(config.end_date());

    let total: u64 = days_inclusive(from, to)
        .filter(|d| is_working_day(config, holidays, *d))
        .map(|d| {
            let weekday = d.weekday();
            match subject {
                Some(s) => u64::from(config.lectures_per_weekday(weekday, s)),
                None => config
                    .subjects()
                    .iter()
                    .map(|s| u64::from(config.lectures_per_weekday(weekday, s)))
                    .sum(),
            }
        })
        .sum();
    u32::try_from(total).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::semester::{WeekendDays, WeeklySchedule, MAX_LECTURES_PER_DAY};
    use chrono::Weekday;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    // Mon..Fri: Math 2, Physics 1 (none on Wednesday)
    fn config(start: &str, end: &str) -> SemesterConfig {
        let mut schedule = WeeklySchedule::new();
        for weekday in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
            schedule.set(weekday, "Math", 2);
            schedule.set(weekday, "Physics", if weekday == Weekday::Wed { 0 } else { 1 });
        }
        SemesterConfig::new(
            date(start),
            date(end),
            vec!["Math".to_string(), "Physics".to_string()],
            WeekendDays::default(),
            schedule,
        )
        .unwrap()
    }

    #[test]
    fn test_count_full_week() {
        let config = config("2025-01-06", "2025-01-12");
        let holidays = BTreeSet::new();
        let from = date("2025-01-06");
        let to = date("2025-01-12");

        assert_eq!(count_lectures(&config, &holidays, from, to, None), 14);
        assert_eq!(count_lectures(&config, &holidays, from, to, Some("Math")), 10);
        assert_eq!(count_lectures(&config, &holidays, from, to, Some("Physics")), 4);
        assert_eq!(count_lectures(&config, &holidays, from, to, Some("Chemistry")), 0);
    }

    #[test]
    fn test_count_skips_holidays() {
        let config = config("2025-01-06", "2025-01-12");
        let holidays = BTreeSet::from([date("2025-01-07")]);
        assert_eq!(
            count_lectures(&config, &holidays, date("2025-01-06"), date("2025-01-12"), None),
            11
        );
    }

    #[test]
    fn test_count_clamps_to_semester() {
        // Semester is Tue..Thu only, the interval covers the whole month.
        let config = config("2025-01-07", "2025-01-09");
        let holidays = BTreeSet::new();
        assert_eq!(
            count_lectures(&config, &holidays, date("2025-01-01"), date("2025-01-31"), None),
            3 + 2 + 3
        );
        // Disjoint interval contributes nothing.
        assert_eq!(
            count_lectures(&config, &holidays, date("2025-02-01"), date("2025-02-28"), None),
            0
        );
    }

    #[test]
    fn test_count_full_days() {
        let mut schedule = WeeklySchedule::new();
        for weekday in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
            schedule.set(weekday, "Math", MAX_LECTURES_PER_DAY);
        }
        let config = SemesterConfig::new(
            date("2025-01-06"),
            date("2025-12-31"),
            vec!["Math".to_string()],
            WeekendDays::default(),
            schedule,
        )
        .unwrap();
        let holidays = BTreeSet::new();
        assert_eq!(
            count_lectures(&config, &holidays, date("2025-01-06"), date("2025-01-12"), None),
            5 * MAX_LECTURES_PER_DAY
        );
    }

    #[test]
    fn test_count_is_repeatable() {
        let config = config("2025-01-06", "2025-03-31");
        let holidays = BTreeSet::from([date("2025-02-14")]);
        let a = count_lectures(&config, &holidays, date("2025-01-01"), date("2025-12-31"), None);
        let b = count_lectures(&config, &holidays, date("2025-01-01"), date("2025-12-31"), None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scheduled_lectures() {
        let config = config("2025-01-06", "2025-01-12");
        let monday: Vec<String> = scheduled_lectures(&config, date("2025-01-06"))
            .map(|id| id.to_string())
            .collect();
        assert_eq!(monday, vec!["Math#1", "Math#2", "Physics#1"]);

        let wednesday: Vec<String> = scheduled_lectures(&config, date("2025-01-08"))
            .map(|id| id.to_string())
            .collect();
        assert_eq!(wednesday, vec!["Math#1", "Math#2"]);

        assert_eq!(scheduled_lectures(&config, date("2025-01-11")).count(), 0);
    }
}
