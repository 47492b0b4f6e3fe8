use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::ConfigError;
use crate::time::{parse_weekday_str, weekday_name};

/// Weekdays in Sunday-first order, the order used for weekday indices (0=Sunday..6=Saturday).
pub const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub fn weekday_from_index(index: i64) -> Result<Weekday, ConfigError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| WEEK.get(i).copied())
        .ok_or(ConfigError::InvalidWeekday(index))
}

/// Upper bound on the lectures one weekday may carry across all subjects.
pub const MAX_LECTURES_PER_DAY: u32 = 24;

/// Set of non-instructional weekdays, one bit per weekday index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekendDays(u8);

impl WeekendDays {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn from_weekdays(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut mask = Self::empty();
        for day in days {
            mask.insert(day);
        }
        mask
    }

    pub fn from_indices(indices: &[i64]) -> Result<Self, ConfigError> {
        let days = indices
            .iter()
            .map(|&i| weekday_from_index(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_weekdays(days))
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_sunday();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        (self.0 >> day.num_days_from_sunday()) & 1 != 0
    }

    pub fn indices(&self) -> Vec<u8> {
        WEEK.iter()
            .filter(|d| self.contains(**d))
            .map(|d| d.num_days_from_sunday() as u8)
            .collect()
    }

    pub fn is_full_week(&self) -> bool {
        self.0 & 0b111_1111 == 0b111_1111
    }
}

impl Default for WeekendDays {
    fn default() -> Self {
        Self::from_weekdays([Weekday::Sun, Weekday::Sat])
    }
}

/// Lecture counts per weekday and subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [BTreeMap<String, u32>; 7],
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, weekday: Weekday, subject: impl Into<String>, count: u32) {
        self.days[weekday.num_days_from_sunday() as usize].insert(subject.into(), count);
    }

    pub fn with(mut self, weekday: Weekday, subject: impl Into<String>, count: u32) -> Self {
        self.set(weekday, subject, count);
        self
    }

    pub fn count(&self, weekday: Weekday, subject: &str) -> Option<u32> {
        self.day(weekday).get(subject).copied()
    }

    pub fn day(&self, weekday: Weekday) -> &BTreeMap<String, u32> {
        &self.days[weekday.num_days_from_sunday() as usize]
    }
}

/// A validated semester. Fields are only reachable through accessors so every
/// instance has passed [`SemesterConfig::new`]; edits replace the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SemesterDocument", into = "SemesterDocument")]
pub struct SemesterConfig {
    start_date: NaiveDate,
    end_date: NaiveDate,
    subjects: Vec<String>,
    weekend_days: WeekendDays,
    schedule: WeeklySchedule,
}

impl SemesterConfig {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        subjects: Vec<String>,
        weekend_days: WeekendDays,
        schedule: WeeklySchedule,
    ) -> Result<Self, ConfigError> {
        if start_date > end_date {
            return Err(ConfigError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        if subjects.is_empty() {
            return Err(ConfigError::NoSubjects);
        }
        let mut seen = HashSet::new();
        for subject in &subjects {
            if subject.trim().is_empty() {
                return Err(ConfigError::BlankSubject);
            }
            if subject.trim() != subject {
                return Err(ConfigError::UntrimmedSubject(subject.clone()));
            }
            if !seen.insert(subject.as_str()) {
                return Err(ConfigError::DuplicateSubject(subject.clone()));
            }
        }
        if weekend_days.is_full_week() {
            return Err(ConfigError::AllDaysWeekend);
        }

        for weekday in WEEK {
            let day = schedule.day(weekday);
            if weekend_days.contains(weekday) {
                if !day.is_empty() {
                    return Err(ConfigError::ScheduleOnWeekend(weekday));
                }
                continue;
            }
            if let Some(unknown) = day.keys().find(|s| !seen.contains(s.as_str())) {
                return Err(ConfigError::UnknownSubject {
                    weekday,
                    subject: unknown.clone(),
                });
            }
            if let Some(missing) = subjects.iter().find(|s| !day.contains_key(*s)) {
                return Err(ConfigError::MissingScheduleEntry {
                    weekday,
                    subject: missing.clone(),
                });
            }
            let count: u64 = day.values().map(|&c| u64::from(c)).sum();
            if count > u64::from(MAX_LECTURES_PER_DAY) {
                return Err(ConfigError::TooManyLectures {
                    weekday,
                    count,
                    max: MAX_LECTURES_PER_DAY,
                });
            }
        }

        Ok(Self {
            start_date,
            end_date,
            subjects,
            weekend_days,
            schedule,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn weekend_days(&self) -> WeekendDays {
        self.weekend_days
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    /// Human label such as "Jan 2025 - May 2025".
    pub fn name(&self) -> String {
        format!(
            "{} - {}",
            self.start_date.format("%b %Y"),
            self.end_date.format("%b %Y")
        )
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend_days.contains(date.weekday())
    }

    /// Scheduled lectures of `subject` on `weekday`, zero on weekends.
    pub fn lectures_per_weekday(&self, weekday: Weekday, subject: &str) -> u32 {
        if self.weekend_days.contains(weekday) {
            return 0;
        }
        self.schedule.count(weekday, subject).unwrap_or(0)
    }

    pub fn working_weekdays(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.into_iter().filter(|d| !self.weekend_days.contains(*d))
    }
}

/// Persisted shape of a semester, keyed by weekday names like the original documents.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SemesterDocument {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub subjects: Vec<String>,
    #[serde(default = "default_weekend_indices")]
    pub weekend_days: Vec<i64>,
    #[serde(default)]
    pub schedule: BTreeMap<String, BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn default_weekend_indices() -> Vec<i64> {
    WeekendDays::default()
        .indices()
        .into_iter()
        .map(i64::from)
        .collect()
}

impl TryFrom<SemesterDocument> for SemesterConfig {
    type Error = ConfigError;

    fn try_from(doc: SemesterDocument) -> Result<Self, Self::Error> {
        let weekend_days = WeekendDays::from_indices(&doc.weekend_days)?;

        let mut schedule = WeeklySchedule::new();
        for (day_name, counts) in doc.schedule {
            let weekday = parse_weekday_str(&day_name)
                .map_err(|_| ConfigError::UnknownWeekdayName(day_name.clone()))?;
            for (subject, count) in counts {
                if count < 0 {
                    return Err(ConfigError::NegativeLectureCount {
                        weekday,
                        subject,
                        count,
                    });
                }
                let count = u32::try_from(count).map_err(|_| ConfigError::LectureCountOverflow {
                    weekday,
                    subject: subject.clone(),
                    count,
                })?;
                schedule.set(weekday, subject, count);
            }
        }

        SemesterConfig::new(
            doc.start_date,
            doc.end_date,
            doc.subjects,
            weekend_days,
            schedule,
        )
    }
}

impl From<SemesterConfig> for SemesterDocument {
    fn from(config: SemesterConfig) -> Self {
        let name = Some(config.name());
        let schedule = config
            .working_weekdays()
            .map(|weekday| {
                let counts = config
                    .schedule
                    .day(weekday)
                    .iter()
                    .map(|(s, c)| (s.clone(), i64::from(*c)))
                    .collect();
                (weekday_name(weekday).to_string(), counts)
            })
            .collect();

        SemesterDocument {
            start_date: config.start_date,
            end_date: config.end_date,
            weekend_days: config.weekend_days.indices().into_iter().map(i64::from).collect(),
            subjects: config.subjects,
            schedule,
            name,
        }
    }
}
