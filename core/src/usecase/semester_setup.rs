use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Weekday};

use crate::error::ConfigError;
use crate::input::{expand_key, parse_args, parse_assignments, split_list};
use crate::model::semester::{weekday_from_index, SemesterConfig, WeekendDays, WeeklySchedule, WEEK};
use crate::time::{parse_human_date, parse_weekday_str};

const SETUP_KEYS: [&str; 12] = [
    "start", "end", "subjects", "weekend", "all", "monday", "tuesday", "wednesday", "thursday",
    "friday", "saturday", "sunday",
];

/// A partially specified semester as typed by the user. Whatever is left out is
/// taken from the previous semester when editing, otherwise from the defaults
/// (weekend on Saturday and Sunday, zero lectures).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemesterDraft {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub subjects: Option<Vec<String>>,
    pub weekend_days: Option<WeekendDays>,
    /// Lecture counts applied in order; `None` targets every working weekday.
    pub counts: Vec<(Option<Weekday>, String, i64)>,
}

impl SemesterDraft {
    /// Parses `key:value` arguments such as `start:2025-01-06 subjects:Math,Physics
    /// weekend:sat,sun mon:Math=2,Physics=1 all:Lab=1`. Keys may be abbreviated.
    pub fn from_args(args: &[String], today: NaiveDate) -> Result<Self> {
        let parsed = parse_args(args);
        if let Some(word) = parsed.words.first() {
            return Err(anyhow!("Unexpected argument '{}' (expected key:value)", word));
        }

        let mut draft = SemesterDraft::default();
        for (key, value) in &parsed.pairs {
            let key = expand_key(key, &SETUP_KEYS)?;
            match key.as_str() {
                "start" => draft.start_date = Some(parse_human_date(value, today)?),
                "end" => draft.end_date = Some(parse_human_date(value, today)?),
                "subjects" => draft.subjects = Some(split_list(value)),
                "weekend" => draft.weekend_days = Some(parse_weekend(value)?),
                "all" => {
                    for (subject, count) in parse_assignments(value)? {
                        draft.counts.push((None, subject, count));
                    }
                }
                day => {
                    let weekday = parse_weekday_str(day)?;
                    for (subject, count) in parse_assignments(value)? {
                        draft.counts.push((Some(weekday), subject, count));
                    }
                }
            }
        }
        Ok(draft)
    }

    pub fn build(self, previous: Option<&SemesterConfig>) -> Result<SemesterConfig> {
        let start_date = self
            .start_date
            .or_else(|| previous.map(|p| p.start_date()))
            .ok_or_else(|| anyhow!("A start date is required (start:YYYY-MM-DD)"))?;
        let end_date = self
            .end_date
            .or_else(|| previous.map(|p| p.end_date()))
            .ok_or_else(|| anyhow!("An end date is required (end:YYYY-MM-DD)"))?;
        let subjects = self
            .subjects
            .or_else(|| previous.map(|p| p.subjects().to_vec()))
            .unwrap_or_default();
        let weekend_days = self
            .weekend_days
            .or_else(|| previous.map(|p| p.weekend_days()))
            .unwrap_or_default();

        let mut schedule = WeeklySchedule::new();
        for weekday in WEEK.into_iter().filter(|d| !weekend_days.contains(*d)) {
            for subject in &subjects {
                let count = previous
                    .and_then(|p| p.schedule().count(weekday, subject))
                    .unwrap_or(0);
                schedule.set(weekday, subject.clone(), count);
            }
        }

        let names: Vec<&str> = subjects.iter().map(String::as_str).collect();
        for (target, subject_key, count) in self.counts {
            let subject = expand_key(&subject_key, &names)
                .with_context(|| format!("Subject '{}' is not in the subject list", subject_key))?;
            let weekdays: Vec<Weekday> = match target {
                Some(day) if weekend_days.contains(day) => {
                    return Err(ConfigError::ScheduleOnWeekend(day).into())
                }
                Some(day) => vec![day],
                None => WEEK.into_iter().filter(|d| !weekend_days.contains(*d)).collect(),
            };
            for weekday in weekdays {
                let count = lecture_count(weekday, &subject, count)?;
                schedule.set(weekday, subject.clone(), count);
            }
        }

        Ok(SemesterConfig::new(
            start_date,
            end_date,
            subjects,
            weekend_days,
            schedule,
        )?)
    }
}

fn lecture_count(weekday: Weekday, subject: &str, count: i64) -> Result<u32, ConfigError> {
    if count < 0 {
        return Err(ConfigError::NegativeLectureCount {
            weekday,
            subject: subject.to_string(),
            count,
        });
    }
    u32::try_from(count).map_err(|_| ConfigError::LectureCountOverflow {
        weekday,
        subject: subject.to_string(),
        count,
    })
}

/// Parses a weekend list given as indices (`0,6`), names (`sat,sun`) or `none`.
pub fn parse_weekend(input: &str) -> Result<WeekendDays> {
    if input.trim().eq_ignore_ascii_case("none") {
        return Ok(WeekendDays::empty());
    }
    let days = split_list(input)
        .iter()
        .map(|item| -> Result<Weekday> {
            match item.parse::<i64>() {
                Ok(index) => Ok(weekday_from_index(index)?),
                Err(_) => parse_weekday_str(item),
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(WeekendDays::from_weekdays(days))
}
