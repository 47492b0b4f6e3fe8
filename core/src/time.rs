use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Resolves a human date relative to `today`. Attendance is recorded after the fact,
/// so bare weekday names point backwards: "mon" is the most recent Monday on or
/// before `today`, "2:mon" the one before that.
pub fn parse_human_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yest" => return shift(today, Duration::try_days(-1), input),
        "tomorrow" | "tom" => return shift(today, Duration::try_days(1), input),
        "som" => return Ok(month_bounds(today).0),
        "eom" => return Ok(month_bounds(today).1),
        _ => {}
    }

    // 2. Relative format (+Nd, -Nd, +Nw, -Nw)
    if input.starts_with('+') || input.starts_with('-') {
        let offset = parse_offset(input)?;
        return shift(today, Some(offset), input);
    }

    // 3. Standard format
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(d);
    }

    // 4. Weekday format (mon, 2:mon)
    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Ok(target) = parse_weekday_str(day_str) {
            if count < 1 {
                return Err(anyhow!("Weekday count must be at least 1: {}", input));
            }
            let days_back = (today.weekday().num_days_from_sunday() as i64
                - target.num_days_from_sunday() as i64)
                .rem_euclid(7);
            let back = (count - 1)
                .checked_mul(7)
                .and_then(|weeks| weeks.checked_add(days_back))
                .and_then(|days| days.checked_neg())
                .and_then(Duration::try_days);
            return shift(today, back, input);
        }
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn parse_offset(input: &str) -> Result<Duration> {
    let (sign, rest) = input.split_at(1);
    if rest.len() < 2 {
        return Err(anyhow!("Invalid relative format: {}", input));
    }
    let (unit_at, _) = rest
        .char_indices()
        .last()
        .ok_or_else(|| anyhow!("Invalid relative format: {}", input))?;
    let (num_str, unit) = rest.split_at(unit_at);
    let mut count: i64 = num_str
        .parse()
        .map_err(|_| anyhow!("Invalid relative format: {}", input))?;
    if sign == "-" {
        count = count
            .checked_neg()
            .ok_or_else(|| anyhow!("Relative date out of range: {}", input))?;
    }

    let offset = match unit.to_lowercase().as_str() {
        "d" => Duration::try_days(count),
        "w" => Duration::try_weeks(count),
        _ => return Err(anyhow!("Unknown unit in relative date: {}", unit)),
    };
    offset.ok_or_else(|| anyhow!("Relative date out of range: {}", input))
}

fn shift(today: NaiveDate, offset: Option<Duration>, input: &str) -> Result<NaiveDate> {
    offset
        .and_then(|offset| today.checked_add_signed(offset))
        .ok_or_else(|| anyhow!("Date out of range: {}", input))
}

fn parse_weekday_token(input: &str) -> Option<(i64, &str)> {
    if input.contains(':') {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() == 2 {
            if let Ok(count) = parts[0].parse::<i64>() {
                return Some((count, parts[1]));
            }
        }
    } else {
        // Just "fri" means 1:fri
        return Some((1, input));
    }
    None
}

pub fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.trim().to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday: {}", s)),
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// First and last day of the calendar month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let next_month = first
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    let last = next_month.pred_opt().unwrap_or(next_month);
    (first, last)
}

/// Every date in `[from, to]`, empty when `from > to`.
pub fn days_inclusive(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    from.iter_days().take_while(move |d| *d <= to)
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_weekday_token() {
        assert_eq!(parse_weekday_token("fri"), Some((1, "fri")));
        assert_eq!(parse_weekday_token("2:fri"), Some((2, "fri")));
        assert_eq!(parse_weekday_token("x:fri"), None);
    }

    #[test]
    fn test_parse_keywords_and_offsets() {
        // 2025-01-15 is a Wednesday
        let today = date("2025-01-15");
        assert_eq!(parse_human_date("today", today).unwrap(), today);
        assert_eq!(parse_human_date("yest", today).unwrap(), date("2025-01-14"));
        assert_eq!(parse_human_date("-3d", today).unwrap(), date("2025-01-12"));
        assert_eq!(parse_human_date("+1w", today).unwrap(), date("2025-01-22"));
        assert_eq!(parse_human_date("som", today).unwrap(), date("2025-01-01"));
        assert_eq!(parse_human_date("eom", today).unwrap(), date("2025-01-31"));
        assert_eq!(parse_human_date("2025-03-01", today).unwrap(), date("2025-03-01"));
        assert!(parse_human_date("-3y", today).is_err());
        assert!(parse_human_date("someday", today).is_err());
    }

    #[test]
    fn test_parse_weekday_points_backwards() {
        let today = date("2025-01-15"); // Wednesday
        assert_eq!(parse_human_date("wed", today).unwrap(), today);
        assert_eq!(parse_human_date("mon", today).unwrap(), date("2025-01-13"));
        assert_eq!(parse_human_date("thu", today).unwrap(), date("2025-01-09"));
        assert_eq!(parse_human_date("2:mon", today).unwrap(), date("2025-01-06"));
    }

    #[test]
    fn test_parse_rejects_non_ascii_unit() {
        let today = date("2025-01-15");
        assert!(parse_human_date("+1é", today).is_err());
        assert!(parse_human_date("-é", today).is_err());
        assert!(parse_human_date("+3日", today).is_err());
    }

    #[test]
    fn test_parse_out_of_range_offsets_are_errors() {
        let today = date("2025-01-15");
        assert!(parse_human_date("+99999999999d", today).is_err());
        assert!(parse_human_date("-9223372036854775807w", today).is_err());
        assert!(parse_human_date("--9223372036854775808d", today).is_err());
        assert!(parse_human_date("9223372036854775807:mon", today).is_err());
        assert!(parse_human_date("yest", NaiveDate::MIN).is_err());
        assert!(parse_human_date("tom", NaiveDate::MAX).is_err());
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(date("2024-02-10")),
            (date("2024-02-01"), date("2024-02-29"))
        );
        assert_eq!(
            month_bounds(date("2025-12-31")),
            (date("2025-12-01"), date("2025-12-31"))
        );
    }

    #[test]
    fn test_days_inclusive() {
        let days: Vec<_> = days_inclusive(date("2025-01-30"), date("2025-02-02")).collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days_inclusive(date("2025-02-02"), date("2025-01-30")).count(), 0);
    }
}
