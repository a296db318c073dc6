//! Date arithmetic for calendar navigation and conversion between the
//! editor's local-time input fields and UTC instants.

use std::fmt::Display;

use chrono::{
    DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
    Utc,
};
use serde::{Deserialize, Serialize};
use shared::DateRange;
use thiserror::Error;

/// Format of `<input type="datetime-local">` values
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Calendar view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Month, ViewMode::Week, ViewMode::Day];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Month => "Month",
            ViewMode::Week => "Week",
            ViewMode::Day => "Day",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeInputError {
    #[error("Invalid date/time: '{0}'")]
    Malformed(String),
    #[error("'{0}' does not exist in the local time zone")]
    Nonexistent(String),
}

/// Midnight UTC at the start of `date`
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Sunday on or before `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First date and day count a view covers
fn visible_days(cursor: NaiveDate, mode: ViewMode) -> (NaiveDate, i64) {
    match mode {
        ViewMode::Month => {
            let first = first_of_month(cursor);
            let next = first
                .checked_add_months(Months::new(1))
                .unwrap_or(first + Duration::days(31));
            (first, (next - first).num_days())
        }
        ViewMode::Week => (start_of_week(cursor), 7),
        ViewMode::Day => (cursor, 1),
    }
}

/// The `[start, end)` window a view shows, in UTC day boundaries
pub fn visible_range(cursor: NaiveDate, mode: ViewMode) -> DateRange {
    visible_range_in(cursor, mode, &Utc)
}

/// The `[start, end)` window a view shows for a viewer in `tz`.
///
/// Month ranges keep UTC day boundaries. Week and day ranges run from
/// local midnight to local midnight, matching the columns of the time grid.
pub fn visible_range_in<Tz: TimeZone>(cursor: NaiveDate, mode: ViewMode, tz: &Tz) -> DateRange {
    let (first, days) = visible_days(cursor, mode);
    let last = first + Duration::days(days);
    match mode {
        ViewMode::Month => DateRange::new(midnight_utc(first), midnight_utc(last)),
        ViewMode::Week | ViewMode::Day => {
            DateRange::new(at_local_minute(first, 0, tz), at_local_minute(last, 0, tz))
        }
    }
}

/// Move the cursor by `delta` months, weeks or days depending on the view
pub fn step(cursor: NaiveDate, mode: ViewMode, delta: i32) -> NaiveDate {
    let magnitude = delta.unsigned_abs();
    match mode {
        ViewMode::Month => {
            let months = Months::new(magnitude);
            let moved = if delta >= 0 {
                cursor.checked_add_months(months)
            } else {
                cursor.checked_sub_months(months)
            };
            moved.unwrap_or(cursor)
        }
        ViewMode::Week => cursor + Duration::weeks(i64::from(delta)),
        ViewMode::Day => cursor + Duration::days(i64::from(delta)),
    }
}

/// Each local calendar date in `range`, from the date of its start up to
/// the date of its end. A range inside a single date yields that date.
pub fn dates_in<Tz: TimeZone>(range: &DateRange, tz: &Tz) -> Vec<NaiveDate> {
    let first = local_date(range.start, tz);
    let count = (local_date(range.end, tz) - first).num_days().max(1);
    (0..count).map(|offset| first + Duration::days(offset)).collect()
}

/// Heading for the navigation bar
pub fn title_for(cursor: NaiveDate, mode: ViewMode) -> String {
    match mode {
        ViewMode::Month => cursor.format("%B %Y").to_string(),
        ViewMode::Week => {
            let first = start_of_week(cursor);
            let last = first + Duration::days(6);
            if first.year() == last.year() {
                format!("{} - {}", first.format("%b %-d"), last.format("%b %-d, %Y"))
            } else {
                format!("{} - {}", first.format("%b %-d, %Y"), last.format("%b %-d, %Y"))
            }
        }
        ViewMode::Day => cursor.format("%A, %B %-d, %Y").to_string(),
    }
}

/// Convert a local `datetime-local` field value to a UTC instant
pub fn parse_local_input<Tz: TimeZone>(value: &str, tz: &Tz) -> Result<DateTime<Utc>, TimeInputError> {
    let value = value.trim();
    let naive = NaiveDateTime::parse_from_str(value, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| TimeInputError::Malformed(value.to_string()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| TimeInputError::Nonexistent(value.to_string()))
}

/// Render a UTC instant as a local `datetime-local` field value
pub fn format_local_input<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format(INPUT_FORMAT).to_string()
}

/// `HH:MM` in local time
pub fn format_time<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format("%H:%M").to_string()
}

pub fn local_date<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Minutes since local midnight
pub fn minute_of_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> u32 {
    let local = instant.with_timezone(tz);
    local.hour() * 60 + local.minute()
}

/// UTC instant for a local date plus minutes after midnight.
/// Falls back to treating the wall time as UTC if it does not exist locally.
pub fn at_local_minute<Tz: TimeZone>(date: NaiveDate, minutes: u32, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(minutes));
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// Drop seconds and sub-second precision
pub fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_month_range_spans_calendar_month() {
        let range = visible_range(date(2024, 2, 14), ViewMode::Month);
        assert_eq!(range.start, utc(2024, 2, 1, 0, 0));
        assert_eq!(range.end, utc(2024, 3, 1, 0, 0));
        assert_eq!(dates_in(&range, &Utc).len(), 29);
    }

    #[test]
    fn test_month_range_december() {
        let range = visible_range(date(2023, 12, 31), ViewMode::Month);
        assert_eq!(range.start, utc(2023, 12, 1, 0, 0));
        assert_eq!(range.end, utc(2024, 1, 1, 0, 0));
    }

    #[test]
    fn test_week_range_starts_sunday() {
        // 2024-01-03 is a Wednesday
        let range = visible_range(date(2024, 1, 3), ViewMode::Week);
        assert_eq!(range.start, utc(2023, 12, 31, 0, 0));
        assert_eq!(range.end, utc(2024, 1, 7, 0, 0));
        assert_eq!(start_of_week(date(2023, 12, 31)), date(2023, 12, 31));
    }

    #[test]
    fn test_day_range() {
        let range = visible_range(date(2024, 1, 2), ViewMode::Day);
        assert_eq!(range, DateRange::new(utc(2024, 1, 2, 0, 0), utc(2024, 1, 3, 0, 0)));
    }

    #[test]
    fn test_week_and_day_ranges_follow_local_midnight() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let day = visible_range_in(date(2024, 1, 2), ViewMode::Day, &tz);
        assert_eq!(day, DateRange::new(utc(2024, 1, 2, 5, 0), utc(2024, 1, 3, 5, 0)));
        assert_eq!(dates_in(&day, &tz), vec![date(2024, 1, 2)]);

        let week = visible_range_in(date(2024, 1, 3), ViewMode::Week, &tz);
        assert_eq!(week.start, utc(2023, 12, 31, 5, 0));
        assert_eq!(week.end, utc(2024, 1, 7, 5, 0));
        assert_eq!(dates_in(&week, &tz).len(), 7);

        // month keeps UTC boundaries
        let month = visible_range_in(date(2024, 1, 3), ViewMode::Month, &tz);
        assert_eq!(month.start, utc(2024, 1, 1, 0, 0));
    }

    #[test]
    fn test_step() {
        assert_eq!(step(date(2024, 1, 31), ViewMode::Month, 1), date(2024, 2, 29));
        assert_eq!(step(date(2024, 1, 15), ViewMode::Month, -1), date(2023, 12, 15));
        assert_eq!(step(date(2024, 1, 3), ViewMode::Week, -1), date(2023, 12, 27));
        assert_eq!(step(date(2024, 1, 3), ViewMode::Day, 2), date(2024, 1, 5));
    }

    #[test]
    fn test_titles() {
        assert_eq!(title_for(date(2024, 1, 3), ViewMode::Month), "January 2024");
        assert_eq!(title_for(date(2024, 1, 3), ViewMode::Week), "Dec 31, 2023 - Jan 6, 2024");
        assert_eq!(title_for(date(2024, 1, 10), ViewMode::Week), "Jan 7 - Jan 13, 2024");
        assert_eq!(title_for(date(2024, 1, 2), ViewMode::Day), "Tuesday, January 2, 2024");
    }

    #[test]
    fn test_local_input_round_trip() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let start = parse_local_input("2024-01-02T11:00", &tz).unwrap();
        let end = parse_local_input("2024-01-02T11:30", &tz).unwrap();
        assert_eq!(start, utc(2024, 1, 2, 9, 0));
        assert_eq!(end, utc(2024, 1, 2, 9, 30));
        assert_eq!(format_local_input(start, &tz), "2024-01-02T11:00");
        assert_eq!(format_local_input(end, &tz), "2024-01-02T11:30");
    }

    #[test]
    fn test_local_input_round_trip_west_of_utc_across_midnight() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let start = parse_local_input("2024-01-01T22:15", &tz).unwrap();
        assert_eq!(start, utc(2024, 1, 2, 3, 15));
        assert_eq!(format_local_input(start, &tz), "2024-01-01T22:15");
        assert_eq!(local_date(start, &tz), date(2024, 1, 1));
        assert_eq!(minute_of_day(start, &tz), 22 * 60 + 15);
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(
            parse_local_input("tomorrow", &Utc),
            Err(TimeInputError::Malformed("tomorrow".to_string()))
        );
        assert!(parse_local_input("2024-01-02T09:00:30", &Utc).is_ok());
    }

    #[test]
    fn test_at_local_minute() {
        let tz = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(at_local_minute(date(2024, 1, 2), 600, &tz), utc(2024, 1, 2, 9, 0));
    }

    #[test]
    fn test_truncate_to_minute() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 9, 41, 27).unwrap();
        assert_eq!(truncate_to_minute(instant), utc(2024, 1, 2, 9, 41));
    }
}
