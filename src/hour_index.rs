use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::angles::{days_in_year, leap_year};
use crate::error::{Error, Result};

pub const HOURS_PER_DAY: usize = 24;
pub const HOURS_NON_LEAP: usize = 8760;
pub const HOURS_LEAP: usize = 8784;

// Zero-based ordinal of Feb 29.
const LEAP_DAY_INDEX: usize = 59;

const TIMESTAMP_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%y %H:%M",
];

pub fn hours_in_year(year: i32) -> usize {
    days_in_year(year) as usize * HOURS_PER_DAY
}

pub fn index_of(instant: &NaiveDateTime) -> usize {
    instant.ordinal0() as usize * HOURS_PER_DAY + instant.hour() as usize
}

pub fn index_of_str(s: &str) -> Result<usize> {
    parse_timestamp(s).map(|t| index_of(&t))
}

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| Error::InvalidInstant(s.to_string()))
}

pub fn day_index(instant: &NaiveDateTime) -> usize {
    index_of(instant) / HOURS_PER_DAY
}

/// Day index on a 365-day calendar: Feb 29 folds onto Feb 28 and every
/// later day in a leap year moves back by one.
pub fn non_leap_day_index(instant: &NaiveDateTime) -> usize {
    let day = day_index(instant);
    if leap_year(instant.year()) && day >= LEAP_DAY_INDEX {
        (day - 1).max(LEAP_DAY_INDEX - 1)
    } else {
        day
    }
}

pub fn non_leap_index_of(instant: &NaiveDateTime) -> usize {
    non_leap_day_index(instant) * HOURS_PER_DAY + instant.hour() as usize
}

pub fn truncate_to_hour(instant: &NaiveDateTime) -> NaiveDateTime {
    instant
        .date()
        .and_hms_opt(instant.hour(), 0, 0)
        .unwrap_or(*instant)
}

pub fn start_of_year(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)
}

pub fn hour_at(year: i32, index: usize) -> Option<NaiveDateTime> {
    if index >= hours_in_year(year) {
        return None;
    }
    Some(start_of_year(year)? + Duration::hours(index as i64))
}
