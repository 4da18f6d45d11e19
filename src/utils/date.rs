use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, Weekday};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// `YYYY-MM` key used to select a month in the store.
pub fn month_key(month: u32, year: i32) -> AppResult<String> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%Y-%m").to_string())
        .ok_or_else(|| AppError::Validation(format!("invalid month {month}/{year}")))
}

pub fn weekday_from_name(s: &str) -> Option<Weekday> {
    s.trim().parse::<Weekday>().ok()
}

pub fn weekday_full_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
