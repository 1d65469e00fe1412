//! Calendar helpers - date keys, ISO week and weekday names

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

/// Canonical `YYYY-MM-DD` local date string
pub type DateKey = String;

/// Display order of the weekly schedule (ISO week, Monday first)
pub const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Current local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn date_key(date: NaiveDate) -> DateKey {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Monday of the ISO week containing `date`
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Weekday identifier used as the schedule key
pub fn day_id(day: Weekday) -> &'static str {
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

/// Inverse of [`day_id`], also accepts three-letter abbreviations
pub fn parse_day_id(name: &str) -> Option<Weekday> {
    let name = name.trim().to_lowercase();
    WEEK_DAYS.iter().copied().find(|day| {
        let id = day_id(*day).to_lowercase();
        id == name || id[..3] == name
    })
}

/// `"9 Feb"` style label
pub fn short_label(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTHS[date.month0() as usize])
}

/// Date labels for every day of the current ISO week, Monday first
pub fn week_date_labels(today: NaiveDate) -> Vec<(Weekday, String)> {
    let monday = week_monday(today);
    WEEK_DAYS
        .iter()
        .enumerate()
        .map(|(offset, day)| (*day, short_label(monday + Duration::days(offset as i64))))
        .collect()
}
