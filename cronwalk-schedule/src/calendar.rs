//! Gregorian calendar arithmetic used by the trigger search.

use chrono::{Datelike, NaiveDate};

pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// `(month, year)` one month later.
pub(crate) fn following_month(month: u32, year: i32) -> (u32, i32) {
    if month >= 12 { (1, year + 1) } else { (month + 1, year) }
}

/// `(month, year)` one month earlier.
pub(crate) fn preceding_month(month: u32, year: i32) -> (u32, i32) {
    if month <= 1 { (12, year - 1) } else { (month - 1, year) }
}

/// Day-of-week index with Sunday = 0.
pub(crate) fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}
