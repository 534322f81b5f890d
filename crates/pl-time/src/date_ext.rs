//! Month arithmetic helpers on top of `chrono::NaiveDate`.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Whether `year` is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given month (1–12).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// The first day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// The last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let last = days_in_month(date.year(), date.month());
    date.with_day(last).unwrap_or(date)
}

/// `day` of the given month, clamped to the month length.
pub fn clamped_day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.clamp(1, days_in_month(year, month).max(1));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The `n`-th `weekday` of a month; `n` of 5 or more selects the last one.
pub fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }
    if n <= 4 {
        // the fourth occurrence always exists
        return NaiveDate::from_weekday_of_month_opt(year, month, weekday, n as u8);
    }
    let last = clamped_day(year, month, 31)?;
    let back = (7 + last.weekday().num_days_from_sunday() - weekday.num_days_from_sunday()) % 7;
    last.checked_sub_days(Days::new(u64::from(back)))
}

/// Add `n` months to `date` (clamping the day like `chrono` does).
pub fn add_months(date: NaiveDate, n: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(n))
}

/// Midnight at the start of `date`.
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
