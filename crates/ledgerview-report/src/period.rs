//! Date-parameter validation and calendar-range math.
//!
//! Report routes carry year/month path parameters as strings. They must form
//! a valid calendar date (`year-month-01`) or the request fails fast with
//! [`InvalidDate`], which the handlers turn into the error view.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// A year/month/day combination that is not a calendar date.
#[derive(Debug, Error)]
pub enum InvalidDate {
    /// A parameter was not a number at all.
    #[error("not a number: {0:?}")]
    NotANumber(String),
    /// The numbers do not form a calendar date.
    #[error("no such date: {year}-{month}-01")]
    OutOfRange {
        /// Parsed year.
        year: i32,
        /// Parsed month.
        month: u32,
    },
}

/// Parse `(year, month)` route parameters into the first day of that month.
pub fn parse_month(year: &str, month: &str) -> Result<NaiveDate, InvalidDate> {
    let y: i32 = year
        .parse()
        .map_err(|_| InvalidDate::NotANumber(year.to_string()))?;
    let m: u32 = month
        .parse()
        .map_err(|_| InvalidDate::NotANumber(month.to_string()))?;
    NaiveDate::from_ymd_opt(y, m, 1).ok_or(InvalidDate::OutOfRange { year: y, month: m })
}

/// Parse a `year` route parameter into January 1st of that year.
pub fn parse_year(year: &str) -> Result<NaiveDate, InvalidDate> {
    parse_month(year, "1")
}

/// First day of the month containing `date`.
#[must_use]
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
#[must_use]
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // First of the next month always exists; walk back one day.
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

/// Calendar month bounds `[first day, last day]` for the month of `date`.
#[must_use]
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    (start_of_month(date), end_of_month(date))
}

/// Calendar year bounds `[Jan 1, Dec 31]` for the year of `date`.
#[must_use]
pub fn year_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
    let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
    (start, end)
}

/// First days of every month from `since` through `until`, ascending.
#[must_use]
pub fn months_between(since: NaiveDate, until: NaiveDate) -> Vec<NaiveDate> {
    let mut months = Vec::new();
    let mut cursor = start_of_month(since);
    let last = start_of_month(until);
    while cursor <= last {
        months.push(cursor);
        cursor = match end_of_month(cursor).succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    months
}
