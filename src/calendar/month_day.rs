//! The 366-day reference calendar.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::YearRange;

/// Days in the reference calendar (always leap).
pub const REFERENCE_DAYS: u32 = 366;

const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A (month, day) pair of the reference calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// `None` unless `day` exists in `month` of a leap year.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        let len = *DAYS_IN_MONTH.get(month.checked_sub(1)? as usize)?;
        (1..=len).contains(&day).then_some(Self { month, day })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn day(self) -> u32 {
        self.day
    }

    /// Zero-based position in the reference year (Jan 1 = 0, Feb 29 = 59, Dec 31 = 365).
    pub fn ordinal0(self) -> u32 {
        let before: u32 = DAYS_IN_MONTH[..(self.month - 1) as usize].iter().sum();
        before + self.day - 1
    }

    /// Inverse of [`MonthDay::ordinal0`]; wraps modulo the reference year length.
    pub fn from_ordinal0(ordinal: u32) -> Self {
        let mut rest = ordinal % REFERENCE_DAYS;
        let mut month = 1;
        for len in DAYS_IN_MONTH {
            if rest < len {
                break;
            }
            rest -= len;
            month += 1;
        }
        Self {
            month,
            day: rest + 1,
        }
    }

    /// The real date for this pair in `year`; `None` for Feb 29 of a common year.
    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl std::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Rows of the report for `range`, in display order.
///
/// Runs from the start's (month, day) up to, not including, the end's. When the
/// range crosses a year boundary the walk continues through one more reference
/// year, so display pairs may repeat.
pub fn reference_span(range: &YearRange) -> impl Iterator<Item = MonthDay> {
    let first = MonthDay::of(range.start()).ordinal0();
    let mut last = MonthDay::of(range.end()).ordinal0();
    if range.spans_years() {
        last += REFERENCE_DAYS;
    }
    (first..last).map(MonthDay::from_ordinal0)
}
