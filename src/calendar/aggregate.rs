//! Build the year-over-year calendar table.

use serde::Serialize;

use crate::calendar::month_day::{MonthDay, reference_span};
use crate::domain::{DailyUsage, YearRange};

/// Day count used for the full-year projection, leap or not.
pub const PROJECTION_DAYS: f64 = 366.0;

/// One display row: a (month, day) and one cell per covered year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarRow {
    pub month_day: MonthDay,
    /// `None` is "no data"; same order as [`CalendarTable::years`].
    pub cells: Vec<Option<f64>>,
}

/// Statistics over the valid days of one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageSummary {
    pub total: f64,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub projection: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearStats {
    pub year: i32,
    /// `None` when the year has no valid day at all.
    pub summary: Option<UsageSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarTable {
    pub years: Vec<i32>,
    pub rows: Vec<CalendarRow>,
    pub stats: Vec<YearStats>,
}

impl CalendarTable {
    pub fn stats_for(&self, year: i32) -> Option<&YearStats> {
        self.stats.iter().find(|s| s.year == year)
    }
}

#[derive(Debug, Clone, Copy)]
struct Accumulator {
    total: f64,
    count: usize,
    min: f64,
    max: f64,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self {
            total: 0.0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Accumulator {
    fn add(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn finish(self) -> Option<UsageSummary> {
        if self.count == 0 {
            return None;
        }
        let average = self.total / self.count as f64;
        Some(UsageSummary {
            total: self.total,
            count: self.count,
            min: self.min,
            max: self.max,
            average,
            projection: average * PROJECTION_DAYS,
        })
    }
}

/// Reshape `usage` into a (month, day) x year table for `range`.
///
/// Never fails: missing, null, zero and negative values become `None` cells and
/// are left out of the statistics. Every present cell accumulates, so a date
/// reached twice through repeated display rows counts twice.
pub fn aggregate(range: &YearRange, usage: &DailyUsage) -> CalendarTable {
    let years: Vec<i32> = range.years().collect();
    let mut accumulators = vec![Accumulator::default(); years.len()];
    let mut rows = Vec::new();

    for month_day in reference_span(range) {
        let mut cells = Vec::with_capacity(years.len());
        for (acc, &year) in accumulators.iter_mut().zip(&years) {
            let cell = month_day.in_year(year).and_then(|date| usage.valid(date));
            if let Some(value) = cell {
                acc.add(value);
            }
            cells.push(cell);
        }
        rows.push(CalendarRow { month_day, cells });
    }

    let stats = years
        .iter()
        .zip(accumulators)
        .map(|(&year, acc)| YearStats {
            year,
            summary: acc.finish(),
        })
        .collect();

    CalendarTable { years, rows, stats }
}
