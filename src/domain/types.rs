//! Shared domain types.
//!
//! These are plain values: built once at the process boundary (configuration) or
//! by the data source adapter (`DailyUsage`), then passed by reference into the
//! aggregation and rendering code.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

use crate::error::{AppError, ErrorKind};

/// A calendar day in the configured timezone, without time of day.
pub type DateKey = NaiveDate;

/// Daily production keyed by local calendar date.
///
/// `None` means the store had a bucket for that day but no measurement in it.
/// Only strictly positive values count as valid data; see [`DailyUsage::valid`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyUsage {
    days: BTreeMap<DateKey, Option<f64>>,
}

impl DailyUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: DateKey, value: Option<f64>) {
        self.days.insert(date, value);
    }

    /// Raw value as stored, flattening "absent" and "null".
    pub fn get(&self, date: DateKey) -> Option<f64> {
        self.days.get(&date).copied().flatten()
    }

    /// The value for `date` if it is a usable measurement (finite and `> 0`).
    pub fn valid(&self, date: DateKey) -> Option<f64> {
        self.get(date).filter(|v| v.is_finite() && *v > 0.0)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<(DateKey, Option<f64>)> for DailyUsage {
    fn from_iter<I: IntoIterator<Item = (DateKey, Option<f64>)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(DateKey, f64)> for DailyUsage {
    fn from_iter<I: IntoIterator<Item = (DateKey, f64)>>(iter: I) -> Self {
        iter.into_iter().map(|(d, v)| (d, Some(v))).collect()
    }
}

/// Requested report span: `start` inclusive, `end` exclusive, `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: DateKey,
    end: DateKey,
}

impl YearRange {
    pub fn new(start: DateKey, end: DateKey) -> Result<Self, AppError> {
        if end < start {
            return Err(AppError::new(
                ErrorKind::RangeInverted,
                format!("error: end ({end}) cannot be before start ({start})"),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateKey {
        self.start
    }

    pub fn end(&self) -> DateKey {
        self.end
    }

    /// Years that get a column in the report.
    ///
    /// An end on January 1st excludes that year, so "next Jan 1" reads as
    /// "through the end of this year".
    pub fn years(&self) -> RangeInclusive<i32> {
        let last = if self.end.month() == 1 && self.end.day() == 1 {
            self.end.year() - 1
        } else {
            self.end.year()
        };
        self.start.year()..=last
    }

    pub fn spans_years(&self) -> bool {
        self.end.year() != self.start.year()
    }
}

/// Observer position in degrees (north and east positive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// InfluxDB connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluxConfig {
    /// Base URL, already normalized (`http://host:port`).
    pub host: String,
    pub database: String,
}

/// Everything the calendar report needs, resolved once from CLI + environment.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub influx: InfluxConfig,
    /// Timezone used both for the query buckets and for local calendar dates.
    pub tz: Tz,
    /// Raw `YYYY[-MM[-DD]]` start argument; `None` means "earliest record".
    pub start: Option<String>,
    /// Raw `YYYY[-MM[-DD]]` end argument; `None` means "next January 1st".
    pub end: Option<String>,
    pub export: Option<PathBuf>,
}

/// Settings for the sunrise/sunset lookup.
#[derive(Debug, Clone)]
pub struct SunConfig {
    pub tz: Tz,
    pub date: Option<String>,
    pub location_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn only_positive_values_are_valid() {
        let usage: DailyUsage = vec![
            (ymd(2024, 1, 1), Some(3.5)),
            (ymd(2024, 1, 2), Some(0.0)),
            (ymd(2024, 1, 3), Some(-1.0)),
            (ymd(2024, 1, 4), None),
        ]
        .into_iter()
        .collect();

        assert_eq!(usage.len(), 4);
        assert_eq!(usage.valid(ymd(2024, 1, 1)), Some(3.5));
        assert_eq!(usage.get(ymd(2024, 1, 2)), Some(0.0));
        assert_eq!(usage.valid(ymd(2024, 1, 2)), None);
        assert_eq!(usage.valid(ymd(2024, 1, 3)), None);
        assert_eq!(usage.valid(ymd(2024, 1, 4)), None);
        assert_eq!(usage.valid(ymd(2024, 1, 5)), None);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = YearRange::new(ymd(2024, 3, 1), ymd(2024, 2, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeInverted);
        assert!(YearRange::new(ymd(2024, 3, 1), ymd(2024, 3, 1)).is_ok());
    }

    #[test]
    fn january_first_end_excludes_its_year() {
        let range = YearRange::new(ymd(2020, 1, 1), ymd(2022, 1, 1)).unwrap();
        assert_eq!(range.years(), 2020..=2021);

        let range = YearRange::new(ymd(2020, 1, 1), ymd(2022, 1, 2)).unwrap();
        assert_eq!(range.years(), 2020..=2022);
    }
}
