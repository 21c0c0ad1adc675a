//! Shared report logic used by the CLI front-end.
//!
//! Keeping the workflow here (resolve range -> fetch -> aggregate, or
//! resolve location -> sun times) keeps `app` about presentation only and lets
//! tests drive it with an in-memory `UsageSource`.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::calendar::{CalendarTable, aggregate};
use crate::data::UsageSource;
use crate::domain::{Coordinates, DailyUsage, YearRange, new_year, parse_date_arg};
use crate::error::{AppError, ErrorKind};
use crate::solar::{SunTimes, sun_times};

/// Local hour at which the sun calculation is anchored.
const SUN_REFERENCE_HOUR: u32 = 12;
const FALLBACK_START_HOUR: u32 = 8;
const FALLBACK_END_HOUR: u32 = 20;

/// All computed outputs of a single `rep report` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub range: YearRange,
    pub usage: DailyUsage,
    pub table: CalendarTable,
}

/// Resolve the range, fetch the data and build the table.
pub fn run_report(
    source: &dyn UsageSource,
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<RunOutput, AppError> {
    let range = resolve_range(source, start, end, today)?;
    let usage = source.fetch_daily_usage(range.start(), range.end())?;
    Ok(run_report_with_usage(range, usage))
}

/// Build the table from already-fetched usage.
pub fn run_report_with_usage(range: YearRange, usage: DailyUsage) -> RunOutput {
    let table = aggregate(&range, &usage);
    RunOutput { range, usage, table }
}

/// Turn the optional CLI dates into a validated range.
///
/// Without a start, the report begins on January 1st of the earliest record
/// (or of `today`'s year if that cannot be determined). Without an end, it
/// runs through the end of `today`'s year.
pub fn resolve_range(
    source: &dyn UsageSource,
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<YearRange, AppError> {
    let explicit_start = start.map(|raw| parse_date_arg("start", raw)).transpose()?;
    let end = match end {
        Some(raw) => parse_date_arg("end", raw)?,
        None => new_year(today.year() + 1)?,
    };

    let start = match explicit_start {
        Some(date) => date,
        None => {
            let year = source.earliest_year().unwrap_or_else(|| {
                warn!(year = today.year(), "could not determine first record, starting at current year");
                today.year()
            });
            new_year(year)?
        }
    };

    YearRange::new(start, end)
}

/// What to print for the `sun` command.
#[derive(Debug, Clone, PartialEq)]
pub enum SunWindow {
    Computed { coords: Coordinates, times: SunTimes },
    /// No location available: a fixed local daytime window.
    Fallback { start: DateTime<Tz>, end: DateTime<Tz> },
}

/// Sun times for `date` at local noon, or the fallback window without coordinates.
pub fn resolve_sun_window(
    date: NaiveDate,
    tz: &Tz,
    coords: Option<Coordinates>,
) -> Result<SunWindow, AppError> {
    let Some(coords) = coords else {
        return Ok(SunWindow::Fallback {
            start: local_instant(date, FALLBACK_START_HOUR, tz)?,
            end: local_instant(date, FALLBACK_END_HOUR, tz)?,
        });
    };

    let anchor = local_instant(date, SUN_REFERENCE_HOUR, tz)?;
    let times = sun_times(&anchor, coords);
    if let Some(polar) = times.polar {
        info!(?polar, %date, lat = coords.lat, "hour angle clamped");
    }
    Ok(SunWindow::Computed { coords, times })
}

fn local_instant(date: NaiveDate, hour: u32, tz: &Tz) -> Result<DateTime<Tz>, AppError> {
    date.and_hms_opt(hour, 0, 0)
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .ok_or_else(|| {
            AppError::new(
                ErrorKind::InvalidDateFormat,
                format!("{date} {hour:02}:00 does not exist in {}", tz.name()),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::America::Chicago;
    use std::cell::RefCell;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// In-memory source that records the requested range.
    struct FakeSource {
        first_year: Option<i32>,
        usage: DailyUsage,
        requested: RefCell<Option<(NaiveDate, NaiveDate)>>,
    }

    impl FakeSource {
        fn new(first_year: Option<i32>, usage: DailyUsage) -> Self {
            Self {
                first_year,
                usage,
                requested: RefCell::new(None),
            }
        }
    }

    impl UsageSource for FakeSource {
        fn earliest_year(&self) -> Option<i32> {
            self.first_year
        }

        fn fetch_daily_usage(&self, start: NaiveDate, end: NaiveDate) -> Result<DailyUsage, AppError> {
            *self.requested.borrow_mut() = Some((start, end));
            Ok(self.usage.clone())
        }
    }

    #[test]
    fn two_year_report_end_to_end() {
        let usage: DailyUsage = vec![
            (ymd(2020, 1, 1), 10.0),
            (ymd(2020, 1, 2), 20.0),
            (ymd(2020, 1, 3), 30.0),
            (ymd(2021, 1, 1), 5.0),
            (ymd(2021, 1, 2), 15.0),
            (ymd(2021, 1, 3), 25.0),
        ]
        .into_iter()
        .collect();
        let source = FakeSource::new(None, usage);

        let run = run_report(&source, Some("2020-01-01"), Some("2022-01-01"), ymd(2025, 5, 5)).unwrap();

        assert_eq!(*source.requested.borrow(), Some((ymd(2020, 1, 1), ymd(2022, 1, 1))));
        assert_eq!(run.range.start(), ymd(2020, 1, 1));
        assert_eq!(run.usage.len(), 6);
        assert_eq!(run.table.years, vec![2020, 2021]);

        let s2020 = run.table.stats_for(2020).unwrap().summary.unwrap();
        assert_eq!((s2020.total, s2020.count, s2020.average), (60.0, 3, 20.0));
        assert_eq!((s2020.min, s2020.max, s2020.projection), (10.0, 30.0, 7320.0));

        let s2021 = run.table.stats_for(2021).unwrap().summary.unwrap();
        assert_eq!((s2021.total, s2021.count, s2021.average), (45.0, 3, 15.0));
        assert_eq!((s2021.min, s2021.max, s2021.projection), (5.0, 25.0, 5490.0));
    }

    #[test]
    fn defaults_use_first_record_and_next_new_year() {
        let source = FakeSource::new(Some(2019), DailyUsage::new());
        let range = resolve_range(&source, None, None, ymd(2024, 8, 30)).unwrap();
        assert_eq!(range.start(), ymd(2019, 1, 1));
        assert_eq!(range.end(), ymd(2025, 1, 1));
        assert_eq!(range.years(), 2019..=2024);
    }

    #[test]
    fn unknown_first_record_starts_this_year() {
        let source = FakeSource::new(None, DailyUsage::new());
        let range = resolve_range(&source, None, None, ymd(2024, 8, 30)).unwrap();
        assert_eq!(range.start(), ymd(2024, 1, 1));
    }

    #[test]
    fn end_before_start_is_rejected_before_fetching() {
        let source = FakeSource::new(None, DailyUsage::new());
        let err = run_report(&source, Some("2023-06"), Some("2023-01"), ymd(2024, 1, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeInverted);
        assert_eq!(err.exit_code(), 1);
        assert!(source.requested.borrow().is_none());
    }

    #[test]
    fn bad_date_is_invalid_format() {
        let source = FakeSource::new(None, DailyUsage::new());
        let err = resolve_range(&source, Some("2023-xx"), None, ymd(2024, 1, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDateFormat);
    }

    #[test]
    fn missing_location_falls_back_to_eight_to_eight() {
        let window = resolve_sun_window(ymd(2024, 9, 12), &Chicago, None).unwrap();
        let SunWindow::Fallback { start, end } = window else {
            panic!("expected fallback");
        };
        assert_eq!((start.hour(), end.hour()), (8, 20));
        assert_eq!(start.date_naive(), ymd(2024, 9, 12));
    }

    #[test]
    fn location_gives_computed_times() {
        let coords = Coordinates { lat: 31.809158, lon: -95.144338 };
        let window = resolve_sun_window(ymd(2024, 9, 12), &Chicago, Some(coords)).unwrap();
        let SunWindow::Computed { times, .. } = window else {
            panic!("expected computed times");
        };
        let local_rise = times.sunrise.with_timezone(&Chicago);
        assert_eq!(local_rise.date_naive(), ymd(2024, 9, 12));
        assert_eq!(local_rise.hour(), 7);
    }
}
