//! Measurement sources.
//!
//! The report only needs a daily usage mapping and, optionally, the year of the
//! earliest record. `UsageSource` is that seam; `InfluxClient` is the real one.

pub mod influx;

pub use influx::*;

use chrono::NaiveDate;

use crate::domain::DailyUsage;
use crate::error::AppError;

pub trait UsageSource {
    /// Year of the earliest production reading, if it can be determined.
    fn earliest_year(&self) -> Option<i32>;

    /// Daily production for `[start, end)`, keyed by local calendar date.
    fn fetch_daily_usage(&self, start: NaiveDate, end: NaiveDate) -> Result<DailyUsage, AppError>;
}
