//! Julian day conversions.

use chrono::{DateTime, TimeZone, Utc};

/// Julian day of the Unix epoch (1970-01-01T00:00Z).
pub const J1970: f64 = 2_440_588.0;
/// Julian day of the J2000.0 epoch (2000-01-01T12:00Z).
pub const J2000: f64 = 2_451_545.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub fn to_julian<Tz: TimeZone>(date: &DateTime<Tz>) -> f64 {
    date.timestamp_millis() as f64 / MILLIS_PER_DAY - 0.5 + J1970
}

/// Millisecond precision, truncated toward zero.
pub fn from_julian(j: f64) -> DateTime<Utc> {
    let millis = ((j + 0.5 - J1970) * MILLIS_PER_DAY) as i64;
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Days elapsed since J2000.0.
pub fn days_since_j2000<Tz: TimeZone>(date: &DateTime<Tz>) -> f64 {
    to_julian(date) - J2000
}
