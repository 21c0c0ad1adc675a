//! Parsing of the `YYYY[-MM[-DD]]` date arguments.

use chrono::NaiveDate;

use crate::error::{AppError, ErrorKind};

/// Parse a CLI date argument; missing month/day default to 1.
///
/// `label` names the argument in the error message ("start", "end", ...).
pub fn parse_date_arg(label: &str, raw: &str) -> Result<NaiveDate, AppError> {
    let invalid = |detail: String| {
        AppError::new(
            ErrorKind::InvalidDateFormat,
            format!("Error parsing {label} date '{raw}': {detail}"),
        )
    };

    let parts: Vec<&str> = raw.trim().split('-').collect();
    if parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(invalid("expected YYYY[-MM[-DD]]".to_string()));
    }

    let year: i32 = parts[0]
        .parse()
        .map_err(|e| invalid(format!("bad year: {e}")))?;
    let month: u32 = match parts.get(1) {
        Some(p) => p.parse().map_err(|e| invalid(format!("bad month: {e}")))?,
        None => 1,
    };
    let day: u32 = match parts.get(2) {
        Some(p) => p.parse().map_err(|e| invalid(format!("bad day: {e}")))?,
        None => 1,
    };

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| invalid("not a calendar date".to_string()))
}

/// January 1st of `year`.
pub fn new_year(year: i32) -> Result<NaiveDate, AppError> {
    NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| {
        AppError::new(
            ErrorKind::InvalidDateFormat,
            format!("Year {year} is out of range."),
        )
    })
}
