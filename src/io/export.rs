//! Export the calendar table to JSON.
//!
//! The export mirrors `CalendarTable` field for field; "no data" cells and
//! statistics are written as `null`.

use std::fs::File;
use std::path::Path;

use crate::calendar::CalendarTable;
use crate::error::{AppError, ErrorKind};

/// Write the table as pretty-printed JSON.
pub fn write_calendar_json(path: &Path, table: &CalendarTable) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("Failed to create export JSON '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, table)
        .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::calendar::aggregate;
    use crate::domain::{DailyUsage, YearRange};

    #[test]
    fn export_writes_nulls_for_missing_days() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let range = YearRange::new(start, end).unwrap();
        let usage: DailyUsage = vec![(start, 4.5)].into_iter().collect();
        let table = aggregate(&range, &usage);

        let path = std::env::temp_dir().join(format!("rep_export_{}.json", std::process::id()));
        write_calendar_json(&path, &table).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(written["years"], serde_json::json!([2024]));
        assert_eq!(written["rows"][0]["month_day"]["month"], 5);
        assert_eq!(written["rows"][0]["cells"][0], 4.5);
        assert!(written["rows"][1]["cells"][0].is_null());
        assert_eq!(written["stats"][0]["summary"]["count"], 1);
    }
}
