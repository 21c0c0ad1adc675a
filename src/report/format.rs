//! Text layout for the calendar report and the sun times.

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::calendar::{CalendarTable, UsageSummary};
use crate::domain::Coordinates;
use crate::solar::{PolarCondition, SunTimes};

const LABEL_WIDTH: usize = 7;
const CELL_WIDTH: usize = 8;
const NO_DATA: &str = "NULL";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Format the year-over-year table with its statistics footer.
pub fn format_calendar(table: &CalendarTable) -> String {
    let mut out = String::new();
    out.push_str("Historical Usage:\n");

    push_line(&mut out, "date", table.years.iter().map(|y| format!("{y:>CELL_WIDTH$}")));
    push_rule(&mut out, table.years.len());

    for row in &table.rows {
        push_line(
            &mut out,
            &row.month_day.to_string(),
            row.cells.iter().map(|c| fmt_cell(*c)),
        );
    }

    push_rule(&mut out, table.years.len());

    let footer: [(&str, fn(&UsageSummary) -> f64); 5] = [
        ("Total", |s| s.total),
        ("Min", |s| s.min),
        ("Max", |s| s.max),
        ("Average", |s| s.average),
        ("YearPro", |s| s.projection),
    ];
    for (label, pick) in footer {
        push_line(
            &mut out,
            label,
            table.stats.iter().map(|s| fmt_cell(s.summary.as_ref().map(pick))),
        );
    }

    out
}

/// Format sunrise/sunset for `date` in `tz`.
pub fn format_sun_times(date: NaiveDate, coords: Coordinates, times: &SunTimes, tz: &Tz) -> String {
    let mut out = String::new();
    out.push_str(&format!("Date: {}\n", date.format("%Y-%m-%d")));
    out.push_str(&format!("Latitude: {:.6}\n", coords.lat));
    out.push_str(&format!("Longitude: {:.6}\n", coords.lon));
    out.push_str(&format!("Sunrise: {}\n", fmt_instant(&times.sunrise, tz)));
    out.push_str(&format!("Transit: {}\n", fmt_instant(&times.transit, tz)));
    out.push_str(&format!("Sunset: {}\n", fmt_instant(&times.sunset, tz)));
    match times.polar {
        Some(PolarCondition::PolarDay) => out.push_str("Note: polar day, the sun does not set\n"),
        Some(PolarCondition::PolarNight) => out.push_str("Note: polar night, the sun does not rise\n"),
        None => {}
    }
    out
}

/// Format the fixed window used when no location is configured.
pub fn format_fallback_window(date: NaiveDate, start: &DateTime<Tz>, end: &DateTime<Tz>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Date: {}\n", date.format("%Y-%m-%d")));
    out.push_str("No location configured; using fallback window\n");
    out.push_str(&format!("Start: {}\n", start.format(TIME_FORMAT)));
    out.push_str(&format!("End: {}\n", end.format(TIME_FORMAT)));
    out
}

fn push_line(out: &mut String, label: &str, cells: impl Iterator<Item = String>) {
    let mut line = format!("{label:<LABEL_WIDTH$} ");
    for cell in cells {
        line.push_str("  ");
        line.push_str(&cell);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn push_rule(out: &mut String, columns: usize) {
    push_line(
        out,
        "=====",
        (0..columns).map(|_| "=".repeat(CELL_WIDTH)),
    );
}

fn fmt_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:>CELL_WIDTH$.2}"),
        None => format!("{NO_DATA:>CELL_WIDTH$}"),
    }
}

fn fmt_instant<T: TimeZone>(instant: &DateTime<T>, tz: &Tz) -> String {
    instant.with_timezone(tz).format(TIME_FORMAT).to_string()
}
