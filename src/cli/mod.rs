//! Command-line parsing for the solar production reports.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the aggregation/ephemeris code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_DATABASE, DEFAULT_INFLUX_HOST, DEFAULT_LOCATION_PATH};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rep", version, about = "Year-over-year solar production calendar")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print daily production side by side for each year, with per-year statistics.
    Report(ReportArgs),
    /// Print sunrise and sunset for a date at the configured location.
    Sun(SunArgs),
}

/// Options for the calendar report.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// First day to include, `YYYY[-MM[-DD]]` (default: January 1st of the earliest record).
    pub start: Option<String>,

    /// Day to stop before, `YYYY[-MM[-DD]]` (default: January 1st of next year).
    pub end: Option<String>,

    /// InfluxDB host (hostname, hostname:port, or full URL).
    #[arg(short = 'H', long, env = "INFLUX_HOST", default_value = DEFAULT_INFLUX_HOST)]
    pub host: String,

    /// InfluxDB database holding the inverter measurements.
    #[arg(long, env = "INFLUX_DB", default_value = DEFAULT_DATABASE)]
    pub db: String,

    /// Timezone for queries and calendar days (default: system timezone).
    #[arg(long)]
    pub tz: Option<String>,

    /// Also write the table (rows + statistics) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for the sunrise/sunset lookup.
#[derive(Debug, Parser, Clone)]
pub struct SunArgs {
    /// Day to compute, `YYYY[-MM[-DD]]` (default: today).
    pub date: Option<String>,

    /// Location file with `lat=` and `lon=` lines.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LOCATION_PATH)]
    pub location: PathBuf,

    /// Timezone for the printed times (default: system timezone).
    #[arg(long)]
    pub tz: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_positionals_and_flags() {
        let cli = Cli::parse_from(["rep", "report", "2020", "2022-01", "-H", "influx:8087", "--tz", "UTC"]);
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.start.as_deref(), Some("2020"));
        assert_eq!(args.end.as_deref(), Some("2022-01"));
        assert_eq!(args.host, "influx:8087");
        assert_eq!(args.tz.as_deref(), Some("UTC"));
        assert_eq!(args.export, None);
    }

    #[test]
    fn sun_defaults_to_the_system_location_file() {
        let cli = Cli::parse_from(["rep", "sun"]);
        let Command::Sun(args) = cli.command else {
            panic!("expected sun");
        };
        assert_eq!(args.date, None);
        assert_eq!(args.location, PathBuf::from(DEFAULT_LOCATION_PATH));
    }
}
