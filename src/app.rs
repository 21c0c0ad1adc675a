//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments into an explicit config
//! - fetches daily production from InfluxDB and prints the calendar report
//! - or computes sunrise/sunset for the configured location

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, ReportArgs, SunArgs};
use crate::config::{normalize_host_url, resolve_timezone};
use crate::data::InfluxClient;
use crate::domain::{InfluxConfig, ReportConfig, SunConfig, parse_date_arg};
use crate::error::AppError;
use crate::io::read_coordinates;

pub mod pipeline;

use pipeline::SunWindow;

const DEFAULT_LOG_FILTER: &str = "solar_reports=warn";

/// Entry point for the `rep` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    // `rep 2020 2022` should behave like `rep report 2020 2022`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Sun(args) => handle_sun(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // Logs go to stderr so stdout carries only the report.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = report_config_from_args(&args)?;
    let client = InfluxClient::new(config.influx.clone(), config.tz);

    let run = pipeline::run_report(
        &client,
        config.start.as_deref(),
        config.end.as_deref(),
        today_in(&config.tz),
    )?;
    info!(
        start = %run.range.start(),
        end = %run.range.end(),
        days = run.usage.len(),
        rows = run.table.rows.len(),
        "calendar built"
    );

    println!("{}", crate::report::format_calendar(&run.table));

    if let Some(path) = &config.export {
        crate::io::write_calendar_json(path, &run.table)?;
    }

    Ok(())
}

fn handle_sun(args: SunArgs) -> Result<(), AppError> {
    let config = sun_config_from_args(&args)?;
    let date = match &config.date {
        Some(raw) => parse_date_arg("sun", raw)?,
        None => today_in(&config.tz),
    };

    let coords = read_coordinates(&config.location_path)?;
    if coords.is_none() {
        warn!(path = %config.location_path.display(), "location file not found, using fallback window");
    }

    match pipeline::resolve_sun_window(date, &config.tz, coords)? {
        SunWindow::Computed { coords, times } => {
            print!("{}", crate::report::format_sun_times(date, coords, &times, &config.tz));
        }
        SunWindow::Fallback { start, end } => {
            print!("{}", crate::report::format_fallback_window(date, &start, &end));
        }
    }

    Ok(())
}

pub fn report_config_from_args(args: &ReportArgs) -> Result<ReportConfig, AppError> {
    Ok(ReportConfig {
        influx: InfluxConfig {
            host: normalize_host_url(&args.host),
            database: args.db.clone(),
        },
        tz: resolve_timezone(args.tz.as_deref())?,
        start: args.start.clone(),
        end: args.end.clone(),
        export: args.export.clone(),
    })
}

pub fn sun_config_from_args(args: &SunArgs) -> Result<SunConfig, AppError> {
    Ok(SunConfig {
        tz: resolve_timezone(args.tz.as_deref())?,
        date: args.date.clone(),
        location_path: args.location.clone(),
    })
}

fn today_in(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

/// Rewrite argv so `rep` defaults to `rep report`.
///
/// Rules:
/// - `rep`                      -> `rep report`
/// - `rep 2020 2022 ...`        -> `rep report 2020 2022 ...`
/// - `rep -H influx ...`        -> `rep report -H influx ...`
/// - `rep --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "sun");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "report".to_string());
    argv
}
