//! InfluxDB 1.x integration for inverter power readings.

use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::data::UsageSource;
use crate::domain::{DailyUsage, InfluxConfig};
use crate::error::{AppError, ErrorKind};

/// Inverter `input_power` is negative while producing; the daily sum is
/// sign-flipped and scaled to kWh.
const DAILY_USAGE_QUERY: &str = "select sum(input_power)*-0.0000027778 from inverter where input_power < 0";
const FIRST_RECORD_QUERY: &str = "select first(input_power) from inverter where input_power < 0";

pub struct InfluxClient {
    client: Client,
    config: InfluxConfig,
    tz: Tz,
}

impl InfluxClient {
    pub fn new(config: InfluxConfig, tz: Tz) -> Self {
        Self {
            client: Client::new(),
            config,
            tz,
        }
    }

    fn query(&self, statement: &str) -> Result<QueryResponse, AppError> {
        let url = format!("{}/query", self.config.host);
        let q = format!("{statement} tz('{}')", self.tz.name());
        debug!(%url, db = %self.config.database, query = %q, "influx query");

        let resp = self
            .client
            .get(&url)
            .query(&[("db", self.config.database.as_str()), ("q", q.as_str())])
            .send()
            .map_err(|e| {
                AppError::new(
                    ErrorKind::UnreachableSource,
                    format!("InfluxDB request to {url} failed: {e}"),
                )
            })?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                ErrorKind::UnreachableSource,
                format!("InfluxDB request failed with status {}.", resp.status()),
            ));
        }

        resp.json().map_err(|e| {
            AppError::new(
                ErrorKind::MalformedResponse,
                format!("Failed to parse InfluxDB response: {e}"),
            )
        })
    }
}

impl UsageSource for InfluxClient {
    fn earliest_year(&self) -> Option<i32> {
        match self.query(FIRST_RECORD_QUERY) {
            Ok(resp) => first_year_from_response(&resp, &self.tz),
            Err(err) => {
                warn!(error = %err, "first record query failed");
                None
            }
        }
    }

    fn fetch_daily_usage(&self, start: NaiveDate, end: NaiveDate) -> Result<DailyUsage, AppError> {
        let statement = format!(
            "{DAILY_USAGE_QUERY} and time >= '{start} 00:00:00' and time < '{end} 00:00:00' group by time(1d) fill(null)"
        );
        let resp = self.query(&statement)?;
        let usage = daily_usage_from_response(&resp, &self.tz)?;
        info!(%start, %end, days = usage.len(), "fetched daily usage");
        Ok(usage)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    #[serde(default)]
    series: Vec<Series>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Series {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

fn first_statement(resp: &QueryResponse) -> Result<Option<&StatementResult>, AppError> {
    let Some(result) = resp.results.first() else {
        return Ok(None);
    };
    if let Some(err) = &result.error {
        return Err(AppError::new(
            ErrorKind::MalformedResponse,
            format!("InfluxDB rejected the query: {err}"),
        ));
    }
    Ok(Some(result))
}

/// Convert `[[time, value], ...]` rows into a usage mapping.
///
/// Rows with an unreadable timestamp are skipped; a `null` value becomes a
/// "no data" entry for that day.
fn daily_usage_from_response(resp: &QueryResponse, tz: &Tz) -> Result<DailyUsage, AppError> {
    let mut usage = DailyUsage::new();
    let Some(result) = first_statement(resp)? else {
        return Ok(usage);
    };

    for series in &result.series {
        for row in &series.values {
            let [time, value, ..] = row.as_slice() else {
                continue;
            };
            let Some(date) = parse_local_date(time, tz) else {
                continue;
            };
            usage.insert(date, parse_value(value));
        }
    }

    Ok(usage)
}

fn first_year_from_response(resp: &QueryResponse, tz: &Tz) -> Option<i32> {
    let result = match first_statement(resp) {
        Ok(result) => result?,
        Err(err) => {
            warn!(error = %err, "first record query rejected");
            return None;
        }
    };
    let time = result.series.first()?.values.first()?.first()?;
    parse_local_date(time, tz).map(|d| d.year())
}

fn parse_local_date(raw: &Value, tz: &Tz) -> Option<NaiveDate> {
    let ts = DateTime::parse_from_rfc3339(raw.as_str()?).ok()?;
    Some(ts.with_timezone(tz).date_naive())
}

fn parse_value(raw: &Value) -> Option<f64> {
    let v = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}
