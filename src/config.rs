//! Process-boundary configuration: defaults, host normalization and system
//! timezone detection.
//!
//! Nothing here is global; `app` resolves these once into a `ReportConfig` /
//! `SunConfig` and passes that down.

use std::path::Path;

use chrono_tz::Tz;
use tracing::debug;

use crate::error::{AppError, ErrorKind};

pub const DEFAULT_INFLUX_HOST: &str = "http://localhost:8086";
pub const DEFAULT_INFLUX_PORT: u16 = 8086;
pub const DEFAULT_DATABASE: &str = "power";
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";
pub const DEFAULT_LOCATION_PATH: &str = "/opt/sd/etc/location.conf";

/// Turn `host`, `host:port` or a full URL into a base URL.
pub fn normalize_host_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        return host.to_string();
    }
    if host.contains(':') {
        return format!("http://{host}");
    }
    format!("http://{host}:{DEFAULT_INFLUX_PORT}")
}

/// Resolve `--tz` (or the detected system zone) into a `Tz`.
pub fn resolve_timezone(explicit: Option<&str>) -> Result<Tz, AppError> {
    let name = match explicit {
        Some(name) => name.trim().to_string(),
        None => detect_system_timezone(),
    };
    name.parse::<Tz>().map_err(|e| {
        AppError::new(ErrorKind::Config, format!("Unknown timezone '{name}': {e}"))
    })
}

/// Best-effort IANA name of the system timezone.
///
/// Order: `TZ`, the `/etc/localtime` symlink, `/etc/timezone`,
/// `/var/db/zoneinfo` (macOS), then [`DEFAULT_TIMEZONE`].
pub fn detect_system_timezone() -> String {
    if let Ok(tz) = std::env::var("TZ") {
        let tz = tz.trim().trim_start_matches(':');
        if !tz.is_empty() {
            debug!(tz = %tz, "timezone from TZ");
            return tz.to_string();
        }
    }

    if let Ok(link) = std::fs::read_link("/etc/localtime") {
        if let Some(tz) = zone_from_localtime_link(&link) {
            debug!(tz = %tz, "timezone from /etc/localtime");
            return tz;
        }
    }

    for path in ["/etc/timezone", "/var/db/zoneinfo"] {
        if let Some(tz) = zone_from_file(Path::new(path)) {
            debug!(tz = %tz, path, "timezone from file");
            return tz;
        }
    }

    debug!(tz = DEFAULT_TIMEZONE, "timezone fallback");
    DEFAULT_TIMEZONE.to_string()
}

fn zone_from_localtime_link(link: &Path) -> Option<String> {
    let link = link.to_string_lossy();
    let (_, zone) = link.split_once("/zoneinfo/")?;
    (!zone.is_empty()).then(|| zone.to_string())
}

fn zone_from_file(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let zone = content.trim();
    (!zone.is_empty()).then(|| zone.to_string())
}
