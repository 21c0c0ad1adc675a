//! Observer location file.
//!
//! The file holds `key=value` lines; only `lat` and `lon` are read:
//!
//! ```text
//! lat=31.809158
//! lon=-95.144338
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::domain::Coordinates;
use crate::error::{AppError, ErrorKind};

/// Read coordinates from `path`.
///
/// A missing file is `Ok(None)` so the caller can fall back to a fixed window.
pub fn read_coordinates(path: &Path) -> Result<Option<Coordinates>, AppError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(AppError::new(
                ErrorKind::Location,
                format!("Failed to open location file '{}': {e}", path.display()),
            ));
        }
    };

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        lines.push(line.map_err(|e| {
            AppError::new(
                ErrorKind::Location,
                format!("Failed to read location file '{}': {e}", path.display()),
            )
        })?);
    }

    parse_coordinates(lines.iter().map(String::as_str)).map(Some)
}

/// Parse `lat=`/`lon=` lines; other lines are ignored.
pub fn parse_coordinates<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Coordinates, AppError> {
    let mut lat = None;
    let mut lon = None;

    for line in lines {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let slot = match key.trim() {
            "lat" => &mut lat,
            "lon" => &mut lon,
            _ => continue,
        };
        let parsed = value.trim().parse::<f64>().map_err(|e| {
            AppError::new(
                ErrorKind::Location,
                format!("Invalid {} value '{}' in location file: {e}", key.trim(), value.trim()),
            )
        })?;
        *slot = Some(parsed);
    }

    let (Some(lat), Some(lon)) = (lat, lon) else {
        return Err(AppError::new(
            ErrorKind::Location,
            "Location file must define both lat= and lon=.",
        ));
    };
    check_degrees("lat", lat, 90.0)?;
    check_degrees("lon", lon, 180.0)?;
    Ok(Coordinates { lat, lon })
}

fn check_degrees(key: &str, value: f64, limit: f64) -> Result<(), AppError> {
    // NaN fails the range check too.
    if (-limit..=limit).contains(&value) {
        return Ok(());
    }
    Err(AppError::new(
        ErrorKind::Location,
        format!("Invalid {key} value {value} in location file: must be within ±{limit} degrees"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_lat_and_lon() {
        let coords = parse_coordinates(["# home", "lat=31.809158", "lon = -95.144338", "alt=120"]).unwrap();
        assert!((coords.lat - 31.809158).abs() < 1e-12);
        assert!((coords.lon + 95.144338).abs() < 1e-12);
    }

    #[test]
    fn bad_or_missing_values_are_errors() {
        let err = parse_coordinates(["lat=north", "lon=1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Location);

        let err = parse_coordinates(["lat=1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Location);
    }

    #[test]
    fn non_finite_or_out_of_range_degrees_are_errors() {
        for lines in [
            ["lat=NaN", "lon=10"],
            ["lat=200", "lon=10"],
            ["lat=10", "lon=inf"],
            ["lat=10", "lon=-180.5"],
        ] {
            let err = parse_coordinates(lines).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Location, "{lines:?}");
        }

        let edge = parse_coordinates(["lat=-90", "lon=180"]).unwrap();
        assert_eq!(edge, Coordinates { lat: -90.0, lon: 180.0 });
    }

    #[test]
    fn missing_file_is_none() {
        let path = std::env::temp_dir().join("rep_no_such_location.conf");
        assert_eq!(read_coordinates(&path).unwrap(), None);
    }

    #[test]
    fn reads_from_disk() {
        let path = std::env::temp_dir().join(format!("rep_location_{}.conf", std::process::id()));
        std::fs::write(&path, "lat=59.91\nlon=10.75\n").unwrap();
        let coords = read_coordinates(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(coords, Some(Coordinates { lat: 59.91, lon: 10.75 }));
    }
}
