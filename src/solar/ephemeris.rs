//! Solar transit, sunrise and sunset.
//!
//! Standard low-precision model: mean anomaly -> equation of center -> ecliptic
//! longitude -> declination -> hour angle at the sunrise altitude. Accurate to
//! about a minute at mid latitudes, which is plenty for scheduling.

use std::f64::consts::PI;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use crate::domain::Coordinates;
use crate::solar::julian::{J2000, days_since_j2000, from_julian};

const RAD: f64 = PI / 180.0;

/// Obliquity of the ecliptic.
const OBLIQUITY: f64 = RAD * 23.4397;
/// Argument of perihelion.
const PERIHELION: f64 = RAD * 102.9372;
/// Altitude of the sun's center at sunrise/sunset (refraction + disk radius).
const SUNRISE_ALTITUDE: f64 = RAD * -0.833;
const J0: f64 = 0.0009;

/// Why the hour angle had to be clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolarCondition {
    /// The sun stays above the sunrise altitude all day; sunrise/sunset are 12h from transit.
    PolarDay,
    /// The sun never reaches the sunrise altitude; sunrise == sunset == transit.
    PolarNight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub transit: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    /// `Some` when the instants are degenerate rather than a real rise/set.
    pub polar: Option<PolarCondition>,
}

impl SunTimes {
    pub fn day_length(&self) -> TimeDelta {
        self.sunset - self.sunrise
    }
}

fn solar_mean_anomaly(d: f64) -> f64 {
    RAD * (357.5291 + 0.985_600_28 * d)
}

fn ecliptic_longitude(m: f64) -> f64 {
    let center = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    m + center + PERIHELION + PI
}

fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

fn julian_cycle(d: f64, lw: f64) -> f64 {
    (d - J0 - lw / (2.0 * PI)).round()
}

fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J0 + (ht + lw) / (2.0 * PI) + n
}

fn solar_transit_j(ds: f64, m: f64, l: f64) -> f64 {
    J2000 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

/// Hour angle for altitude `h`, clamped into `[0, π]`.
fn hour_angle(h: f64, phi: f64, dec: f64) -> (f64, Option<PolarCondition>) {
    let cos_h = (h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    let polar = if cos_h > 1.0 {
        Some(PolarCondition::PolarNight)
    } else if cos_h < -1.0 {
        Some(PolarCondition::PolarDay)
    } else {
        None
    };
    (cos_h.clamp(-1.0, 1.0).acos(), polar)
}

/// Sunrise, transit and sunset for the solar day that `date` falls in.
pub fn sun_times<Tz: TimeZone>(date: &DateTime<Tz>, coords: Coordinates) -> SunTimes {
    let lw = RAD * -coords.lon;
    let phi = RAD * coords.lat;

    let d = days_since_j2000(date);
    let n = julian_cycle(d, lw);
    let ds = approx_transit(0.0, lw, n);

    let m = solar_mean_anomaly(ds);
    let l = ecliptic_longitude(m);
    let dec = declination(l, 0.0);

    let j_noon = solar_transit_j(ds, m, l);

    let (h, polar) = hour_angle(SUNRISE_ALTITUDE, phi, dec);
    let j_set = solar_transit_j(approx_transit(h, lw, n), m, l);
    let j_rise = j_noon - (j_set - j_noon);

    SunTimes {
        sunrise: from_julian(j_rise),
        transit: from_julian(j_noon),
        sunset: from_julian(j_set),
        polar,
    }
}
