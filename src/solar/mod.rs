//! Sunrise/sunset from a low-precision solar position model.
//!
//! The calculator is a pure function of (instant, latitude, longitude). It never
//! fails: at polar latitudes the hour angle is clamped and the result is flagged
//! with a [`PolarCondition`] instead.

pub mod ephemeris;
pub mod julian;

pub use ephemeris::*;
pub use julian::*;
