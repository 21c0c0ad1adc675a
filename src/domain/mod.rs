//! Domain types used throughout the report pipeline.
//!
//! This module defines:
//!
//! - the measurement mapping (`DailyUsage`) and the requested span (`YearRange`)
//! - observer location (`Coordinates`)
//! - the run configuration (`ReportConfig`, `SunConfig`)
//! - CLI date parsing (`parse_date_arg`)

pub mod dates;
pub mod types;

pub use dates::*;
pub use types::*;
