//! Formatted terminal output.
//!
//! Formatting lives in one place so the aggregation and ephemeris code stay free
//! of presentation concerns.

pub mod format;

pub use format::*;
