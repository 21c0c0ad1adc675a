//! `solar-reports` library crate.
//!
//! The binary (`rep`) is a thin wrapper around this library so that:
//!
//! - the calendar aggregation and the sun calculator are testable without spawning processes
//! - the InfluxDB adapter can be swapped for an in-memory source in tests
//! - new reports can reuse the same building blocks

pub mod app;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod solar;
