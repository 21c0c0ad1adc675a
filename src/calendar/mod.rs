//! Multi-year calendar aggregation.
//!
//! Reshapes a flat date -> value mapping into a table with one row per
//! (month, day) and one column per year, plus per-year statistics.
//!
//! Rows come from a fixed 366-day reference calendar (`MonthDay`), not from
//! real-calendar arithmetic, so every year in the table has the same rows and
//! February 29 is always present.

pub mod aggregate;
pub mod month_day;

pub use aggregate::*;
pub use month_day::*;
