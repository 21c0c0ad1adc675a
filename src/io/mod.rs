//! Input/output helpers.
//!
//! - location file reading (`location`)
//! - calendar table export to JSON (`export`)

pub mod export;
pub mod location;

pub use export::*;
pub use location::*;
