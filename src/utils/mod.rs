//! Utility modules shared across the crate.
//!
//! - [`datetime`] - Parsing and formatting of the date formats the Taiga API uses

pub mod datetime;
