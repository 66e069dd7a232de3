//! Financial instrument definitions.
//!
//! - [`rates`]: OIS swaps and swaptions with their discounting pricer
//! - [`Exercise`]: European and Bermudan exercise rights
//! - [`InstrumentError`]: construction and valuation errors

pub mod error;
mod exercise;
pub mod rates;

pub use error::InstrumentError;
pub use exercise::Exercise;
