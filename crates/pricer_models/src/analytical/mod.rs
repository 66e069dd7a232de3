//! Closed-form pricing used to build calibration targets.
//!
//! - [`Bachelier`]: normal-model European swaption premiums
//! - [`distributions`]: standard normal CDF and PDF

pub mod bachelier;
pub mod distributions;
pub mod error;

pub use bachelier::Bachelier;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
