//! Market data error types.
//!
//! Structured errors for discount curve validation and volatility surface
//! construction. All of these are input validation failures raised before
//! any pricing happens.

use crate::types::{Date, DateError, InterpolationError};
use thiserror::Error;

/// Market data operation errors.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Every curve node is on or before the valuation date.
    #[error("No curve nodes after valuation date {valuation_date}")]
    NoNodesAfterValuation {
        /// Valuation date of the curve
        valuation_date: Date,
    },

    /// A discount factor is zero, negative or not finite.
    #[error("Non-positive discount factor {df} at {date}")]
    NonPositiveDiscount {
        /// Node date
        date: Date,
        /// Offending discount factor
        df: f64,
    },

    /// Query before the curve's valuation date.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Volatility grid does not describe a valid surface.
    #[error("Invalid volatility surface: {0}")]
    InvalidSurface(String),

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Date arithmetic failed while building or rolling a curve.
    #[error("Date error: {0}")]
    Date(#[from] DateError),
}
