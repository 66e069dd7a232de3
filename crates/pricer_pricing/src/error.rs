//! Error types for the swaption engines.

use pricer_core::market_data::MarketDataError;
use thiserror::Error;

/// Engine configuration and runtime errors.
///
/// # Examples
/// ```
/// use pricer_pricing::EngineError;
///
/// let err = EngineError::InvalidConfig { name: "time_steps", reason: "must be positive".into() };
/// assert!(err.to_string().contains("time_steps"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A grid or quadrature setting is out of range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidConfig {
        /// Setting name
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// The engine cannot handle this exercise style.
    #[error("Unsupported exercise: {dates} exercise dates, engine handles one")]
    UnsupportedExercise {
        /// Number of live exercise dates
        dates: usize,
    },

    /// Zero pivot in the tridiagonal solve.
    #[error("Singular tridiagonal system at row {row}")]
    SingularSystem {
        /// Row of the zero pivot
        row: usize,
    },

    /// The result is NaN or infinite.
    #[error("Non-finite price: {0}")]
    NonFinite(f64),

    /// Curve lookup failed.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}
