//! Calibration error types.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{Date, SolverError};
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_models::models::ModelError;
use pricer_models::schedules::ScheduleError;
use pricer_pricing::EngineError;
use thiserror::Error;

/// Errors raised while building a basket or fitting Hull-White parameters.
///
/// Oracle failures at individual trial points are scored rather than
/// raised; they only surface here when no trial point could be priced.
///
/// # Examples
/// ```
/// use pricer_optimiser::CalibrationError;
///
/// let err = CalibrationError::EmptyBasket;
/// assert!(err.to_string().contains("exercise"));
/// ```
#[derive(Debug, Error)]
pub enum CalibrationError {
    /// No exercise date falls after the valuation date.
    #[error("Calibration basket is empty: no exercise date after the valuation date")]
    EmptyBasket,

    /// An exercise date leaves no underlying swap to exercise into.
    #[error("Exercise date {exercise} is not before swap maturity {maturity}")]
    ExerciseAfterMaturity {
        /// Offending exercise date
        exercise: Date,
        /// Final accrual date of the underlying
        maturity: Date,
    },

    /// A calibration setting is out of range.
    #[error("Invalid calibration config: {name} = {value}")]
    InvalidConfig {
        /// Setting name
        name: &'static str,
        /// Value supplied
        value: f64,
    },

    /// Every trial point failed to price.
    #[error("{method} calibration found no point the oracle could price")]
    NoFeasiblePoint {
        /// Procedure that failed
        method: &'static str,
    },

    /// Market data lookup failed.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Sub-schedule generation failed.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Sub-swap construction or valuation failed.
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Bachelier inputs were not finite.
    #[error("Analytical error: {0}")]
    Analytical(#[from] AnalyticalError),

    /// Fitted parameters were rejected by the model.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// The oracle failed outside a scored trial.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// A solver could not start.
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CalibrationError::ExerciseAfterMaturity {
            exercise: Date::from_ymd(2036, 1, 15).unwrap(),
            maturity: Date::from_ymd(2035, 1, 15).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Exercise date 2036-01-15 is not before swap maturity 2035-01-15"
        );

        let err = CalibrationError::NoFeasiblePoint { method: "Joint" };
        assert!(err.to_string().starts_with("Joint calibration"));
    }

    #[test]
    fn test_from_model_error() {
        let err: CalibrationError = ModelError::InvalidParameter {
            name: "volatility",
            value: -1.0,
        }
        .into();
        assert!(matches!(err, CalibrationError::Model(_)));
    }
}
