//! Instrument error types.

use pricer_core::market_data::MarketDataError;
use thiserror::Error;

use crate::schedules::ScheduleError;

/// Instrument construction and valuation errors.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidNotional { notional: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Notional is zero, negative or non-finite.
    #[error("Invalid notional: N = {notional}")]
    InvalidNotional {
        /// The invalid notional value
        notional: f64,
    },

    /// Fixed rate is NaN or infinite.
    #[error("Invalid fixed rate: K = {rate}")]
    InvalidFixedRate {
        /// The invalid rate
        rate: f64,
    },

    /// Unrecognised swap direction label.
    #[error("Unknown swap direction: '{value}'")]
    UnknownDirection {
        /// The label supplied
        value: String,
    },

    /// A swaption was given no exercise dates.
    #[error("Exercise schedule is empty")]
    EmptyExercise,

    /// Schedule generation failed.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Curve lookup failed during valuation.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = InstrumentError::UnknownDirection {
            value: "straddle".to_string(),
        };
        assert_eq!(format!("{}", err), "Unknown swap direction: 'straddle'");
        assert_eq!(
            format!("{}", InstrumentError::EmptyExercise),
            "Exercise schedule is empty"
        );
    }

    #[test]
    fn test_from_schedule_error() {
        let err: InstrumentError = ScheduleError::MissingField { field: "end" }.into();
        assert!(matches!(err, InstrumentError::Schedule(_)));
    }
}
