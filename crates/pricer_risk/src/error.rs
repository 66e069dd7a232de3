//! Risk and orchestration error types.

use pricer_core::market_data::MarketDataError;
use pricer_models::instruments::InstrumentError;
use pricer_models::models::ModelError;
use pricer_optimiser::CalibrationError;
use pricer_pricing::EngineError;
use thiserror::Error;

/// Errors that abort a Greek run.
///
/// Any oracle failure while repricing under a bump ends the run; the
/// calibrated state it started from is left untouched.
#[derive(Debug, Error)]
pub enum GreeksError {
    /// A bump size is not a positive finite number.
    #[error("Invalid bump size: {name} = {value}")]
    InvalidBump {
        /// Setting name
        name: &'static str,
        /// Value supplied
        value: f64,
    },

    /// Repricing failed.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// The Vega recalibration failed.
    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    /// The underlying swap could not be valued.
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// A bumped volatility left the model domain.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// The rolled curve could not be built.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}

/// Errors raised by [`BermudanPricer`](crate::BermudanPricer).
#[derive(Debug, Error)]
pub enum PricerError {
    /// Fixed mean reversion is not positive.
    #[error("Mean reversion must be positive, got {value}")]
    InvalidMeanReversion {
        /// Value supplied
        value: f64,
    },

    /// Greeks or results were requested before calibration.
    #[error("Pricer has not been calibrated")]
    NotCalibrated,

    /// Calibration failed.
    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    /// Greek run failed.
    #[error("Greeks error: {0}")]
    Greeks(#[from] GreeksError),

    /// Final pricing failed.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Underlying swap valuation failed.
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Model parameters were rejected.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}
