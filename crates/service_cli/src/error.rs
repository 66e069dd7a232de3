//! CLI error type.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{ConventionError, DateError};
use pricer_models::instruments::InstrumentError;
use pricer_models::schedules::ScheduleError;
use pricer_pricing::EngineError;
use pricer_risk::PricerError;
use thiserror::Error;

/// Errors surfaced by `bermudan` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid market data: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Invalid date: {0}")]
    Date(#[from] DateError),

    #[error("Invalid convention: {0}")]
    Convention(#[from] ConventionError),

    #[error("Invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Invalid deal: {0}")]
    Instrument(#[from] InstrumentError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Pricing failed: {0}")]
    Pricer(#[from] PricerError),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
