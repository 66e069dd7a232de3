//! Hull-White calibration procedures.
//!
//! - [`CalibrationConfig`]: seeds, bounds, budgets and tolerances
//! - [`CalibrationEngine`]: ATM, joint and inverse fits against any
//!   [`SwaptionEngine`](pricer_pricing::SwaptionEngine)
//! - [`CalibrationResult`]: fitted parameters with convergence diagnostics

mod config;
mod engine;
mod result;

pub use config::CalibrationConfig;
pub use engine::{
    logit_of_mean_reversion, mean_reversion_from_logit, sigma_from_log, CalibrationEngine,
    PENALTY, SIGMA_FLOOR,
};
pub use result::{CalibrationMethod, CalibrationResult};
