//! # pricer_optimiser
//!
//! Hull-White calibration against an ATM normal volatility surface.
//!
//! ## Architecture Position
//!
//! Layer 3 in the **P**ricer layer, beside `pricer_pricing`. Depends on
//! `pricer_core` (L1) for curves, surfaces and solvers, `pricer_models` (L2)
//! for instruments and Bachelier prices, and drives any
//! [`SwaptionEngine`](pricer_pricing::SwaptionEngine) as the valuation oracle.
//!
//! ## Modules
//!
//! - [`basket`]: one European sub-option per live exercise date, priced off
//!   the surface with Bachelier
//! - [`calibration`]: ATM volatility fit, joint `(a, σ)` fit and the inverse
//!   fit of `σ` to a target Bermudan value
//!
//! ## Example
//!
//! ```rust,ignore
//! use pricer_optimiser::basket::BasketBuilder;
//! use pricer_optimiser::calibration::{CalibrationConfig, CalibrationEngine};
//!
//! let basket = BasketBuilder::new(&curve, &surface).build(&swaption)?;
//! let calibrator = CalibrationEngine::new(&fd_engine, CalibrationConfig::default())?;
//! let atm = calibrator.fit_atm(&basket, &curve, 0.03)?;
//! let total = calibrator.fit_inverse(&swaption, &curve, 0.03, target)?;
//! ```

#![warn(missing_docs)]

pub mod basket;
pub mod calibration;

mod error;

pub use error::CalibrationError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::basket::{BasketBuilder, BasketEntry};
    pub use crate::calibration::*;
    pub use crate::CalibrationError;
}
