//! # Pricer Risk (L4: Application)
//!
//! Hybrid calibration and risk for Bermudan swaptions under Hull-White.
//!
//! This crate provides:
//! - [`BermudanPricer`]: basket build, ATM or joint calibration, inverse fit
//!   to a target value, final pricing
//! - [`greeks`]: DV01, Gamma, underlying DV01, hedge delta, Vega with
//!   recalibration, one-day Theta
//! - [`PricingResult`]: headline figures for reports and exports
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! │  pricer/  - BermudanPricer, results     │
//! │  greeks/  - bump-and-reprice Greeks     │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌───────────────────┐ ┌───────────────────┐
//! │ pricer_optimiser  │ │  pricer_pricing   │
//! │ basket, calibrate │ │  SwaptionEngine   │
//! └───────────────────┘ └───────────────────┘
//! ```
//!
//! Each pricer owns its curve, surface and model state; nothing is shared
//! between instances and every call is synchronous.

#![warn(missing_docs)]

mod error;
pub mod greeks;
mod pricer;
mod state;

#[cfg(test)]
mod test_support;

pub use error::{GreeksError, PricerError};
pub use greeks::{GreekEngine, GreekSet, GreeksConfig};
pub use pricer::{percent_diff, BermudanPricer, ModelConfig, PricerConfig, PricingResult};
pub use state::ModelState;
