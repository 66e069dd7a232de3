//! # Pricer Pricing (Layer 3: Engines)
//!
//! Swaption engines under the Hull-White one-factor model.
//!
//! - [`SwaptionEngine`]: the valuation oracle used by calibration and risk
//! - [`fd::FdHullWhiteSwaptionEngine`]: Crank-Nicolson finite differences
//!   for European and Bermudan exercise
//! - [`analytical::IntegralHullWhiteSwaptionEngine`]: single-exercise
//!   quadrature, used to validate the grid engine
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::{CurveNode, DiscountCurve};
//! use pricer_core::types::{Date, DayCountConvention};
//! use pricer_models::instruments::rates::{OisSwap, SwapDirection, Swaption};
//! use pricer_models::instruments::Exercise;
//! use pricer_models::models::HullWhiteParams;
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_pricing::fd::{FdConfig, FdHullWhiteSwaptionEngine};
//! use pricer_pricing::SwaptionEngine;
//!
//! let val = Date::from_ymd(2025, 3, 17).unwrap();
//! let dc = DayCountConvention::Actual365Fixed;
//! let nodes: Vec<CurveNode> = (1..=12)
//!     .map(|y| {
//!         let date = val.add_months(12 * y).unwrap();
//!         CurveNode::new(date, (-0.03 * dc.year_fraction(val, date)).exp())
//!     })
//!     .collect();
//! let curve = DiscountCurve::new(val, &nodes, dc).unwrap();
//!
//! let schedule = ScheduleBuilder::new()
//!     .start(Date::from_ymd(2027, 3, 17).unwrap())
//!     .end(Date::from_ymd(2032, 3, 17).unwrap())
//!     .frequency(Frequency::SemiAnnual)
//!     .build()
//!     .unwrap();
//! let exercise = Exercise::from_schedule(&schedule, schedule.start_date()).unwrap();
//! let swap = OisSwap::new(1e7, 0.03, SwapDirection::Receiver, schedule, 2).unwrap();
//! let swaption = Swaption::new(swap, exercise);
//!
//! let engine = FdHullWhiteSwaptionEngine::new(FdConfig::default()).unwrap();
//! let params = HullWhiteParams::new(0.03, 0.006).unwrap();
//! let npv = engine.price(&swaption, &curve, &params).unwrap();
//! assert!(npv > 0.0);
//! ```

#![warn(missing_docs)]

pub mod analytical;
mod cashflows;
mod engine;
mod error;
pub mod fd;

pub use engine::SwaptionEngine;
pub use error::EngineError;
