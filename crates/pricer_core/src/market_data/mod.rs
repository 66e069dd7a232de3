//! Market data structures: discount curves and volatility surfaces.
//!
//! # Components
//!
//! - [`curves`]: [`DiscountCurve`] built from validated [`CurveNode`]s
//! - [`surfaces`]: [`AtmNormalVolSurface`] for swaption ATM vols
//! - [`error`]: [`MarketDataError`]
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{AtmNormalVolSurface, CurveNode, DiscountCurve};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let val = Date::from_ymd(2025, 1, 15).unwrap();
//! let curve = DiscountCurve::new(
//!     val,
//!     &[CurveNode::new(Date::from_ymd(2035, 1, 15).unwrap(), 0.74)],
//!     DayCountConvention::Actual365Fixed,
//! )
//! .unwrap();
//! assert!(curve.discount(Date::from_ymd(2030, 1, 15).unwrap()).unwrap() < 1.0);
//!
//! let vols = AtmNormalVolSurface::flat(0.0050).unwrap();
//! assert_eq!(vols.volatility(5.0, 5.0), 0.0050);
//! ```

pub mod curves;
pub mod error;
pub mod surfaces;

pub use curves::{CurveNode, DiscountCurve, YieldCurve};
pub use error::MarketDataError;
pub use surfaces::AtmNormalVolSurface;
