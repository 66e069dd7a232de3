//! Discount curve abstractions.
//!
//! - [`YieldCurve`]: time-based discount factor and rate queries
//! - [`DiscountCurve`]: dated, validated, log-linear discount curve
//! - [`CurveNode`]: a single `(date, discount factor)` input

mod discount;
mod traits;

pub use discount::{CurveNode, DiscountCurve};
pub use traits::YieldCurve;
