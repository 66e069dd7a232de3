//! Single-curve discounting valuation of OIS swaps.
//!
//! - Fixed leg: `Σ N·K·τ·P(pay)`
//! - Floating leg: `Σ N·(P(s)/P(e) − 1)·P(pay)`
//!
//! Cashflows paid on or before the curve's valuation date are ignored. A
//! period whose accrual started before the valuation date is projected from
//! the valuation date, since past fixings are not tracked.
//!
//! # Example
//!
//! ```
//! use pricer_models::instruments::rates::pricing::{par_swap_rate, price_ois};
//! use pricer_models::instruments::rates::{OisSwap, SwapDirection};
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_core::market_data::curves::{CurveNode, DiscountCurve};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let val = Date::from_ymd(2025, 3, 17).unwrap();
//! let nodes: Vec<CurveNode> = (1..=12)
//!     .map(|y| {
//!         let date = val.add_months(12 * y).unwrap();
//!         let t = DayCountConvention::Actual365Fixed.year_fraction(val, date);
//!         CurveNode::new(date, (-0.03 * t).exp())
//!     })
//!     .collect();
//! let curve = DiscountCurve::new(val, &nodes, DayCountConvention::Actual365Fixed).unwrap();
//!
//! let schedule = ScheduleBuilder::new()
//!     .start(Date::from_ymd(2026, 3, 17).unwrap())
//!     .end(Date::from_ymd(2031, 3, 17).unwrap())
//!     .frequency(Frequency::Annual)
//!     .build()
//!     .unwrap();
//! let swap = OisSwap::new(1e6, 0.03, SwapDirection::Receiver, schedule, 0).unwrap();
//!
//! let fair = par_swap_rate(&swap, &curve).unwrap();
//! let at_par = swap.with_fixed_rate(fair).unwrap();
//! assert!(price_ois(&at_par, &curve).unwrap().abs() < 1e-6);
//! ```

use pricer_core::market_data::curves::DiscountCurve;
use pricer_core::types::Date;

use super::OisSwap;
use crate::instruments::error::InstrumentError;

/// One basis point in rate units.
pub const BASIS_POINT: f64 = 1e-4;

/// Net present value from the perspective of `swap.direction()`.
///
/// Receiver: fixed − floating. Payer: floating − fixed.
pub fn price_ois(swap: &OisSwap, curve: &DiscountCurve) -> Result<f64, InstrumentError> {
    let fixed = price_fixed_leg(swap, curve)?;
    let floating = price_floating_leg(swap, curve)?;
    Ok(swap.direction().fixed_multiplier() * (fixed - floating))
}

/// Unsigned present value of the fixed leg.
pub fn price_fixed_leg(swap: &OisSwap, curve: &DiscountCurve) -> Result<f64, InstrumentError> {
    Ok(swap.fixed_rate() * annuity(swap, curve)?)
}

/// Unsigned present value of the compounded overnight leg.
pub fn price_floating_leg(swap: &OisSwap, curve: &DiscountCurve) -> Result<f64, InstrumentError> {
    let val = curve.valuation_date();
    let mut pv = 0.0;
    for period in live_periods(swap, val) {
        let start = period.start().max(val);
        let growth = curve.discount(start)? / curve.discount(period.end())?;
        pv += swap.notional() * (growth - 1.0) * curve.discount(period.payment())?;
    }
    Ok(pv)
}

/// Fixed leg PV per unit of fixed rate, `N·Σ τ·P(pay)`.
pub fn annuity(swap: &OisSwap, curve: &DiscountCurve) -> Result<f64, InstrumentError> {
    let val = curve.valuation_date();
    let mut sum = 0.0;
    for period in live_periods(swap, val) {
        sum += period.year_fraction() * curve.discount(period.payment())?;
    }
    Ok(swap.notional() * sum)
}

/// Signed PV change of the fixed leg for a 1bp move in the fixed rate.
pub fn fixed_leg_bps(swap: &OisSwap, curve: &DiscountCurve) -> Result<f64, InstrumentError> {
    Ok(swap.direction().fixed_multiplier() * annuity(swap, curve)? * BASIS_POINT)
}

/// Fixed rate that sets the NPV to zero.
///
/// Zero when no fixed cashflow remains.
pub fn par_swap_rate(swap: &OisSwap, curve: &DiscountCurve) -> Result<f64, InstrumentError> {
    let annuity = annuity(swap, curve)?;
    if annuity.abs() < f64::EPSILON {
        return Ok(0.0);
    }
    Ok(price_floating_leg(swap, curve)? / annuity)
}

fn live_periods(
    swap: &OisSwap,
    valuation_date: Date,
) -> impl Iterator<Item = &crate::schedules::Period> {
    swap.periods()
        .iter()
        .filter(move |p| p.payment() > valuation_date)
}
