//! Calibration basket: European sub-options priced off the ATM surface.
//!
//! For each exercise date strictly after the valuation date the builder
//! cuts the underlying down to the periods from that date to maturity,
//! reads its forward and annuity off the curve, and prices a European
//! option on it with Bachelier at the interpolated normal volatility:
//!
//! - Receiver: `A·[(K − F)·Φ(−d) + σ√T·φ(d)]`
//! - Payer: `A·[(F − K)·Φ(d) + σ√T·φ(d)]`
//!
//! with `d = (F − K)/(σ√T)`. Entries are rebuilt from scratch for every
//! surface, so a bumped surface simply means a new basket.
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{AtmNormalVolSurface, CurveNode, DiscountCurve};
//! use pricer_core::types::{Date, DayCountConvention};
//! use pricer_models::instruments::rates::{OisSwap, SwapDirection, Swaption};
//! use pricer_models::instruments::Exercise;
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_optimiser::basket::BasketBuilder;
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
//! let surface = AtmNormalVolSurface::flat(0.0050).unwrap();
//!
//! let schedule = ScheduleBuilder::new()
//!     .start(Date::from_ymd(2030, 3, 19).unwrap())
//!     .end(Date::from_ymd(2035, 3, 19).unwrap())
//!     .frequency(Frequency::SemiAnnual)
//!     .build()
//!     .unwrap();
//! let exercise = Exercise::from_schedule(&schedule, schedule.start_date()).unwrap();
//! let swap = OisSwap::new(1e7, 0.03, SwapDirection::Receiver, schedule, 2).unwrap();
//! let swaption = Swaption::new(swap, exercise);
//!
//! let basket = BasketBuilder::new(&curve, &surface).build(&swaption).unwrap();
//! assert_eq!(basket.len(), 10);
//! assert!(basket.iter().all(|e| e.market_price > 0.0));
//! ```

use pricer_core::market_data::{AtmNormalVolSurface, DiscountCurve};
use pricer_core::types::Date;
use pricer_models::analytical::Bachelier;
use pricer_models::instruments::rates::pricing::{annuity, par_swap_rate, BASIS_POINT};
use pricer_models::instruments::rates::{OisSwap, SwapDirection, Swaption};
use pricer_models::instruments::Exercise;
use pricer_models::schedules::{Schedule, ScheduleBuilder};
use tracing::debug;

use crate::CalibrationError;

/// One calibration instrument.
#[derive(Debug, Clone)]
pub struct BasketEntry {
    /// Exercise date of the sub-option.
    pub exercise_date: Date,
    /// Year fraction from valuation to exercise.
    pub expiry: f64,
    /// Year fraction from exercise to swap maturity.
    pub tenor: f64,
    /// Par rate of the sub-swap.
    pub forward: f64,
    /// Fixed leg PV per unit rate, notional included.
    pub annuity: f64,
    /// Normal volatility used, bump included.
    pub volatility: f64,
    /// Bachelier price at `volatility`.
    pub market_price: f64,
    /// European option on the sub-swap, handed to the oracle.
    pub swaption: Swaption,
}

/// Builds a calibration basket for a swaption on a given curve and surface.
#[derive(Debug, Clone, Copy)]
pub struct BasketBuilder<'a> {
    curve: &'a DiscountCurve,
    surface: &'a AtmNormalVolSurface,
    vol_shift_bp: f64,
}

impl<'a> BasketBuilder<'a> {
    /// Builder on an unshifted surface.
    pub fn new(curve: &'a DiscountCurve, surface: &'a AtmNormalVolSurface) -> Self {
        Self {
            curve,
            surface,
            vol_shift_bp: 0.0,
        }
    }

    /// Uniform add-on to every interpolated volatility, in basis points.
    pub fn vol_shift_bp(mut self, shift_bp: f64) -> Self {
        self.vol_shift_bp = shift_bp;
        self
    }

    /// One entry per exercise date strictly after the valuation date.
    ///
    /// # Errors
    /// - `CalibrationError::ExerciseAfterMaturity` if an exercise date is on
    ///   or after the swap's final date
    /// - `CalibrationError::EmptyBasket` if no exercise date is live
    /// - curve, schedule and instrument errors from building a sub-swap
    pub fn build(&self, swaption: &Swaption) -> Result<Vec<BasketEntry>, CalibrationError> {
        let swap = swaption.underlying();
        let val = self.curve.valuation_date();
        let mut entries = Vec::with_capacity(swaption.exercise().len());

        for &exercise in swaption.exercise().dates() {
            if exercise <= val {
                debug!(%exercise, "skipping exercise date on or before valuation");
                continue;
            }
            entries.push(self.entry(swap, exercise)?);
        }

        if entries.is_empty() {
            return Err(CalibrationError::EmptyBasket);
        }
        debug!(entries = entries.len(), shift_bp = self.vol_shift_bp, "basket built");
        Ok(entries)
    }

    fn entry(&self, swap: &OisSwap, exercise: Date) -> Result<BasketEntry, CalibrationError> {
        let maturity = swap.maturity_date();
        if exercise >= maturity {
            return Err(CalibrationError::ExerciseAfterMaturity { exercise, maturity });
        }

        let sub_swap = swap.with_schedule(sub_schedule(swap.schedule(), exercise)?)?;
        let forward = par_swap_rate(&sub_swap, self.curve)?;
        let annuity = annuity(&sub_swap, self.curve)?;

        let day_count = swap.schedule().day_count();
        let expiry = day_count.year_fraction(self.curve.valuation_date(), exercise);
        let tenor = day_count.year_fraction(exercise, maturity);
        let volatility = self.surface.volatility(expiry, tenor) + self.vol_shift_bp * BASIS_POINT;

        let model = Bachelier::new(forward, volatility)?;
        let strike = swap.fixed_rate();
        let market_price = match swap.direction() {
            SwapDirection::Receiver => model.receiver_swaption(strike, expiry, annuity),
            SwapDirection::Payer => model.payer_swaption(strike, expiry, annuity),
        };

        Ok(BasketEntry {
            exercise_date: exercise,
            expiry,
            tenor,
            forward,
            annuity,
            volatility,
            market_price,
            swaption: Swaption::new(sub_swap, Exercise::European(exercise)),
        })
    }
}

/// Accrual dates from `exercise` to the end of `schedule`.
///
/// Reuses the trailing dates when `exercise` is an accrual date, otherwise
/// regenerates them under the same conventions.
fn sub_schedule(schedule: &Schedule, exercise: Date) -> Result<Schedule, CalibrationError> {
    if let Some(tail) = schedule.trailing_from(exercise) {
        return Ok(tail);
    }
    Ok(ScheduleBuilder::new()
        .start(exercise)
        .end(schedule.end_date())
        .frequency(schedule.frequency())
        .day_count(schedule.day_count())
        .calendar(schedule.calendar())
        .convention(schedule.convention())
        .build()?)
}
