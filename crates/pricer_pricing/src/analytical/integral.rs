//! European swaption by quadrature over the Hull-White factor.
//!
//! ```text
//! V = P(0, tₑ) · E^{tₑ}[max(S(tₑ, x), 0)],   x ~ N(−C(tₑ), V(tₑ))
//! ```
//!
//! The expectation uses composite Simpson on `±std_devs` standard
//! deviations.

use pricer_core::market_data::DiscountCurve;
use pricer_models::analytical::distributions::norm_pdf;
use pricer_models::instruments::rates::Swaption;
use pricer_models::models::HullWhiteParams;

use crate::cashflows::ExerciseCashflows;
use crate::engine::SwaptionEngine;
use crate::error::EngineError;

/// Quadrature engine for single-exercise swaptions.
///
/// Rejects swaptions with more than one live exercise date.
#[derive(Debug, Clone, Copy)]
pub struct IntegralHullWhiteSwaptionEngine {
    intervals: usize,
    std_devs: f64,
}

impl Default for IntegralHullWhiteSwaptionEngine {
    fn default() -> Self {
        Self {
            intervals: 4000,
            std_devs: 8.0,
        }
    }
}

impl IntegralHullWhiteSwaptionEngine {
    /// Creates an engine with `intervals` Simpson intervals (rounded up to
    /// even) over `±std_devs`.
    pub fn new(intervals: usize, std_devs: f64) -> Result<Self, EngineError> {
        if intervals < 2 {
            return Err(EngineError::InvalidConfig {
                name: "intervals",
                reason: format!("{intervals} must be at least 2"),
            });
        }
        if !(std_devs.is_finite() && std_devs > 0.0) {
            return Err(EngineError::InvalidConfig {
                name: "std_devs",
                reason: format!("{std_devs} must be positive"),
            });
        }
        Ok(Self {
            intervals: intervals + intervals % 2,
            std_devs,
        })
    }
}

impl SwaptionEngine for IntegralHullWhiteSwaptionEngine {
    fn price(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        params: &HullWhiteParams,
    ) -> Result<f64, EngineError> {
        let Some(live) = swaption.live_after(curve.valuation_date()) else {
            return Ok(0.0);
        };
        let dates = live.exercise().dates();
        if dates.len() != 1 {
            return Err(EngineError::UnsupportedExercise { dates: dates.len() });
        }
        let flows = ExerciseCashflows::new(live.underlying(), dates[0], curve)?;
        if flows.is_empty() {
            return Ok(0.0);
        }

        let t = flows.time();
        let mean = params.forward_measure_mean(t);
        let sd = params.factor_variance(t).sqrt();
        if sd == 0.0 {
            return Ok(flows.discount() * flows.payoff(params, mean));
        }

        let n = self.intervals;
        let h = 2.0 * self.std_devs / n as f64;
        let mut sum = 0.0;
        for i in 0..=n {
            let z = -self.std_devs + i as f64 * h;
            let weight = if i == 0 || i == n {
                1.0
            } else if i % 2 == 1 {
                4.0
            } else {
                2.0
            };
            sum += weight * norm_pdf(z) * flows.payoff(params, mean + sd * z);
        }
        let price = flows.discount() * sum * h / 3.0;
        if !price.is_finite() {
            return Err(EngineError::NonFinite(price));
        }
        Ok(price)
    }
}
