//! Headline figures of a pricing run.

use pricer_core::types::Date;
use pricer_models::instruments::rates::SwapDirection;
use pricer_optimiser::calibration::CalibrationResult;

use crate::greeks::GreekSet;
use crate::ModelState;

/// Everything a report or export needs from one run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Valuation date of the curve.
    pub valuation_date: Date,
    /// Underlying notional.
    pub notional: f64,
    /// Fixed rate of the underlying, decimal.
    pub strike: f64,
    /// Receiver or payer.
    pub direction: SwapDirection,
    /// Par rate of the full underlying.
    pub fair_rate: f64,
    /// `(K − F)·1e4`.
    pub moneyness_bp: f64,
    /// Bermudan value at `sigma_total`.
    pub npv: f64,
    /// NPV expressed in running basis points of the fixed leg.
    pub yield_value_bp: f64,
    /// NPV as a percentage of notional.
    pub premium_pct: f64,
    /// Value of the underlying swap.
    pub underlying_npv: f64,
    /// Underlying value as a percentage of notional.
    pub underlying_premium_pct: f64,
    /// Number of exercise dates.
    pub exercise_dates: usize,
    /// Calibrated Hull-White state.
    pub model: ModelState,
    /// Bermudan value at `sigma_atm`.
    pub atm_npv: f64,
    /// First-stage fit to the basket.
    pub atm_calibration: CalibrationResult,
    /// Second-stage fit to the target, when a target was set.
    pub inverse_calibration: Option<CalibrationResult>,
    /// Sensitivities, when requested.
    pub greeks: Option<GreekSet>,
    /// Value the inverse fit reproduces.
    pub target_npv: Option<f64>,
    /// `(npv − target)/|target|·100`.
    pub target_diff_pct: Option<f64>,
}

/// Percentage gap between a model value and a reference.
///
/// `None` for a zero reference.
pub fn percent_diff(value: f64, reference: f64) -> Option<f64> {
    if reference.abs() < f64::EPSILON {
        None
    } else {
        Some((value - reference) / reference.abs() * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percent_diff() {
        assert_relative_eq!(percent_diff(110.0, 100.0).unwrap(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(percent_diff(-90.0, -100.0).unwrap(), 10.0, epsilon = 1e-12);
        assert!(percent_diff(1.0, 0.0).is_none());
    }
}
