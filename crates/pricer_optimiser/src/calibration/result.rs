//! Calibration result types.

use pricer_models::models::HullWhiteParams;
use std::fmt;

/// Procedure that produced a [`CalibrationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalibrationMethod {
    /// Volatility fit to the basket with mean reversion fixed.
    Atm,
    /// Mean reversion and volatility fit to the basket.
    Joint,
    /// Volatility root of the target value, bracketed.
    Inverse,
    /// Volatility fit to the target value by simplex, after the bracketed
    /// search failed.
    InverseFallback,
}

impl CalibrationMethod {
    /// Short label used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            CalibrationMethod::Atm => "ATM",
            CalibrationMethod::Joint => "Joint",
            CalibrationMethod::Inverse => "Inverse",
            CalibrationMethod::InverseFallback => "Inverse (fallback)",
        }
    }
}

impl fmt::Display for CalibrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one calibration procedure.
///
/// Non-convergence is not an error: `params` is the best point found and
/// `converged` says whether the solver's tolerances were met.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationResult {
    /// Fitted parameters.
    pub params: HullWhiteParams,
    /// Objective at `params`: weighted basket error, or squared target
    /// residual for the inverse fit.
    pub objective: f64,
    /// Simplex iterations, or oracle evaluations for the bracketed search.
    pub iterations: usize,
    /// True when the solver met its tolerances.
    pub converged: bool,
    /// Procedure used.
    pub method: CalibrationMethod,
}

impl CalibrationResult {
    /// Fitted mean reversion.
    #[inline]
    pub fn mean_reversion(&self) -> f64 {
        self.params.mean_reversion()
    }

    /// Fitted volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.params.volatility()
    }
}
