//! Calibration settings.

use crate::CalibrationError;

/// Settings shared by the three calibration procedures.
///
/// Defaults reproduce the production run:
/// - ATM fit: seed `σ = 0.005`, 500 iterations, tolerances `1e-8`
/// - joint fit: seed `a = 0.03`, `a ∈ [0.001, 0.50]`, 1500 iterations
/// - inverse fit: Brent on `ln σ ∈ [ln 0.001, ln 0.05]` to `1e-12`, falling
///   back to a 300-iteration simplex seeded at `σ = 0.007`
///
/// # Examples
/// ```
/// use pricer_optimiser::calibration::CalibrationConfig;
///
/// let config = CalibrationConfig::default()
///     .with_sigma_seed(0.006)
///     .with_mean_reversion_bounds(0.005, 0.2);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.mean_reversion_bounds, (0.005, 0.2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalibrationConfig {
    /// Volatility seed of the ATM and joint fits.
    pub sigma_seed: f64,
    /// Mean reversion seed of the joint fit.
    pub mean_reversion_seed: f64,
    /// Open interval the joint fit keeps `a` inside.
    pub mean_reversion_bounds: (f64, f64),
    /// Iteration cap of the ATM fit.
    pub atm_max_iterations: usize,
    /// Iteration cap of the joint fit.
    pub joint_max_iterations: usize,
    /// Simplex tolerance on both parameters and objective (ATM and joint).
    pub tolerance: f64,
    /// Volatility bracket of the inverse fit.
    pub inverse_bracket: (f64, f64),
    /// Root tolerance in `ln σ` of the inverse fit.
    pub inverse_tolerance: f64,
    /// Iteration cap of the bracketing search.
    pub inverse_max_iterations: usize,
    /// Volatility seed of the inverse fallback simplex.
    pub fallback_sigma_seed: f64,
    /// Iteration cap of the inverse fallback simplex.
    pub fallback_max_iterations: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            sigma_seed: 0.005,
            mean_reversion_seed: 0.03,
            mean_reversion_bounds: (0.001, 0.50),
            atm_max_iterations: 500,
            joint_max_iterations: 1500,
            tolerance: 1e-8,
            inverse_bracket: (0.001, 0.05),
            inverse_tolerance: 1e-12,
            inverse_max_iterations: 100,
            fallback_sigma_seed: 0.007,
            fallback_max_iterations: 300,
        }
    }
}

impl CalibrationConfig {
    /// Sets the ATM and joint volatility seed.
    pub fn with_sigma_seed(mut self, sigma: f64) -> Self {
        self.sigma_seed = sigma;
        self
    }

    /// Sets the joint mean reversion seed.
    pub fn with_mean_reversion_seed(mut self, a: f64) -> Self {
        self.mean_reversion_seed = a;
        self
    }

    /// Sets the joint mean reversion bounds.
    pub fn with_mean_reversion_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.mean_reversion_bounds = (lower, upper);
        self
    }

    /// Sets the simplex tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the inverse fit volatility bracket.
    pub fn with_inverse_bracket(mut self, lower: f64, upper: f64) -> Self {
        self.inverse_bracket = (lower, upper);
        self
    }

    /// Checks that seeds, bounds and tolerances are usable.
    ///
    /// # Errors
    /// `CalibrationError::InvalidConfig` naming the first bad setting.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        let positive = [
            ("sigma_seed", self.sigma_seed),
            ("fallback_sigma_seed", self.fallback_sigma_seed),
            ("tolerance", self.tolerance),
            ("inverse_tolerance", self.inverse_tolerance),
            ("inverse_bracket.lower", self.inverse_bracket.0),
            ("mean_reversion_bounds.lower", self.mean_reversion_bounds.0),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalibrationError::InvalidConfig { name, value });
            }
        }

        let (a_lo, a_hi) = self.mean_reversion_bounds;
        if !(a_hi.is_finite() && a_hi > a_lo) {
            return Err(CalibrationError::InvalidConfig {
                name: "mean_reversion_bounds.upper",
                value: a_hi,
            });
        }
        if !(self.mean_reversion_seed.is_finite() && self.mean_reversion_seed > 0.0) {
            return Err(CalibrationError::InvalidConfig {
                name: "mean_reversion_seed",
                value: self.mean_reversion_seed,
            });
        }
        let (s_lo, s_hi) = self.inverse_bracket;
        if !(s_hi.is_finite() && s_hi > s_lo) {
            return Err(CalibrationError::InvalidConfig {
                name: "inverse_bracket.upper",
                value: s_hi,
            });
        }

        let iterations = [
            ("atm_max_iterations", self.atm_max_iterations),
            ("joint_max_iterations", self.joint_max_iterations),
            ("inverse_max_iterations", self.inverse_max_iterations),
            ("fallback_max_iterations", self.fallback_max_iterations),
        ];
        for (name, value) in iterations {
            if value == 0 {
                return Err(CalibrationError::InvalidConfig { name, value: 0.0 });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let config = CalibrationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.atm_max_iterations, 500);
        assert_eq!(config.joint_max_iterations, 1500);
        assert_eq!(config.fallback_max_iterations, 300);
    }

    #[test]
    fn test_rejects_bad_settings() {
        let cases = [
            (CalibrationConfig::default().with_sigma_seed(0.0), "sigma_seed"),
            (
                CalibrationConfig::default().with_mean_reversion_bounds(0.1, 0.1),
                "mean_reversion_bounds.upper",
            ),
            (
                CalibrationConfig::default().with_mean_reversion_bounds(-0.1, 0.5),
                "mean_reversion_bounds.lower",
            ),
            (
                CalibrationConfig::default().with_inverse_bracket(0.05, 0.001),
                "inverse_bracket.upper",
            ),
            (CalibrationConfig::default().with_tolerance(f64::NAN), "tolerance"),
        ];
        for (config, expected) in cases {
            match config.validate() {
                Err(CalibrationError::InvalidConfig { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected InvalidConfig({expected}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = CalibrationConfig {
            atm_max_iterations: 0,
            ..CalibrationConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
