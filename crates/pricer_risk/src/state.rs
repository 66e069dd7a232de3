//! Calibrated Hull-White state.

use pricer_models::models::{HullWhiteParams, ModelError};

/// Outcome of the two-stage calibration.
///
/// `sigma_total = sigma_atm + delta_sigma`; without a target value
/// `delta_sigma` is zero.
///
/// # Examples
/// ```
/// use pricer_risk::ModelState;
///
/// let state = ModelState::new(0.03, 0.0058, 0.0061, false);
/// assert!((state.delta_sigma - 0.0003).abs() < 1e-15);
/// assert_eq!(state.params().unwrap().volatility(), 0.0061);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelState {
    /// Mean reversion `a`.
    pub mean_reversion: f64,
    /// Volatility fitted to the ATM basket.
    pub sigma_atm: f64,
    /// Adjustment reconciling the model to the target value.
    pub delta_sigma: f64,
    /// Volatility used for the instrument, `sigma_atm + delta_sigma`.
    pub sigma_total: f64,
    /// True when `a` came out of the joint fit.
    pub mean_reversion_calibrated: bool,
}

impl ModelState {
    /// State from the two fitted volatilities.
    pub fn new(
        mean_reversion: f64,
        sigma_atm: f64,
        sigma_total: f64,
        mean_reversion_calibrated: bool,
    ) -> Self {
        Self {
            mean_reversion,
            sigma_atm,
            delta_sigma: sigma_total - sigma_atm,
            sigma_total,
            mean_reversion_calibrated,
        }
    }

    /// Parameters the instrument is priced with.
    pub fn params(&self) -> Result<HullWhiteParams, ModelError> {
        HullWhiteParams::new(self.mean_reversion, self.sigma_total)
    }

    /// Parameters fitted to the basket alone.
    pub fn atm_params(&self) -> Result<HullWhiteParams, ModelError> {
        HullWhiteParams::new(self.mean_reversion, self.sigma_atm)
    }
}
