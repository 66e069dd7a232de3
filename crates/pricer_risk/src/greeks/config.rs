//! Bump sizes and switches for the Greek run.

use crate::GreeksError;

/// Configuration for bump-and-reprice Greeks.
///
/// All bumps are in basis points. The curve bump drives DV01 and the
/// underlying DV01; Gamma reuses those repricings when its bump is the
/// same size.
///
/// # Examples
/// ```
/// use pricer_risk::greeks::GreeksConfig;
///
/// let config = GreeksConfig::default().with_vol_bump_bp(0.5).with_theta(false);
/// assert_eq!(config.curve_bump_bp, 1.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GreeksConfig {
    /// Parallel curve shift for DV01 and underlying DV01.
    pub curve_bump_bp: f64,
    /// Parallel curve shift for Gamma.
    pub gamma_bump_bp: f64,
    /// Uniform vol surface add-on for Vega.
    pub vol_bump_bp: f64,
    /// Compute the one-day Theta; reported as zero when off.
    pub compute_theta: bool,
}

impl Default for GreeksConfig {
    fn default() -> Self {
        Self {
            curve_bump_bp: 1.0,
            gamma_bump_bp: 1.0,
            vol_bump_bp: 1.0,
            compute_theta: true,
        }
    }
}

impl GreeksConfig {
    /// Sets the DV01 curve bump.
    pub fn with_curve_bump_bp(mut self, bump: f64) -> Self {
        self.curve_bump_bp = bump;
        self
    }

    /// Sets the Gamma curve bump.
    pub fn with_gamma_bump_bp(mut self, bump: f64) -> Self {
        self.gamma_bump_bp = bump;
        self
    }

    /// Sets the Vega surface bump.
    pub fn with_vol_bump_bp(mut self, bump: f64) -> Self {
        self.vol_bump_bp = bump;
        self
    }

    /// Switches Theta on or off.
    pub fn with_theta(mut self, on: bool) -> Self {
        self.compute_theta = on;
        self
    }

    /// Checks every bump is positive and finite.
    ///
    /// # Errors
    /// `GreeksError::InvalidBump` naming the first bad bump.
    pub fn validate(&self) -> Result<(), GreeksError> {
        for (name, value) in [
            ("curve_bump_bp", self.curve_bump_bp),
            ("gamma_bump_bp", self.gamma_bump_bp),
            ("vol_bump_bp", self.vol_bump_bp),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GreeksError::InvalidBump { name, value });
            }
        }
        Ok(())
    }
}
