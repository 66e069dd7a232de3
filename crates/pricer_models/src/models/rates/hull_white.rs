//! Hull-White one-factor short rate model.
//!
//! ```text
//! dr(t) = [θ(t) − a·r(t)]·dt + σ·dW(t)
//! ```
//!
//! Written as `r(t) = x(t) + φ(t)` with the Ornstein-Uhlenbeck factor
//! `dx = −a·x·dt + σ·dW`, `x(0) = 0`, and the deterministic shift
//!
//! ```text
//! φ(t) = f(0, t) + σ²/(2a²)·(1 − e^{−at})²
//! ```
//!
//! which fits the initial discount curve exactly. Zero-coupon bonds are
//! affine in `x`:
//!
//! ```text
//! P(t, T | x) = P(0, T)/P(0, t) · exp(−B·x − ½·B²·V(t) − B·C(t))
//! B(t, T)     = (1 − e^{−a(T − t)}) / a
//! V(t)        = σ²/(2a)·(1 − e^{−2at})
//! C(t)        = σ²/(2a²)·(1 − e^{−at})²
//! ```
//!
//! Under the `t`-forward measure `x(t)` is normal with mean `−C(t)` and
//! variance `V(t)`.

use pricer_core::market_data::curves::YieldCurve;
use pricer_core::market_data::MarketDataError;

use crate::models::error::ModelError;

/// Hull-White parameters `(a, σ)`, both constant.
///
/// # Example
///
/// ```
/// use pricer_models::models::rates::HullWhiteParams;
///
/// let params = HullWhiteParams::new(0.03, 0.01).unwrap();
/// assert!((params.b(0.0, 1.0) - (1.0 - (-0.03f64).exp()) / 0.03).abs() < 1e-15);
///
/// // Invalid: negative mean reversion
/// assert!(HullWhiteParams::new(-0.05, 0.01).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HullWhiteParams {
    mean_reversion: f64,
    volatility: f64,
}

impl HullWhiteParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    /// - `ModelError::InvalidParameter` unless both values are finite and
    ///   strictly positive
    pub fn new(mean_reversion: f64, volatility: f64) -> Result<Self, ModelError> {
        if !(mean_reversion.is_finite() && mean_reversion > 0.0) {
            return Err(ModelError::InvalidParameter {
                name: "mean_reversion",
                value: mean_reversion,
            });
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(ModelError::InvalidParameter {
                name: "volatility",
                value: volatility,
            });
        }
        Ok(Self {
            mean_reversion,
            volatility,
        })
    }

    /// Same mean reversion, different volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, ModelError> {
        Self::new(self.mean_reversion, volatility)
    }

    /// Mean reversion speed `a`.
    #[inline]
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Short rate volatility `σ`.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// `B(t, T) = (1 − e^{−a(T − t)}) / a`.
    #[inline]
    pub fn b(&self, t: f64, maturity: f64) -> f64 {
        let a = self.mean_reversion;
        -(-a * (maturity - t)).exp_m1() / a
    }

    /// Variance of the factor, `V(t) = σ²/(2a)·(1 − e^{−2at})`.
    #[inline]
    pub fn factor_variance(&self, t: f64) -> f64 {
        let a = self.mean_reversion;
        let s = self.volatility;
        -s * s / (2.0 * a) * (-2.0 * a * t).exp_m1()
    }

    /// Convexity part of `φ`, `C(t) = σ²/(2a²)·(1 − e^{−at})²`.
    #[inline]
    pub fn phi_convexity(&self, t: f64) -> f64 {
        let a = self.mean_reversion;
        let s = self.volatility;
        let g = -(-a * t).exp_m1();
        s * s / (2.0 * a * a) * g * g
    }

    /// `∫_{t1}^{t2} σ²/(2a²)·(1 − e^{−as})² ds` in closed form.
    pub fn phi_convexity_integral(&self, t1: f64, t2: f64) -> f64 {
        let a = self.mean_reversion;
        let s = self.volatility;
        let e1 = (-a * t1).exp();
        let e2 = (-a * t2).exp();
        let integral = (t2 - t1) + 2.0 / a * (e2 - e1) - 0.5 / a * (e2 * e2 - e1 * e1);
        s * s / (2.0 * a * a) * integral
    }

    /// Mean of `x(t)` under the `t`-forward measure, `−C(t)`.
    #[inline]
    pub fn forward_measure_mean(&self, t: f64) -> f64 {
        -self.phi_convexity(t)
    }

    /// Price at `t` of the zero-coupon bond maturing at `maturity`, given
    /// the factor value `x`.
    ///
    /// # Errors
    /// Curve lookup failures for `t` or `maturity`.
    pub fn zero_bond<C: YieldCurve<f64>>(
        &self,
        curve: &C,
        t: f64,
        maturity: f64,
        x: f64,
    ) -> Result<f64, MarketDataError> {
        let p_t = curve.discount_factor(t)?;
        let p_maturity = curve.discount_factor(maturity)?;
        Ok(self.zero_bond_from_discounts(p_t, p_maturity, t, maturity, x))
    }

    /// [`Self::zero_bond`] with `P(0, t)` and `P(0, T)` already known.
    #[inline]
    pub fn zero_bond_from_discounts(
        &self,
        p_t: f64,
        p_maturity: f64,
        t: f64,
        maturity: f64,
        x: f64,
    ) -> f64 {
        let b = self.b(t, maturity);
        let exponent = -b * x - 0.5 * b * b * self.factor_variance(t) - b * self.phi_convexity(t);
        p_maturity / p_t * exponent.exp()
    }
}
