//! Bachelier (normal) pricing model for European swaptions.
//!
//! ## Mathematical Formulas
//!
//! **Payer (call on the rate)**: `A·[(F - K)·N(d) + σ√T·φ(d)]`
//! **Receiver (put on the rate)**: `A·[(K - F)·N(-d) + σ√T·φ(d)]`
//!
//! Where:
//! - `d = (F - K) / (σ√T)`
//! - `A` is the annuity of the underlying swap
//! - N(·) and φ(·) are the standard normal CDF and PDF
//!
//! With no volatility or no time left (`σ ≤ 0` or `T ≤ 0`) the price is
//! the intrinsic value.

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Bachelier (normal) model for a forward swap rate.
///
/// # Examples
/// ```
/// use pricer_models::analytical::Bachelier;
///
/// let model = Bachelier::new(0.031, 0.0050).unwrap();
/// let payer = model.payer_swaption(0.030, 5.0, 4.2e4);
/// let receiver = model.receiver_swaption(0.030, 5.0, 4.2e4);
///
/// // Put-call parity on the annuity: R - P = A·(K - F)
/// assert!((receiver - payer - 4.2e4 * (0.030 - 0.031)).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bachelier {
    forward: f64,
    volatility: f64,
}

impl Bachelier {
    /// Creates a new Bachelier model.
    ///
    /// Negative forwards and non-positive volatilities are accepted; the
    /// latter price at intrinsic value.
    ///
    /// # Errors
    /// - `AnalyticalError::NonFiniteInput` if either input is NaN or infinite
    pub fn new(forward: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if !forward.is_finite() {
            return Err(AnalyticalError::NonFiniteInput {
                name: "forward",
                value: forward,
            });
        }
        if !volatility.is_finite() {
            return Err(AnalyticalError::NonFiniteInput {
                name: "volatility",
                value: volatility,
            });
        }
        Ok(Self {
            forward,
            volatility,
        })
    }

    /// Forward rate (F).
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Normal volatility (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Undiscounted call on the rate, `(F - K)·N(d) + σ√T·φ(d)`.
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        if self.volatility <= 0.0 || expiry <= 0.0 {
            return (self.forward - strike).max(0.0);
        }
        let std_dev = self.volatility * expiry.sqrt();
        let d = (self.forward - strike) / std_dev;
        (self.forward - strike) * norm_cdf(d) + std_dev * norm_pdf(d)
    }

    /// Undiscounted put on the rate, `(K - F)·N(-d) + σ√T·φ(d)`.
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        if self.volatility <= 0.0 || expiry <= 0.0 {
            return (strike - self.forward).max(0.0);
        }
        let std_dev = self.volatility * expiry.sqrt();
        let d = (self.forward - strike) / std_dev;
        (strike - self.forward) * norm_cdf(-d) + std_dev * norm_pdf(d)
    }

    /// Payer swaption premium: the right to pay fixed at `strike`.
    #[inline]
    pub fn payer_swaption(&self, strike: f64, expiry: f64, annuity: f64) -> f64 {
        annuity * self.price_call(strike, expiry)
    }

    /// Receiver swaption premium: the right to receive fixed at `strike`.
    #[inline]
    pub fn receiver_swaption(&self, strike: f64, expiry: f64, annuity: f64) -> f64 {
        annuity * self.price_put(strike, expiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_atm_closed_form() {
        // ATM: price = σ√T / √(2π)
        let model = Bachelier::new(0.03, 0.0050).unwrap();
        let expected = 0.0050 * 5.0_f64.sqrt() * 0.398_942_280_401_432_7;
        assert_relative_eq!(model.price_call(0.03, 5.0), expected, epsilon = 1e-16);
        assert_relative_eq!(model.price_put(0.03, 5.0), expected, epsilon = 1e-16);
    }

    #[test]
    fn test_zero_vol_is_intrinsic() {
        let model = Bachelier::new(0.032, 0.0).unwrap();
        assert_relative_eq!(model.receiver_swaption(0.035, 2.0, 1e4), 30.0, epsilon = 1e-10);
        assert_eq!(model.payer_swaption(0.035, 2.0, 1e4), 0.0);

        let negative = Bachelier::new(0.032, -0.001).unwrap();
        assert_relative_eq!(negative.payer_swaption(0.030, 2.0, 1e4), 20.0, epsilon = 1e-10);
    }

    #[test]
    fn test_expired_is_intrinsic() {
        let model = Bachelier::new(0.032, 0.0060).unwrap();
        assert_relative_eq!(model.price_put(0.035, 0.0), 0.003, epsilon = 1e-15);
        assert_relative_eq!(model.price_call(0.030, -1.0), 0.002, epsilon = 1e-15);
    }

    #[test]
    fn test_small_vol_converges_to_intrinsic() {
        let model = Bachelier::new(0.032, 1e-9).unwrap();
        assert_relative_eq!(model.price_put(0.035, 3.0), 0.003, epsilon = 1e-12);
        assert!(model.price_call(0.035, 3.0) < 1e-15);
    }

    #[test]
    fn test_negative_forward() {
        let model = Bachelier::new(-0.005, 0.0080).unwrap();
        assert!(model.price_call(0.0, 1.0) > 0.0);
        assert!(model.price_put(0.0, 1.0) > 0.005);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            Bachelier::new(f64::NAN, 0.01),
            Err(AnalyticalError::NonFiniteInput { name: "forward", .. })
        ));
        assert!(matches!(
            Bachelier::new(0.01, f64::INFINITY),
            Err(AnalyticalError::NonFiniteInput { name: "volatility", .. })
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_prices_non_negative(
                forward in -0.02f64..0.08,
                strike in -0.02f64..0.08,
                vol in 0.0f64..0.03,
                expiry in 0.0f64..30.0,
            ) {
                let model = Bachelier::new(forward, vol).unwrap();
                prop_assert!(model.price_call(strike, expiry) >= 0.0);
                prop_assert!(model.price_put(strike, expiry) >= 0.0);
            }

            #[test]
            fn test_non_decreasing_in_vol(
                forward in 0.0f64..0.06,
                strike in 0.0f64..0.06,
                vol in 0.0001f64..0.02,
                bump in 0.0f64..0.01,
                expiry in 0.1f64..20.0,
            ) {
                let lo = Bachelier::new(forward, vol).unwrap();
                let hi = Bachelier::new(forward, vol + bump).unwrap();
                prop_assert!(hi.receiver_swaption(strike, expiry, 1e4) >= lo.receiver_swaption(strike, expiry, 1e4) - 1e-12);
                prop_assert!(hi.payer_swaption(strike, expiry, 1e4) >= lo.payer_swaption(strike, expiry, 1e4) - 1e-12);
            }

            #[test]
            fn test_receiver_payer_parity(
                forward in -0.01f64..0.07,
                strike in -0.01f64..0.07,
                vol in 0.0f64..0.02,
                expiry in 0.0f64..25.0,
                annuity in 1.0f64..1e6,
            ) {
                let model = Bachelier::new(forward, vol).unwrap();
                let parity = model.receiver_swaption(strike, expiry, annuity)
                    - model.payer_swaption(strike, expiry, annuity);
                let expected = annuity * (strike - forward);
                prop_assert!((parity - expected).abs() <= 1e-9 * annuity.max(1.0));
            }
        }
    }
}
