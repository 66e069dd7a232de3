//! Time-indexed curve interface.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Discount factors by year fraction from the curve's valuation date.
///
/// Implementors return `P(0) = 1` and `P(t) > 0`. The Hull-White bond
/// formulas and the lattice engine only need this view, not dates.
pub trait YieldCurve<T: Float> {
    /// `P(t)`; negative `t` is `MarketDataError::InvalidMaturity`.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Continuously compounded zero rate to `t > 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(invalid(t));
        }
        Ok(-self.discount_factor(t)?.ln() / t)
    }

    /// Continuously compounded forward rate over `[start, end]`, `end > start`.
    fn forward_rate(&self, start: T, end: T) -> Result<T, MarketDataError> {
        let span = end - start;
        if span <= T::zero() {
            return Err(invalid(span));
        }
        let growth = self.discount_factor(start)? / self.discount_factor(end)?;
        Ok(growth.ln() / span)
    }
}

fn invalid<T: Float>(t: T) -> MarketDataError {
    MarketDataError::InvalidMaturity {
        t: t.to_f64().unwrap_or(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Flat(f64);

    impl YieldCurve<f64> for Flat {
        fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
            if t < 0.0 {
                return Err(MarketDataError::InvalidMaturity { t });
            }
            Ok((-self.0 * t).exp())
        }
    }

    #[test]
    fn test_zero_rate() {
        assert_relative_eq!(Flat(0.031).zero_rate(4.0).unwrap(), 0.031, epsilon = 1e-14);
        assert!(matches!(
            Flat(0.031).zero_rate(0.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
        assert!(Flat(0.031).zero_rate(-1.0).is_err());
    }

    #[test]
    fn test_forward_rate() {
        assert_relative_eq!(Flat(0.027).forward_rate(5.0, 5.5).unwrap(), 0.027, epsilon = 1e-12);
        assert!(Flat(0.027).forward_rate(2.0, 2.0).is_err());
        assert!(Flat(0.027).forward_rate(3.0, 1.0).is_err());
    }
}
