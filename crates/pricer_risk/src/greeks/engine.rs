//! Bump-and-reprice Greeks for a calibrated Bermudan.
//!
//! - Curve: parallel zero-rate shifts `DF·exp(∓h/1e4·t)`, repricing at the
//!   calibrated parameters
//! - Vega: uniform surface shifts, each followed by a fresh ATM calibration
//!   with the target adjustment `Δσ` held fixed
//! - Theta: the curve rolled forward one calendar day, dead exercise dates
//!   dropped

use pricer_core::market_data::{AtmNormalVolSurface, DiscountCurve, MarketDataError};
use pricer_models::instruments::rates::pricing::price_ois;
use pricer_models::instruments::rates::Swaption;
use pricer_models::models::HullWhiteParams;
use pricer_optimiser::basket::BasketBuilder;
use pricer_optimiser::calibration::CalibrationEngine;
use pricer_pricing::SwaptionEngine;
use tracing::{debug, info};

use super::{GreekSet, GreeksConfig};
use crate::{GreeksError, ModelState};

/// Curve sensitivities from one set of parallel shifts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSensitivities {
    /// Option DV01 per basis point.
    pub dv01: f64,
    /// Option Gamma per basis point squared.
    pub gamma: f64,
    /// Underlying swap DV01 per basis point.
    pub underlying_dv01: f64,
    /// `dv01 / underlying_dv01`, or zero.
    pub hedge_delta: f64,
}

/// Computes a [`GreekSet`] by repricing through the calibration engine's
/// oracle.
pub struct GreekEngine<'a, E> {
    calibrator: &'a CalibrationEngine<E>,
    config: GreeksConfig,
}

impl<'a, E: SwaptionEngine> GreekEngine<'a, E> {
    /// Creates a Greek engine.
    ///
    /// # Errors
    /// `GreeksError::InvalidBump` if a bump is not positive.
    pub fn new(
        calibrator: &'a CalibrationEngine<E>,
        config: GreeksConfig,
    ) -> Result<Self, GreeksError> {
        config.validate()?;
        Ok(Self { calibrator, config })
    }

    /// Bump configuration.
    pub fn config(&self) -> &GreeksConfig {
        &self.config
    }

    /// Full Greek run around `base_npv`, the value at `state`.
    ///
    /// # Errors
    /// The first repricing or recalibration failure.
    pub fn compute(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        surface: &AtmNormalVolSurface,
        state: &ModelState,
        base_npv: f64,
    ) -> Result<GreekSet, GreeksError> {
        let params = state.params()?;

        info!(bump_bp = self.config.curve_bump_bp, "Greeks: curve shifts");
        let curve_risk = self.curve_sensitivities(swaption, curve, &params, base_npv)?;

        info!(bump_bp = self.config.vol_bump_bp, "Greeks: vega with recalibration");
        let vega = self.vega(swaption, curve, surface, state)?;

        let theta = if self.config.compute_theta {
            info!("Greeks: one-day theta");
            self.theta(swaption, curve, &params, base_npv)?
        } else {
            0.0
        };

        let greeks = GreekSet {
            dv01: curve_risk.dv01,
            gamma: curve_risk.gamma,
            vega,
            theta,
            hedge_delta: curve_risk.hedge_delta,
            underlying_dv01: curve_risk.underlying_dv01,
        };
        info!(
            dv01 = greeks.dv01,
            gamma = greeks.gamma,
            vega = greeks.vega,
            theta = greeks.theta,
            hedge_delta = greeks.hedge_delta,
            "Greeks complete"
        );
        Ok(greeks)
    }

    /// DV01, Gamma and the underlying's DV01.
    ///
    /// Gamma reuses the DV01 repricings when both bumps are equal.
    pub fn curve_sensitivities(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        params: &HullWhiteParams,
        base_npv: f64,
    ) -> Result<CurveSensitivities, GreeksError> {
        let h = self.config.curve_bump_bp;
        let up_curve = curve.bumped(h);
        let down_curve = curve.bumped(-h);

        let oracle = self.calibrator.oracle();
        let up = oracle.price(swaption, &up_curve, params)?;
        let down = oracle.price(swaption, &down_curve, params)?;
        debug!(up, down, "curve-shifted prices");
        let dv01 = (down - up) / (2.0 * h);

        let gamma_bump = self.config.gamma_bump_bp;
        let gamma = if gamma_bump == h {
            second_difference(up, base_npv, down, h)
        } else {
            self.gamma(swaption, curve, params, base_npv, gamma_bump)?
        };

        let swap = swaption.underlying();
        let swap_up = price_ois(swap, &up_curve)?;
        let swap_down = price_ois(swap, &down_curve)?;
        let underlying_dv01 = (swap_down - swap_up) / (2.0 * h);

        Ok(CurveSensitivities {
            dv01,
            gamma,
            underlying_dv01,
            hedge_delta: GreekSet::hedge_ratio(dv01, underlying_dv01),
        })
    }

    /// `(P(+h) − 2·P0 + P(−h))/h²` for a parallel shift of `bump_bp`.
    ///
    /// Symmetric in the sign of `bump_bp`.
    pub fn gamma(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        params: &HullWhiteParams,
        base_npv: f64,
        bump_bp: f64,
    ) -> Result<f64, GreeksError> {
        let oracle = self.calibrator.oracle();
        let up = oracle.price(swaption, &curve.bumped(bump_bp), params)?;
        let down = oracle.price(swaption, &curve.bumped(-bump_bp), params)?;
        Ok(second_difference(up, base_npv, down, bump_bp))
    }

    /// Central difference in the surface level, recalibrating each leg.
    ///
    /// Each leg rebuilds the basket on the shifted surface, reruns the
    /// procedure the base state came from (joint when `a` was calibrated,
    /// ATM otherwise), adds back `state.delta_sigma` and reprices. Only the
    /// volatility moves: a joint refit's mean reversion is discarded and
    /// the leg keeps `state.mean_reversion`.
    pub fn vega(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        surface: &AtmNormalVolSurface,
        state: &ModelState,
    ) -> Result<f64, GreeksError> {
        let h = self.config.vol_bump_bp;
        let up = self.vega_leg(swaption, curve, surface, state, h)?;
        let down = self.vega_leg(swaption, curve, surface, state, -h)?;
        Ok((up - down) / (2.0 * h))
    }

    fn vega_leg(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        surface: &AtmNormalVolSurface,
        state: &ModelState,
        shift_bp: f64,
    ) -> Result<f64, GreeksError> {
        let basket = BasketBuilder::new(curve, surface)
            .vol_shift_bp(shift_bp)
            .build(swaption)?;
        let atm = if state.mean_reversion_calibrated {
            self.calibrator.fit_joint(&basket, curve)?
        } else {
            self.calibrator.fit_atm(&basket, curve, state.mean_reversion)?
        };
        let params = HullWhiteParams::new(
            state.mean_reversion,
            atm.volatility() + state.delta_sigma,
        )?;
        let price = self.calibrator.oracle().price(swaption, curve, &params)?;
        debug!(
            shift_bp,
            sigma_atm = atm.volatility(),
            sigma_total = params.volatility(),
            price,
            "vega leg"
        );
        Ok(price)
    }

    /// Value change from rolling the valuation date forward one day.
    ///
    /// Zero exercise dates left after the roll price to zero.
    pub fn theta(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        params: &HullWhiteParams,
        base_npv: f64,
    ) -> Result<f64, GreeksError> {
        let next = curve
            .valuation_date()
            .add_days(1)
            .map_err(MarketDataError::from)?;
        let rolled = curve.rolled(next)?;
        let rolled_npv = match swaption.live_after(next) {
            Some(live) => self.calibrator.oracle().price(&live, &rolled, params)?,
            None => 0.0,
        };
        debug!(%next, rolled_npv, "rolled price");
        Ok(rolled_npv - base_npv)
    }
}

#[inline]
fn second_difference(up: f64, mid: f64, down: f64, h: f64) -> f64 {
    (up - 2.0 * mid + down) / (h * h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        bermudan, d, flat_curve, flat_surface, sloped_surface, MaxEuropeanOracle,
    };
    use approx::assert_relative_eq;
    use pricer_models::instruments::rates::SwapDirection;
    use pricer_optimiser::calibration::CalibrationConfig;

    fn calibrator() -> CalibrationEngine<MaxEuropeanOracle> {
        CalibrationEngine::new(MaxEuropeanOracle, CalibrationConfig::default()).unwrap()
    }

    fn params() -> HullWhiteParams {
        HullWhiteParams::new(0.03, 0.006).unwrap()
    }

    #[test]
    fn test_receiver_curve_risk_signs() {
        let curve = flat_curve(d(2025, 1, 15), 0.03);
        let swaption = bermudan(SwapDirection::Receiver, 0.03);
        let calibrator = calibrator();
        let greeks = GreekEngine::new(&calibrator, GreeksConfig::default()).unwrap();
        let base = MaxEuropeanOracle.price(&swaption, &curve, &params()).unwrap();

        let risk = greeks
            .curve_sensitivities(&swaption, &curve, &params(), base)
            .unwrap();
        assert!(risk.dv01 > 0.0);
        assert!(risk.underlying_dv01 > 0.0);
        assert!(risk.hedge_delta > 0.0 && risk.hedge_delta < 1.0);
        assert_eq!(risk.hedge_delta, risk.dv01 / risk.underlying_dv01);
    }

    #[test]
    fn test_payer_dv01_negative() {
        let curve = flat_curve(d(2025, 1, 15), 0.03);
        let swaption = bermudan(SwapDirection::Payer, 0.03);
        let calibrator = calibrator();
        let greeks = GreekEngine::new(&calibrator, GreeksConfig::default()).unwrap();
        let base = MaxEuropeanOracle.price(&swaption, &curve, &params()).unwrap();

        let risk = greeks
            .curve_sensitivities(&swaption, &curve, &params(), base)
            .unwrap();
        assert!(risk.dv01 < 0.0);
        assert!(risk.underlying_dv01 < 0.0);
        assert!(risk.hedge_delta > 0.0);
    }

    #[test]
    fn test_gamma_symmetric_in_bump_sign() {
        let curve = flat_curve(d(2025, 1, 15), 0.03);
        let swaption = bermudan(SwapDirection::Receiver, 0.03);
        let calibrator = calibrator();
        let greeks = GreekEngine::new(&calibrator, GreeksConfig::default()).unwrap();
        let base = MaxEuropeanOracle.price(&swaption, &curve, &params()).unwrap();

        let up = greeks.gamma(&swaption, &curve, &params(), base, 1.0).unwrap();
        let down = greeks.gamma(&swaption, &curve, &params(), base, -1.0).unwrap();
        assert_relative_eq!(up, down, epsilon = 1e-6);
    }

    #[test]
    fn test_gamma_reuses_dv01_repricing() {
        let curve = flat_curve(d(2025, 1, 15), 0.03);
        let swaption = bermudan(SwapDirection::Receiver, 0.03);
        let calibrator = calibrator();
        let greeks = GreekEngine::new(&calibrator, GreeksConfig::default()).unwrap();
        let base = MaxEuropeanOracle.price(&swaption, &curve, &params()).unwrap();

        let risk = greeks
            .curve_sensitivities(&swaption, &curve, &params(), base)
            .unwrap();
        let direct = greeks.gamma(&swaption, &curve, &params(), base, 1.0).unwrap();
        assert_eq!(risk.gamma, direct);

        let wide = GreekEngine::new(&calibrator, GreeksConfig::default().with_gamma_bump_bp(5.0))
            .unwrap();
        let wide_risk = wide
            .curve_sensitivities(&swaption, &curve, &params(), base)
            .unwrap();
        assert_eq!(wide_risk.dv01, risk.dv01);
        assert_eq!(
            wide_risk.gamma,
            wide.gamma(&swaption, &curve, &params(), base, 5.0).unwrap()
        );
    }

    #[test]
    fn test_theta_depletion() {
        // The last exercise date is tomorrow, so the rolled instrument is dead
        let curve = flat_curve(d(2034, 7, 14), 0.03);
        let swaption = bermudan(SwapDirection::Receiver, 0.035);
        let calibrator = calibrator();
        let greeks = GreekEngine::new(&calibrator, GreeksConfig::default()).unwrap();
        let base = MaxEuropeanOracle.price(&swaption, &curve, &params()).unwrap();
        assert!(base > 0.0);

        let theta = greeks.theta(&swaption, &curve, &params(), base).unwrap();
        assert_eq!(theta, -base);
    }

    #[test]
    fn test_theta_small_far_from_expiry() {
        let curve = flat_curve(d(2025, 1, 15), 0.03);
        let swaption = bermudan(SwapDirection::Receiver, 0.03);
        let calibrator = calibrator();
        let greeks = GreekEngine::new(&calibrator, GreeksConfig::default()).unwrap();
        let base = MaxEuropeanOracle.price(&swaption, &curve, &params()).unwrap();

        let theta = greeks.theta(&swaption, &curve, &params(), base).unwrap();
        assert!(theta.abs() < 1e-3 * base, "theta = {theta}, base = {base}");
    }

    #[test]
    fn test_vega_positive() {
        let curve = flat_curve(d(2025, 1, 15), 0.03);
        let surface = flat_surface();
        let swaption = bermudan(SwapDirection::Receiver, 0.03);
        let calibrator = calibrator();
        let greeks = GreekEngine::new(&calibrator, GreeksConfig::default()).unwrap();

        let basket = BasketBuilder::new(&curve, &surface).build(&swaption).unwrap();
        let atm = calibrator.fit_atm(&basket, &curve, 0.03).unwrap();
        let state = ModelState::new(0.03, atm.volatility(), atm.volatility() + 0.0004, false);

        let vega = greeks.vega(&swaption, &curve, &surface, &state).unwrap();
        assert!(vega > 0.0);
        // A 1bp surface move is worth a fraction of a percent of premium
        let base = MaxEuropeanOracle
            .price(&swaption, &curve, &state.params().unwrap())
            .unwrap();
        assert!(vega < 0.05 * base);
    }

    #[test]
    fn test_joint_vega_keeps_base_mean_reversion() {
        let curve = flat_curve(d(2025, 1, 15), 0.03);
        let surface = sloped_surface();
        let swaption = bermudan(SwapDirection::Receiver, 0.03);
        let calibrator = calibrator();
        let greeks = GreekEngine::new(&calibrator, GreeksConfig::default()).unwrap();

        let basket = BasketBuilder::new(&curve, &surface).build(&swaption).unwrap();
        let joint = calibrator.fit_joint(&basket, &curve).unwrap();
        let a = joint.mean_reversion();
        let state = ModelState::new(a, joint.volatility(), joint.volatility() + 0.0005, true);

        // Each leg: joint refit on the shifted surface, keep its σ only
        let leg = |shift: f64| {
            let bumped = BasketBuilder::new(&curve, &surface)
                .vol_shift_bp(shift)
                .build(&swaption)
                .unwrap();
            let refit = calibrator.fit_joint(&bumped, &curve).unwrap();
            let params = HullWhiteParams::new(a, refit.volatility() + 0.0005).unwrap();
            MaxEuropeanOracle.price(&swaption, &curve, &params).unwrap()
        };
        let expected = (leg(1.0) - leg(-1.0)) / 2.0;

        let vega = greeks.vega(&swaption, &curve, &surface, &state).unwrap();
        assert!(vega > 0.0);
        assert_relative_eq!(vega, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_theta_switch() {
        let curve = flat_curve(d(2025, 1, 15), 0.03);
        let surface = flat_surface();
        let swaption = bermudan(SwapDirection::Receiver, 0.03);
        let calibrator = calibrator();
        let config = GreeksConfig::default().with_theta(false);
        let greeks = GreekEngine::new(&calibrator, config).unwrap();
        let state = ModelState::new(0.03, 0.006, 0.006, false);
        let base = MaxEuropeanOracle
            .price(&swaption, &curve, &state.params().unwrap())
            .unwrap();

        let set = greeks
            .compute(&swaption, &curve, &surface, &state, base)
            .unwrap();
        assert_eq!(set.theta, 0.0);
        assert!(set.dv01 > 0.0);
    }

    #[test]
    fn test_invalid_bump_rejected() {
        let calibrator = calibrator();
        assert!(matches!(
            GreekEngine::new(&calibrator, GreeksConfig::default().with_vol_bump_bp(0.0)),
            Err(GreeksError::InvalidBump { name: "vol_bump_bp", .. })
        ));
    }
}
