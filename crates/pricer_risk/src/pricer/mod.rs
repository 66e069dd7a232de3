//! Bermudan pricer: owns the inputs and the model state across
//! calibrate → price → Greeks.
//!
//! Two-stage calibration:
//! 1. ATM basket fit (or joint fit of `a` and `σ`) → `σ_ATM`
//! 2. when a target value is set, an inverse fit of the whole Bermudan →
//!    `σ_total`, with `Δσ = σ_total − σ_ATM`
//!
//! The Bermudan is then priced once more at `σ_total`.

mod result;

pub use result::{percent_diff, PricingResult};

use pricer_core::market_data::{AtmNormalVolSurface, DiscountCurve};
use pricer_models::instruments::rates::pricing::{fixed_leg_bps, par_swap_rate, price_ois};
use pricer_models::instruments::rates::Swaption;
use pricer_optimiser::basket::BasketBuilder;
use pricer_optimiser::calibration::{CalibrationConfig, CalibrationEngine, CalibrationResult};
use pricer_pricing::SwaptionEngine;
use tracing::{info, warn};

use crate::greeks::{GreekEngine, GreekSet, GreeksConfig};
use crate::{ModelState, PricerError};

/// Hull-White settings of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelConfig {
    /// Fixed mean reversion, or the seed when it is calibrated.
    pub mean_reversion: f64,
    /// Fit `a` jointly with `σ` instead of holding it fixed.
    pub calibrate_mean_reversion: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            mean_reversion: 0.03,
            calibrate_mean_reversion: false,
        }
    }
}

/// Model, calibration and Greek settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PricerConfig {
    /// Mean reversion and whether it is fitted.
    pub model: ModelConfig,
    /// Optimiser seeds, bounds and tolerances.
    pub calibration: CalibrationConfig,
    /// Bump sizes and the theta switch.
    pub greeks: GreeksConfig,
}

#[derive(Debug, Clone, Copy)]
struct Calibrated {
    state: ModelState,
    npv: f64,
    atm_npv: f64,
    atm: CalibrationResult,
    inverse: Option<CalibrationResult>,
}

/// Hybrid-calibrated Bermudan swaption pricer.
///
/// # Examples
///
/// ```no_run
/// use pricer_risk::{BermudanPricer, PricerConfig};
/// # use pricer_core::market_data::{AtmNormalVolSurface, DiscountCurve};
/// # use pricer_models::instruments::rates::Swaption;
/// use pricer_pricing::fd::{FdConfig, FdHullWhiteSwaptionEngine};
///
/// # fn run(swaption: Swaption, curve: DiscountCurve, surface: AtmNormalVolSurface)
/// #     -> Result<(), Box<dyn std::error::Error>> {
/// let engine = FdHullWhiteSwaptionEngine::new(FdConfig::default())?;
/// let mut pricer = BermudanPricer::new(engine, swaption, curve, surface, PricerConfig::default())?
///     .with_target(Some(125_000.0));
/// let result = pricer.run(true)?;
/// println!("NPV {:.2}, Δσ {:.6}", result.npv, result.model.delta_sigma);
/// # Ok(())
/// # }
/// ```
pub struct BermudanPricer<E> {
    calibrator: CalibrationEngine<E>,
    swaption: Swaption,
    curve: DiscountCurve,
    surface: AtmNormalVolSurface,
    config: PricerConfig,
    target: Option<f64>,
    calibrated: Option<Calibrated>,
}

impl<E: SwaptionEngine> BermudanPricer<E> {
    /// Creates an uncalibrated pricer.
    ///
    /// A fixed mean reversion outside the joint-fit bounds is accepted with
    /// a warning.
    ///
    /// # Errors
    /// - `PricerError::InvalidMeanReversion` for a non-positive `a`
    /// - `PricerError::Calibration` or `PricerError::Greeks` for unusable
    ///   settings
    pub fn new(
        oracle: E,
        swaption: Swaption,
        curve: DiscountCurve,
        surface: AtmNormalVolSurface,
        config: PricerConfig,
    ) -> Result<Self, PricerError> {
        let a = config.model.mean_reversion;
        if !(a.is_finite() && a > 0.0) {
            return Err(PricerError::InvalidMeanReversion { value: a });
        }
        let (lo, hi) = config.calibration.mean_reversion_bounds;
        if !config.model.calibrate_mean_reversion && (a < lo || a > hi) {
            warn!(
                mean_reversion = a,
                lower = lo,
                upper = hi,
                "fixed mean reversion outside calibration bounds"
            );
        }
        config.greeks.validate()?;
        let calibrator = CalibrationEngine::new(oracle, config.calibration)?;

        Ok(Self {
            calibrator,
            swaption,
            curve,
            surface,
            config,
            target: None,
            calibrated: None,
        })
    }

    /// Sets the value the second calibration stage reproduces.
    ///
    /// A zero or non-finite target means no target: calibration stops after
    /// the basket fit.
    pub fn with_target(mut self, target: Option<f64>) -> Self {
        self.target = target.filter(|t| t.is_finite() && *t != 0.0);
        self.calibrated = None;
        self
    }

    /// The instrument.
    pub fn swaption(&self) -> &Swaption {
        &self.swaption
    }

    /// Discount curve the run is priced on.
    pub fn curve(&self) -> &DiscountCurve {
        &self.curve
    }

    /// ATM normal vol surface the basket is priced off.
    pub fn surface(&self) -> &AtmNormalVolSurface {
        &self.surface
    }

    /// Run settings.
    pub fn config(&self) -> &PricerConfig {
        &self.config
    }

    /// Target value of the inverse fit, if any.
    pub fn target(&self) -> Option<f64> {
        self.target
    }

    /// Calibrated state, if [`calibrate`](Self::calibrate) has run.
    pub fn state(&self) -> Option<ModelState> {
        self.calibrated.map(|c| c.state)
    }

    /// Bermudan value at `σ_total`, if calibrated.
    pub fn npv(&self) -> Option<f64> {
        self.calibrated.map(|c| c.npv)
    }

    /// Runs both calibration stages and prices the Bermudan.
    ///
    /// # Errors
    /// Basket construction, calibration or final pricing failures.
    pub fn calibrate(&mut self) -> Result<ModelState, PricerError> {
        let basket = BasketBuilder::new(&self.curve, &self.surface).build(&self.swaption)?;
        info!(entries = basket.len(), "calibration basket built");

        let model = self.config.model;
        let atm = if model.calibrate_mean_reversion {
            self.calibrator.fit_joint(&basket, &self.curve)?
        } else {
            self.calibrator
                .fit_atm(&basket, &self.curve, model.mean_reversion)?
        };
        let a = atm.mean_reversion();
        let oracle = self.calibrator.oracle();
        let atm_npv = oracle.price(&self.swaption, &self.curve, &atm.params)?;

        let inverse = match self.target {
            Some(target) => {
                info!(
                    atm_npv,
                    target,
                    diff_pct = percent_diff(atm_npv, target),
                    "ATM-calibrated value"
                );
                Some(
                    self.calibrator
                        .fit_inverse(&self.swaption, &self.curve, a, target)?,
                )
            }
            None => {
                info!(atm_npv, "ATM-calibrated value, no target");
                None
            }
        };

        let sigma_atm = atm.volatility();
        let sigma_total = inverse.map_or(sigma_atm, |r| r.volatility());
        let state = ModelState::new(a, sigma_atm, sigma_total, model.calibrate_mean_reversion);
        let npv = oracle.price(&self.swaption, &self.curve, &state.params()?)?;
        info!(
            mean_reversion = a,
            sigma_atm,
            delta_sigma = state.delta_sigma,
            sigma_total,
            npv,
            "calibration complete"
        );

        self.calibrated = Some(Calibrated {
            state,
            npv,
            atm_npv,
            atm,
            inverse,
        });
        Ok(state)
    }

    /// Greeks around the calibrated state.
    ///
    /// # Errors
    /// `PricerError::NotCalibrated` before [`calibrate`](Self::calibrate);
    /// otherwise the first repricing failure.
    pub fn greeks(&self) -> Result<GreekSet, PricerError> {
        let calibrated = self.calibrated.ok_or(PricerError::NotCalibrated)?;
        let engine = GreekEngine::new(&self.calibrator, self.config.greeks)?;
        Ok(engine.compute(
            &self.swaption,
            &self.curve,
            &self.surface,
            &calibrated.state,
            calibrated.npv,
        )?)
    }

    /// Calibrates if needed, optionally runs the Greeks, and collects the
    /// headline figures.
    pub fn run(&mut self, with_greeks: bool) -> Result<PricingResult, PricerError> {
        if self.calibrated.is_none() {
            self.calibrate()?;
        }
        let greeks = if with_greeks {
            Some(self.greeks()?)
        } else {
            None
        };
        self.result(greeks)
    }

    /// Headline figures of the calibrated state.
    ///
    /// # Errors
    /// `PricerError::NotCalibrated` before [`calibrate`](Self::calibrate).
    pub fn result(&self, greeks: Option<GreekSet>) -> Result<PricingResult, PricerError> {
        let calibrated = self.calibrated.ok_or(PricerError::NotCalibrated)?;
        let swap = self.swaption.underlying();
        let notional = swap.notional();

        let fair_rate = par_swap_rate(swap, &self.curve)?;
        let underlying_npv = price_ois(swap, &self.curve)?;
        let bps = fixed_leg_bps(swap, &self.curve)?.abs();
        let npv = calibrated.npv;

        Ok(PricingResult {
            valuation_date: self.curve.valuation_date(),
            notional,
            strike: swap.fixed_rate(),
            direction: swap.direction(),
            fair_rate,
            moneyness_bp: (swap.fixed_rate() - fair_rate) * 1e4,
            npv,
            yield_value_bp: if bps > 0.0 { npv / bps } else { 0.0 },
            premium_pct: npv / notional * 100.0,
            underlying_npv,
            underlying_premium_pct: underlying_npv / notional * 100.0,
            exercise_dates: self.swaption.exercise().len(),
            model: calibrated.state,
            atm_npv: calibrated.atm_npv,
            atm_calibration: calibrated.atm,
            inverse_calibration: calibrated.inverse,
            greeks,
            target_npv: self.target,
            target_diff_pct: self.target.and_then(|t| percent_diff(npv, t)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        bermudan, d, flat_curve, flat_surface, MaxEuropeanOracle, UnbumpedCurveOracle,
    };
    use approx::assert_relative_eq;
    use pricer_models::instruments::rates::SwapDirection;
    use pricer_optimiser::calibration::CalibrationMethod;

    fn pricer(config: PricerConfig) -> BermudanPricer<MaxEuropeanOracle> {
        BermudanPricer::new(
            MaxEuropeanOracle,
            bermudan(SwapDirection::Receiver, 0.03),
            flat_curve(d(2025, 1, 15), 0.03),
            flat_surface(),
            config,
        )
        .unwrap()
    }

    #[test]
    fn test_non_positive_mean_reversion_rejected() {
        let config = PricerConfig {
            model: ModelConfig {
                mean_reversion: 0.0,
                calibrate_mean_reversion: false,
            },
            ..PricerConfig::default()
        };
        let result = BermudanPricer::new(
            MaxEuropeanOracle,
            bermudan(SwapDirection::Receiver, 0.03),
            flat_curve(d(2025, 1, 15), 0.03),
            flat_surface(),
            config,
        );
        assert!(matches!(
            result,
            Err(PricerError::InvalidMeanReversion { value }) if value == 0.0
        ));
    }

    #[test]
    fn test_out_of_bounds_fixed_mean_reversion_accepted() {
        let config = PricerConfig {
            model: ModelConfig {
                mean_reversion: 0.8,
                calibrate_mean_reversion: false,
            },
            ..PricerConfig::default()
        };
        let mut pricer = pricer(config);
        let state = pricer.calibrate().unwrap();
        assert_eq!(state.mean_reversion, 0.8);
    }

    #[test]
    fn test_greeks_need_calibration() {
        let pricer = pricer(PricerConfig::default());
        assert!(matches!(pricer.greeks(), Err(PricerError::NotCalibrated)));
        assert!(matches!(pricer.result(None), Err(PricerError::NotCalibrated)));
        assert!(pricer.state().is_none());
    }

    #[test]
    fn test_no_target_single_stage() {
        let mut pricer = pricer(PricerConfig::default());
        let state = pricer.calibrate().unwrap();

        assert_eq!(state.delta_sigma, 0.0);
        assert_eq!(state.sigma_total, state.sigma_atm);
        assert!(!state.mean_reversion_calibrated);
        let expected = MaxEuropeanOracle
            .price(pricer.swaption(), pricer.curve(), &state.params().unwrap())
            .unwrap();
        assert_eq!(pricer.npv(), Some(expected));
    }

    #[test]
    fn test_target_reproduced() {
        let mut base = pricer(PricerConfig::default());
        base.calibrate().unwrap();
        let target = base.npv().unwrap() * 1.1;

        let mut pricer = pricer(PricerConfig::default()).with_target(Some(target));
        let state = pricer.calibrate().unwrap();
        assert!(state.delta_sigma > 0.0);
        assert_relative_eq!(pricer.npv().unwrap(), target, max_relative = 1e-6);

        let result = pricer.result(None).unwrap();
        let inverse = result.inverse_calibration.unwrap();
        assert_eq!(inverse.method, CalibrationMethod::Inverse);
        assert!(result.target_diff_pct.unwrap().abs() < 1e-4);
    }

    #[test]
    fn test_zero_or_non_finite_target_ignored() {
        let mut base = pricer(PricerConfig::default());
        base.calibrate().unwrap();

        for target in [0.0, f64::NAN, f64::INFINITY] {
            let mut pricer = pricer(PricerConfig::default()).with_target(Some(target));
            assert_eq!(pricer.target(), None);
            let state = pricer.calibrate().unwrap();
            assert_eq!(state.delta_sigma, 0.0);
            assert_eq!(pricer.npv(), base.npv());

            let result = pricer.result(None).unwrap();
            assert!(result.inverse_calibration.is_none());
            assert!(result.target_npv.is_none());
        }
    }

    #[test]
    fn test_greek_failure_keeps_calibration() {
        let curve = flat_curve(d(2025, 1, 15), 0.03);
        let mut pricer = BermudanPricer::new(
            UnbumpedCurveOracle::for_curve(&curve),
            bermudan(SwapDirection::Receiver, 0.03),
            curve,
            flat_surface(),
            PricerConfig::default(),
        )
        .unwrap();
        let state = pricer.calibrate().unwrap();

        assert!(matches!(
            pricer.greeks(),
            Err(PricerError::Greeks(crate::GreeksError::Engine(_)))
        ));
        assert!(pricer.run(true).is_err());
        assert_eq!(pricer.state(), Some(state));
        assert!(pricer.npv().unwrap() > 0.0);
        let result = pricer.result(None).unwrap();
        assert_eq!(result.model, state);
    }

    #[test]
    fn test_joint_calibration_flag() {
        let config = PricerConfig {
            model: ModelConfig {
                mean_reversion: 0.03,
                calibrate_mean_reversion: true,
            },
            ..PricerConfig::default()
        };
        let mut pricer = pricer(config);
        let state = pricer.calibrate().unwrap();
        assert!(state.mean_reversion_calibrated);
        assert!(state.mean_reversion > 0.001 && state.mean_reversion < 0.5);
        let result = pricer.result(None).unwrap();
        assert_eq!(result.atm_calibration.method, CalibrationMethod::Joint);
    }

    #[test]
    fn test_run_collects_headline_figures() {
        let mut pricer = pricer(PricerConfig::default());
        let result = pricer.run(true).unwrap();

        assert_eq!(result.valuation_date, d(2025, 1, 15));
        assert_eq!(result.notional, 1e7);
        assert_eq!(result.direction, SwapDirection::Receiver);
        assert_eq!(result.exercise_dates, 10);
        assert_relative_eq!(
            result.moneyness_bp,
            (0.03 - result.fair_rate) * 1e4,
            epsilon = 1e-12
        );
        assert_relative_eq!(result.premium_pct, result.npv / 1e5, max_relative = 1e-12);
        assert!(result.npv > 0.0);
        assert!(result.yield_value_bp > 0.0);
        assert!(result.target_npv.is_none());
        assert!(result.target_diff_pct.is_none());

        let greeks = result.greeks.unwrap();
        assert!(greeks.dv01 > 0.0);
        assert!(greeks.vega > 0.0);
    }
}
