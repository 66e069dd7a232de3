//! Hull-White calibration driven by a swaption oracle.
//!
//! ## Procedures
//!
//! - [`CalibrationEngine::fit_atm`]: `σ` with `a` fixed, simplex over
//!   `x = ln σ` with `σ = 1e-8 + eˣ`
//! - [`CalibrationEngine::fit_joint`]: `(a, σ)`, simplex over
//!   `(logit((a − a_min)/(a_max − a_min)), ln σ)`
//! - [`CalibrationEngine::fit_inverse`]: `σ` such that the full instrument
//!   prices to a target, Brent on `ln σ` with a simplex fallback
//!
//! The basket objective is `Σ (oracle(a, σ) − mkt)² / max(1, |mkt|)`. A
//! trial point the oracle cannot price scores [`PENALTY`] instead of
//! aborting the search.

use pricer_core::market_data::DiscountCurve;
use pricer_core::math::solvers::{
    BrentSolver, NelderMeadConfig, NelderMeadResult, NelderMeadSolver, SolverConfig,
};
use pricer_models::instruments::rates::Swaption;
use pricer_models::models::HullWhiteParams;
use pricer_pricing::SwaptionEngine;
use tracing::{debug, info, warn};

use super::{CalibrationConfig, CalibrationMethod, CalibrationResult};
use crate::basket::BasketEntry;
use crate::CalibrationError;

/// Objective assigned to trial points that fail to price.
pub const PENALTY: f64 = 1e20;

/// Lower bound added to `eˣ` in the volatility map.
pub const SIGMA_FLOOR: f64 = 1e-8;

/// Clip on the logistic map of the joint fit, keeping `a` strictly inside
/// its bounds.
const LOGIT_CLIP: f64 = 1e-10;

/// Volatility from its unconstrained coordinate.
#[inline]
pub fn sigma_from_log(x: f64) -> f64 {
    SIGMA_FLOOR + x.exp()
}

/// Mean reversion from its unconstrained coordinate, strictly inside
/// `bounds`.
#[inline]
pub fn mean_reversion_from_logit(x: f64, bounds: (f64, f64)) -> f64 {
    let s = (1.0 / (1.0 + (-x).exp())).clamp(LOGIT_CLIP, 1.0 - LOGIT_CLIP);
    bounds.0 + s * (bounds.1 - bounds.0)
}

/// Unconstrained coordinate of a mean reversion, clipped at the bounds.
#[inline]
pub fn logit_of_mean_reversion(a: f64, bounds: (f64, f64)) -> f64 {
    let p = ((a - bounds.0) / (bounds.1 - bounds.0)).clamp(LOGIT_CLIP, 1.0 - LOGIT_CLIP);
    (p / (1.0 - p)).ln()
}

/// Fits Hull-White parameters with a [`SwaptionEngine`] as the oracle.
///
/// # Example
///
/// ```rust,ignore
/// let calibrator = CalibrationEngine::new(&engine, CalibrationConfig::default())?;
/// let atm = calibrator.fit_atm(&basket, &curve, 0.03)?;
/// println!("σ_ATM = {:.6}", atm.volatility());
/// ```
#[derive(Debug, Clone)]
pub struct CalibrationEngine<E> {
    oracle: E,
    config: CalibrationConfig,
}

impl<E: SwaptionEngine> CalibrationEngine<E> {
    /// Creates a calibration engine.
    ///
    /// # Errors
    /// `CalibrationError::InvalidConfig` if `config` fails validation.
    pub fn new(oracle: E, config: CalibrationConfig) -> Result<Self, CalibrationError> {
        config.validate()?;
        Ok(Self { oracle, config })
    }

    /// Calibration settings.
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// The valuation oracle.
    pub fn oracle(&self) -> &E {
        &self.oracle
    }

    /// Weighted squared pricing error of `params` over the basket.
    ///
    /// # Errors
    /// The first oracle failure.
    pub fn objective(
        &self,
        basket: &[BasketEntry],
        curve: &DiscountCurve,
        params: &HullWhiteParams,
    ) -> Result<f64, CalibrationError> {
        let mut total = 0.0;
        for entry in basket {
            let model = self.oracle.price(&entry.swaption, curve, params)?;
            let error = model - entry.market_price;
            total += error * error / entry.market_price.abs().max(1.0);
        }
        Ok(total)
    }

    /// Fits `σ` to the basket with `a` held at `mean_reversion`.
    ///
    /// # Errors
    /// - `CalibrationError::EmptyBasket` for an empty basket
    /// - `CalibrationError::Model` if `mean_reversion` is not positive
    /// - `CalibrationError::NoFeasiblePoint` if no trial point priced
    pub fn fit_atm(
        &self,
        basket: &[BasketEntry],
        curve: &DiscountCurve,
        mean_reversion: f64,
    ) -> Result<CalibrationResult, CalibrationError> {
        if basket.is_empty() {
            return Err(CalibrationError::EmptyBasket);
        }
        HullWhiteParams::new(mean_reversion, self.config.sigma_seed)?;
        info!(entries = basket.len(), mean_reversion, "ATM calibration");

        let tol = self.config.tolerance;
        let solver = NelderMeadSolver::new(
            NelderMeadConfig::new(self.config.atm_max_iterations).with_tolerances(tol, tol),
        );
        let outcome = solver.minimize(
            |x: &[f64]| self.scored(basket, curve, mean_reversion, sigma_from_log(x[0])),
            &[self.config.sigma_seed.ln()],
        )?;

        let params = HullWhiteParams::new(mean_reversion, sigma_from_log(outcome.x[0]))?;
        finish(CalibrationMethod::Atm, params, &outcome)
    }

    /// Fits `a` and `σ` jointly to the basket.
    ///
    /// `a` stays strictly inside `config.mean_reversion_bounds`.
    ///
    /// # Errors
    /// - `CalibrationError::EmptyBasket` for an empty basket
    /// - `CalibrationError::NoFeasiblePoint` if no trial point priced
    pub fn fit_joint(
        &self,
        basket: &[BasketEntry],
        curve: &DiscountCurve,
    ) -> Result<CalibrationResult, CalibrationError> {
        if basket.is_empty() {
            return Err(CalibrationError::EmptyBasket);
        }
        let bounds = self.config.mean_reversion_bounds;
        info!(
            entries = basket.len(),
            a_min = bounds.0,
            a_max = bounds.1,
            "joint (a, σ) calibration"
        );

        let tol = self.config.tolerance;
        let solver = NelderMeadSolver::new(
            NelderMeadConfig::new(self.config.joint_max_iterations).with_tolerances(tol, tol),
        );
        let x0 = [
            logit_of_mean_reversion(self.config.mean_reversion_seed, bounds),
            self.config.sigma_seed.ln(),
        ];
        let outcome = solver.minimize(
            |x: &[f64]| {
                let a = mean_reversion_from_logit(x[0], bounds);
                self.scored(basket, curve, a, sigma_from_log(x[1]))
            },
            &x0,
        )?;

        let params = HullWhiteParams::new(
            mean_reversion_from_logit(outcome.x[0], bounds),
            sigma_from_log(outcome.x[1]),
        )?;
        finish(CalibrationMethod::Joint, params, &outcome)
    }

    /// Fits `σ` so the full instrument prices to `target` with `a` held at
    /// `mean_reversion`.
    ///
    /// Brent on `ln σ` over `config.inverse_bracket`; when the bracket has
    /// no sign change or the search fails, a simplex on the squared
    /// residual takes over, unbounded.
    ///
    /// # Errors
    /// - `CalibrationError::Model` if `mean_reversion` is not positive
    /// - `CalibrationError::NoFeasiblePoint` if the fallback could not
    ///   price any trial point
    /// - oracle errors when repricing at the root
    pub fn fit_inverse(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        mean_reversion: f64,
        target: f64,
    ) -> Result<CalibrationResult, CalibrationError> {
        HullWhiteParams::new(mean_reversion, self.config.sigma_seed)?;
        info!(target, mean_reversion, "inverse calibration to target value");

        let (lo, hi) = self.config.inverse_bracket;
        let brent = BrentSolver::new(SolverConfig::new(
            self.config.inverse_tolerance,
            self.config.inverse_max_iterations,
        ));
        let mut evaluations = 0usize;
        let root = brent.find_root_with(
            |x: f64| -> Result<f64, CalibrationError> {
                evaluations += 1;
                let params = HullWhiteParams::new(mean_reversion, x.exp())?;
                let price = self.oracle.price(swaption, curve, &params)?;
                debug!(sigma = x.exp(), price, "inverse trial");
                Ok(price - target)
            },
            lo.ln(),
            hi.ln(),
        );

        match root {
            Ok(x) => {
                let params = HullWhiteParams::new(mean_reversion, x.exp())?;
                let residual = self.oracle.price(swaption, curve, &params)? - target;
                info!(
                    sigma = params.volatility(),
                    residual, evaluations, "inverse calibration converged"
                );
                Ok(CalibrationResult {
                    params,
                    objective: residual * residual,
                    iterations: evaluations,
                    converged: true,
                    method: CalibrationMethod::Inverse,
                })
            }
            Err(err) => {
                warn!(
                    error = %err,
                    sigma_lo = lo,
                    sigma_hi = hi,
                    "bracketed inverse search failed, falling back to simplex"
                );
                self.fit_inverse_fallback(swaption, curve, mean_reversion, target)
            }
        }
    }

    fn fit_inverse_fallback(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        mean_reversion: f64,
        target: f64,
    ) -> Result<CalibrationResult, CalibrationError> {
        let solver = NelderMeadSolver::new(NelderMeadConfig::new(
            self.config.fallback_max_iterations,
        ));
        let outcome = solver.minimize(
            |x: &[f64]| {
                let sigma = sigma_from_log(x[0]);
                let priced = HullWhiteParams::new(mean_reversion, sigma)
                    .map_err(CalibrationError::from)
                    .and_then(|p| Ok(self.oracle.price(swaption, curve, &p)?));
                match priced {
                    Ok(price) if price.is_finite() => (price - target).powi(2),
                    Ok(_) => PENALTY,
                    Err(err) => {
                        debug!(error = %err, sigma, "inverse trial failed");
                        PENALTY
                    }
                }
            },
            &[self.config.fallback_sigma_seed.ln()],
        )?;

        let params = HullWhiteParams::new(mean_reversion, sigma_from_log(outcome.x[0]))?;
        finish(CalibrationMethod::InverseFallback, params, &outcome)
    }

    fn scored(
        &self,
        basket: &[BasketEntry],
        curve: &DiscountCurve,
        mean_reversion: f64,
        sigma: f64,
    ) -> f64 {
        let value = HullWhiteParams::new(mean_reversion, sigma)
            .map_err(CalibrationError::from)
            .and_then(|params| self.objective(basket, curve, &params));
        match value {
            Ok(v) if v.is_finite() => {
                debug!(mean_reversion, sigma, objective = v, "trial");
                v
            }
            Ok(v) => {
                debug!(mean_reversion, sigma, objective = v, "non-finite objective");
                PENALTY
            }
            Err(err) => {
                debug!(error = %err, mean_reversion, sigma, "trial failed");
                PENALTY
            }
        }
    }
}

fn finish(
    method: CalibrationMethod,
    params: HullWhiteParams,
    outcome: &NelderMeadResult<f64>,
) -> Result<CalibrationResult, CalibrationError> {
    if outcome.fun >= PENALTY {
        return Err(CalibrationError::NoFeasiblePoint {
            method: method.name(),
        });
    }
    if outcome.converged {
        info!(
            %method,
            a = params.mean_reversion(),
            sigma = params.volatility(),
            objective = outcome.fun,
            iterations = outcome.iterations,
            "calibration converged"
        );
    } else {
        warn!(
            %method,
            a = params.mean_reversion(),
            sigma = params.volatility(),
            objective = outcome.fun,
            iterations = outcome.iterations,
            "calibration did not converge, using best point"
        );
    }
    Ok(CalibrationResult {
        params,
        objective: outcome.fun,
        iterations: outcome.iterations,
        converged: outcome.converged,
        method,
    })
}
