//! Crank-Nicolson engine for swaptions under Hull-White.
//!
//! With `r(t) = x(t) + φ(t)` the value `V(t, x)` solves
//!
//! ```text
//! V_t − a·x·V_x + ½σ²·V_xx − (x + φ(t))·V = 0
//! ```
//!
//! backwards from the last exercise date. The `φ` term is independent of `x`,
//! so each step applies the Crank-Nicolson propagator of the `x`-part and
//! then the exact scalar factor
//!
//! ```text
//! exp(−∫φ) = P(0, t₂)/P(0, t₁) · exp(−∫ σ²/(2a²)·(1 − e^{−as})² ds)
//! ```
//!
//! Central differences inside the grid, upwind first-order convection with
//! no diffusion at the two edges. The price is read at `x = 0`.

use pricer_core::market_data::{DiscountCurve, YieldCurve};
use pricer_models::instruments::rates::Swaption;
use pricer_models::models::HullWhiteParams;

use super::config::FdConfig;
use super::mesher::{space_grid, time_grid, TIME_EPS};
use super::tridiagonal::TridiagonalOperator;
use crate::cashflows::ExerciseCashflows;
use crate::engine::SwaptionEngine;
use crate::error::EngineError;

/// Finite-difference Hull-White engine for European and Bermudan swaptions.
///
/// # Example
/// ```
/// use pricer_pricing::fd::{FdConfig, FdHullWhiteSwaptionEngine};
///
/// let config = FdConfig::builder().time_steps(100).space_steps(101).build().unwrap();
/// let engine = FdHullWhiteSwaptionEngine::new(config).unwrap();
/// assert_eq!(engine.config().space_steps(), 101);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FdHullWhiteSwaptionEngine {
    config: FdConfig,
}

impl FdHullWhiteSwaptionEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: FdConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Grid settings.
    #[inline]
    pub fn config(&self) -> &FdConfig {
        &self.config
    }
}

/// Spatial operator `L = −a·x·∂x + ½σ²·∂xx − x`.
fn spatial_operator(params: &HullWhiteParams, xs: &[f64]) -> TridiagonalOperator {
    let n = xs.len();
    let a = params.mean_reversion();
    let s = params.volatility();
    let dx = xs[1] - xs[0];
    let diffusion = 0.5 * s * s / (dx * dx);

    let mut lower = vec![0.0; n];
    let mut diag = vec![0.0; n];
    let mut upper = vec![0.0; n];
    for (i, &x) in xs.iter().enumerate() {
        let drift = a * x / dx;
        if i == 0 {
            diag[i] = drift - x;
            upper[i] = -drift;
        } else if i == n - 1 {
            diag[i] = -drift - x;
            lower[i] = drift;
        } else {
            lower[i] = diffusion + 0.5 * drift;
            upper[i] = diffusion - 0.5 * drift;
            diag[i] = -2.0 * diffusion - x;
        }
    }
    TridiagonalOperator::new(lower, diag, upper)
}

fn apply_exercise(
    values: &mut [f64],
    xs: &[f64],
    exercise: &ExerciseCashflows,
    params: &HullWhiteParams,
) {
    if exercise.is_empty() {
        return;
    }
    for (v, &x) in values.iter_mut().zip(xs) {
        *v = v.max(exercise.payoff(params, x));
    }
}

impl SwaptionEngine for FdHullWhiteSwaptionEngine {
    fn price(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        params: &HullWhiteParams,
    ) -> Result<f64, EngineError> {
        let Some(live) = swaption.live_after(curve.valuation_date()) else {
            return Ok(0.0);
        };
        let exercises = live
            .exercise()
            .dates()
            .iter()
            .map(|&date| ExerciseCashflows::new(live.underlying(), date, curve))
            .collect::<Result<Vec<_>, _>>()?;
        let Some(last) = exercises.last() else {
            return Ok(0.0);
        };

        let horizon = last.time().max(0.0);
        let mandatory: Vec<f64> = exercises.iter().map(ExerciseCashflows::time).collect();
        let times = time_grid(&mandatory, self.config.time_steps());
        let half_width = self.config.std_devs() * params.factor_variance(horizon).sqrt();
        let xs = space_grid(half_width, self.config.space_steps());
        let op = spatial_operator(params, &xs);

        let mut values: Vec<f64> = xs.iter().map(|&x| last.payoff(params, x)).collect();
        let mut rhs = vec![0.0; xs.len()];
        let mut scratch = vec![0.0; xs.len()];

        let mut next = exercises.len() - 1;
        let mut df_later = curve.discount_factor(horizon)?;
        for k in (1..times.len()).rev() {
            let (t1, t2) = (times[k - 1], times[k]);
            let half_dt = 0.5 * (t2 - t1);

            op.apply_shifted(half_dt, &values, &mut rhs);
            op.solve_shifted(half_dt, &mut rhs, &mut scratch)?;

            let df_earlier = curve.discount_factor(t1)?;
            let growth = df_later / df_earlier * (-params.phi_convexity_integral(t1, t2)).exp();
            for (v, r) in values.iter_mut().zip(&rhs) {
                *v = r * growth;
            }
            df_later = df_earlier;

            while next > 0 && exercises[next - 1].time() >= t1 - TIME_EPS {
                next -= 1;
                apply_exercise(&mut values, &xs, &exercises[next], params);
            }
        }
        // Exercise times that collapse onto t = 0
        while next > 0 {
            next -= 1;
            apply_exercise(&mut values, &xs, &exercises[next], params);
        }

        let price = values[xs.len() / 2];
        if !price.is_finite() {
            return Err(EngineError::NonFinite(price));
        }
        Ok(price)
    }
}
