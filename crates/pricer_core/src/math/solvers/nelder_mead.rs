//! Nelder-Mead downhill simplex minimiser.

use super::NelderMeadConfig;
use crate::types::SolverError;
use num_traits::Float;
use std::cmp::Ordering;

/// Outcome of a Nelder-Mead minimisation.
///
/// Non-convergence is reported through `converged` rather than an error:
/// callers that can live with the best vertex found so far use `x` as is.
#[derive(Debug, Clone, PartialEq)]
pub struct NelderMeadResult<T: Float> {
    /// Best vertex found.
    pub x: Vec<T>,
    /// Objective value at `x`.
    pub fun: T,
    /// Simplex iterations performed (the initial simplex counts as one).
    pub iterations: usize,
    /// Objective evaluations performed.
    pub evaluations: usize,
    /// True when both tolerance tests passed before a budget ran out.
    pub converged: bool,
}

/// Derivative-free simplex minimiser.
///
/// Standard coefficients (reflection 1, expansion 2, contraction 0.5,
/// shrink 0.5). The initial simplex perturbs each coordinate of the seed
/// by 5%, or sets it to 0.00025 when it is zero.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NelderMeadConfig, NelderMeadSolver};
///
/// let solver = NelderMeadSolver::new(NelderMeadConfig::new(500).with_tolerances(1e-10, 1e-12));
/// let rosen = |p: &[f64]| (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0] * p[0]).powi(2);
///
/// let result = solver.minimize(rosen, &[-1.2, 1.0]).unwrap();
/// assert!(result.converged);
/// assert!((result.x[0] - 1.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct NelderMeadSolver<T: Float> {
    config: NelderMeadConfig<T>,
}

impl<T: Float> NelderMeadSolver<T> {
    /// Create a new minimiser with the given configuration.
    pub fn new(config: NelderMeadConfig<T>) -> Self {
        Self { config }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &NelderMeadConfig<T> {
        &self.config
    }

    /// Minimise `f` starting from `x0`.
    ///
    /// # Errors
    ///
    /// `SolverError::NumericalInstability` when `x0` is empty. Exhausting
    /// the iteration or evaluation budget is not an error.
    pub fn minimize<F>(&self, mut f: F, x0: &[T]) -> Result<NelderMeadResult<T>, SolverError>
    where
        F: FnMut(&[T]) -> T,
    {
        let n = x0.len();
        if n == 0 {
            return Err(SolverError::NumericalInstability(
                "Nelder-Mead needs at least one parameter".to_string(),
            ));
        }

        let one = T::one();
        let half = T::from(0.5).unwrap_or_else(|| one / (one + one));
        let two = one + one;
        let nonzdelt = T::from(0.05).unwrap_or_else(T::epsilon);
        let zdelt = T::from(0.00025).unwrap_or_else(T::epsilon);

        let mut evaluations = 0usize;
        let mut eval = |x: &[T], evaluations: &mut usize| {
            *evaluations += 1;
            f(x)
        };

        let mut sim: Vec<Vec<T>> = Vec::with_capacity(n + 1);
        sim.push(x0.to_vec());
        for k in 0..n {
            let mut y = x0.to_vec();
            y[k] = if y[k] != T::zero() {
                (one + nonzdelt) * y[k]
            } else {
                zdelt
            };
            sim.push(y);
        }
        let mut fsim: Vec<T> = sim.iter().map(|v| eval(v, &mut evaluations)).collect();
        sort_simplex(&mut sim, &mut fsim);

        let mut iterations = 1usize;
        let mut converged = false;

        while evaluations < self.config.max_evaluations && iterations < self.config.max_iterations
        {
            if self.has_converged(&sim, &fsim) {
                converged = true;
                break;
            }

            // Centroid of all vertices except the worst
            let mut xbar = vec![T::zero(); n];
            for vertex in &sim[..n] {
                for (c, &v) in xbar.iter_mut().zip(vertex) {
                    *c = *c + v;
                }
            }
            let nf = T::from(n).unwrap_or(one);
            for c in xbar.iter_mut() {
                *c = *c / nf;
            }

            let worst = sim[n].clone();
            let along = |t: T| -> Vec<T> {
                xbar.iter()
                    .zip(&worst)
                    .map(|(&b, &w)| (one + t) * b - t * w)
                    .collect()
            };

            let xr = along(one);
            let fxr = eval(&xr, &mut evaluations);
            let mut shrink = false;

            if fxr < fsim[0] {
                let xe = along(two);
                let fxe = eval(&xe, &mut evaluations);
                if fxe < fxr {
                    sim[n] = xe;
                    fsim[n] = fxe;
                } else {
                    sim[n] = xr;
                    fsim[n] = fxr;
                }
            } else if fxr < fsim[n - 1] {
                sim[n] = xr;
                fsim[n] = fxr;
            } else if fxr < fsim[n] {
                // outside contraction
                let xc = along(half);
                let fxc = eval(&xc, &mut evaluations);
                if fxc <= fxr {
                    sim[n] = xc;
                    fsim[n] = fxc;
                } else {
                    shrink = true;
                }
            } else {
                // inside contraction
                let xcc = along(-half);
                let fxcc = eval(&xcc, &mut evaluations);
                if fxcc < fsim[n] {
                    sim[n] = xcc;
                    fsim[n] = fxcc;
                } else {
                    shrink = true;
                }
            }

            if shrink {
                let best = sim[0].clone();
                for j in 1..=n {
                    sim[j] = best
                        .iter()
                        .zip(&sim[j])
                        .map(|(&b, &v)| b + half * (v - b))
                        .collect();
                    fsim[j] = eval(&sim[j], &mut evaluations);
                }
            }

            iterations += 1;
            sort_simplex(&mut sim, &mut fsim);
        }

        if !converged && self.has_converged(&sim, &fsim) {
            converged = true;
        }

        Ok(NelderMeadResult {
            x: sim.swap_remove(0),
            fun: fsim[0],
            iterations,
            evaluations,
            converged,
        })
    }

    fn has_converged(&self, sim: &[Vec<T>], fsim: &[T]) -> bool {
        let best = &sim[0];
        let x_spread = sim[1..]
            .iter()
            .flat_map(|v| v.iter().zip(best).map(|(&a, &b)| (a - b).abs()))
            .fold(T::zero(), T::max);
        let f_spread = fsim[1..]
            .iter()
            .map(|&fv| (fsim[0] - fv).abs())
            .fold(T::zero(), T::max);
        x_spread <= self.config.xatol && f_spread <= self.config.fatol
    }
}

/// Stable sort of the simplex by objective value, best first.
fn sort_simplex<T: Float>(sim: &mut Vec<Vec<T>>, fsim: &mut Vec<T>) {
    let mut order: Vec<usize> = (0..fsim.len()).collect();
    order.sort_by(|&i, &j| fsim[i].partial_cmp(&fsim[j]).unwrap_or(Ordering::Equal));
    *sim = order.iter().map(|&i| sim[i].clone()).collect();
    *fsim = order.iter().map(|&i| fsim[i]).collect();
}
