//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Combines bisection, secant steps and inverse quadratic extrapolation.
/// Guaranteed to converge for continuous functions with a valid bracket.
/// Terminates when the bracket half-width falls below
/// `(tolerance + 4ε|x|) / 2`, i.e. `tolerance` is an absolute tolerance on
/// the root location, not on `f`.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::new(1e-12, 100));
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!(f(root).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` in the bracket [a, b].
    ///
    /// # Errors
    ///
    /// * `SolverError::NoBracket` - `f(a)` and `f(b)` have the same sign
    /// * `SolverError::MaxIterationsExceeded` - Failed to converge
    /// * `SolverError::NumericalInstability` - `f` returned a non-finite value
    pub fn find_root<F>(&self, mut f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: FnMut(T) -> T,
    {
        self.find_root_with(|x| Ok::<T, SolverError>(f(x)), a, b)
    }

    /// Fallible variant of [`BrentSolver::find_root`].
    ///
    /// The first error returned by `f` aborts the search and is passed
    /// through unchanged.
    pub fn find_root_with<F, E>(&self, mut f: F, a: T, b: T) -> Result<T, E>
    where
        F: FnMut(T) -> Result<T, E>,
        E: From<SolverError>,
    {
        let two = T::one() + T::one();
        let three = two + T::one();
        let rtol = (two + two) * T::epsilon();
        let xtol = self.config.tolerance;

        let mut xpre = a;
        let mut xcur = b;
        let mut fpre = checked(f(xpre)?, xpre)?;
        let mut fcur = checked(f(xcur)?, xcur)?;

        if fpre * fcur > T::zero() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            }
            .into());
        }
        if fpre == T::zero() {
            return Ok(xpre);
        }
        if fcur == T::zero() {
            return Ok(xcur);
        }

        let mut xblk = T::zero();
        let mut fblk = T::zero();
        let mut spre = T::zero();
        let mut scur = T::zero();

        for _ in 0..self.config.max_iterations {
            if fpre != T::zero()
                && fcur != T::zero()
                && (fpre < T::zero()) != (fcur < T::zero())
            {
                xblk = xpre;
                fblk = fpre;
                spre = xcur - xpre;
                scur = spre;
            }

            // Keep the best estimate in xcur
            if fblk.abs() < fcur.abs() {
                xpre = xcur;
                xcur = xblk;
                xblk = xpre;
                fpre = fcur;
                fcur = fblk;
                fblk = fpre;
            }

            let delta = (xtol + rtol * xcur.abs()) / two;
            let sbis = (xblk - xcur) / two;
            if fcur == T::zero() || sbis.abs() < delta {
                return Ok(xcur);
            }

            if spre.abs() > delta && fcur.abs() < fpre.abs() {
                let stry = if xpre == xblk {
                    // secant
                    -fcur * (xcur - xpre) / (fcur - fpre)
                } else {
                    // inverse quadratic extrapolation
                    let dpre = (fpre - fcur) / (xpre - xcur);
                    let dblk = (fblk - fcur) / (xblk - xcur);
                    -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
                };

                if two * stry.abs() < spre.abs().min(three * sbis.abs() - delta) {
                    spre = scur;
                    scur = stry;
                } else {
                    spre = sbis;
                    scur = sbis;
                }
            } else {
                spre = sbis;
                scur = sbis;
            }

            xpre = xcur;
            fpre = fcur;
            if scur.abs() > delta {
                xcur = xcur + scur;
            } else if sbis > T::zero() {
                xcur = xcur + delta;
            } else {
                xcur = xcur - delta;
            }

            fcur = checked(f(xcur)?, xcur)?;
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        }
        .into())
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

fn checked<T: Float>(fx: T, x: T) -> Result<T, SolverError> {
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(SolverError::NumericalInstability(format!(
            "objective is not finite at x = {}",
            x.to_f64().unwrap_or(f64::NAN)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_sqrt_2() {
        let solver = BrentSolver::new(SolverConfig::new(1e-12, 100));
        let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-11);
    }

    #[test]
    fn test_find_exp_root() {
        let solver = BrentSolver::new(SolverConfig::new(1e-12, 100));
        let root = solver.find_root(|x: f64| x.exp() - 2.0, 0.0, 1.0).unwrap();
        assert!((root - 2.0_f64.ln()).abs() < 1e-11);
    }

    #[test]
    fn test_bracket_reversed() {
        let solver = BrentSolver::new(SolverConfig::new(1e-12, 100));
        let root = solver.find_root(|x: f64| x * x - 2.0, 2.0, 0.0).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-11);
    }

    #[test]
    fn test_log_space_bracket() {
        // Shape of the inverse volatility fit: monotone in ln(sigma)
        let target = 0.0123;
        let solver = BrentSolver::new(SolverConfig::new(1e-12, 100));
        let root = solver
            .find_root(|x: f64| 1e4 * x.exp() - 1e4 * target, 0.001_f64.ln(), 0.05_f64.ln())
            .unwrap();
        assert!((root.exp() - target).abs() < 1e-12);
    }

    #[test]
    fn test_no_bracket_same_sign() {
        let solver = BrentSolver::new(SolverConfig::default());
        match solver.find_root(|x: f64| x * x + 1.0, -1.0, 1.0) {
            Err(SolverError::NoBracket { a, b }) => {
                assert_eq!(a, -1.0);
                assert_eq!(b, 1.0);
            }
            other => panic!("Expected NoBracket error, got {:?}", other),
        }
    }

    #[test]
    fn test_root_at_bracket_endpoint() {
        let solver = BrentSolver::new(SolverConfig::default());
        let root = solver.find_root(|x: f64| x - 1.0, 0.0, 1.0).unwrap();
        assert_eq!(root, 1.0);
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let solver = BrentSolver::new(SolverConfig::new(0.0, 3));
        match solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0) {
            Err(SolverError::MaxIterationsExceeded { iterations }) => assert_eq!(iterations, 3),
            other => panic!("Expected MaxIterationsExceeded error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_objective() {
        let solver = BrentSolver::new(SolverConfig::default());
        let result = solver.find_root(|_x: f64| f64::NAN, 0.0, 1.0);
        assert!(matches!(result, Err(SolverError::NumericalInstability(_))));
    }

    #[derive(Debug, PartialEq)]
    enum OracleError {
        Failed,
        Solver(SolverError),
    }

    impl From<SolverError> for OracleError {
        fn from(err: SolverError) -> Self {
            OracleError::Solver(err)
        }
    }

    #[test]
    fn test_fallible_objective_propagates_error() {
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();
        let mut calls = 0;
        let result = solver.find_root_with(
            |x: f64| {
                calls += 1;
                if calls > 2 {
                    Err(OracleError::Failed)
                } else {
                    Ok(x - 0.3)
                }
            },
            0.0,
            1.0,
        );
        assert_eq!(result, Err(OracleError::Failed));
    }

    #[test]
    fn test_fallible_objective_maps_solver_error() {
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();
        let result = solver.find_root_with(|x: f64| Ok::<f64, OracleError>(x * x + 1.0), 0.0, 1.0);
        assert!(matches!(
            result,
            Err(OracleError::Solver(SolverError::NoBracket { .. }))
        ));
    }

    #[test]
    fn test_with_f32() {
        let solver: BrentSolver<f32> = BrentSolver::new(SolverConfig::new(1e-6, 100));
        let root = solver.find_root(|x: f32| x * x - 2.0, 0.0_f32, 2.0_f32).unwrap();
        assert!((root - std::f32::consts::SQRT_2).abs() < 1e-5);
    }
}
