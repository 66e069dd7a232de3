//! Solver configuration types.

use num_traits::Float;

/// Configuration for bracketing root finders.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(config.max_iterations, 100);
///
/// let tight = SolverConfig::new(1e-12, 200);
/// assert_eq!(tight.tolerance, 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Absolute tolerance on the root location.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// `tolerance = 1e-10`, `max_iterations = 100`.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }
}

/// Configuration for the Nelder-Mead simplex minimiser.
///
/// Convergence requires both the simplex spread in parameter space to be
/// within `xatol` and the spread of objective values to be within `fatol`.
///
/// ```
/// use pricer_core::math::solvers::NelderMeadConfig;
///
/// let config = NelderMeadConfig::new(500).with_tolerances(1e-8, 1e-8);
/// assert_eq!(config.max_iterations, 500);
/// assert_eq!(config.xatol, 1e-8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelderMeadConfig<T: Float> {
    /// Maximum number of simplex iterations.
    pub max_iterations: usize,
    /// Maximum number of objective evaluations.
    pub max_evaluations: usize,
    /// Absolute tolerance on the simplex vertices.
    pub xatol: T,
    /// Absolute tolerance on the objective values.
    pub fatol: T,
}

impl<T: Float> NelderMeadConfig<T> {
    /// Iteration cap with `xatol = fatol = 1e-4` and no evaluation cap.
    pub fn new(max_iterations: usize) -> Self {
        let default_tol = T::from(1e-4).unwrap_or_else(T::epsilon);
        Self {
            max_iterations,
            max_evaluations: usize::MAX,
            xatol: default_tol,
            fatol: default_tol,
        }
    }

    /// Sets both convergence tolerances.
    pub fn with_tolerances(mut self, xatol: T, fatol: T) -> Self {
        self.xatol = xatol;
        self.fatol = fatol;
        self
    }

    /// Sets the evaluation budget.
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }
}

impl<T: Float> Default for NelderMeadConfig<T> {
    fn default() -> Self {
        Self::new(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_config_default() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert_eq!(config.tolerance, 1e-10);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_nelder_mead_builder() {
        let config: NelderMeadConfig<f64> = NelderMeadConfig::new(300)
            .with_tolerances(1e-6, 1e-7)
            .with_max_evaluations(1000);
        assert_eq!(config.max_iterations, 300);
        assert_eq!(config.max_evaluations, 1000);
        assert_eq!(config.xatol, 1e-6);
        assert_eq!(config.fatol, 1e-7);
    }

    #[test]
    fn test_nelder_mead_default_budget() {
        let config: NelderMeadConfig<f64> = NelderMeadConfig::new(500);
        assert_eq!(config.max_evaluations, usize::MAX);
        assert_eq!(config.xatol, 1e-4);
    }
}
