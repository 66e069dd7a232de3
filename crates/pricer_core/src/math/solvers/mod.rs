//! Root-finding and minimisation solvers used by model calibration.
//!
//! ## Available Solvers
//!
//! - [`BrentSolver`]: Robust bracketing root finder without derivatives
//! - [`NelderMeadSolver`]: Derivative-free simplex minimiser
//!
//! ## Configuration
//!
//! Root finders use [`SolverConfig`] (`tolerance`, `max_iterations`).
//! The simplex minimiser uses [`NelderMeadConfig`], which adds separate
//! parameter and objective tolerances and an evaluation budget.
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 (find √2)
//! let solver = BrentSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```
//!
//! ```
//! use pricer_core::math::solvers::{NelderMeadConfig, NelderMeadSolver};
//!
//! // Minimise (p[0] - 2)² + (p[1] - 3)²
//! let solver = NelderMeadSolver::new(NelderMeadConfig::new(400).with_tolerances(1e-9, 1e-12));
//! let result = solver
//!     .minimize(|p: &[f64]| (p[0] - 2.0).powi(2) + (p[1] - 3.0).powi(2), &[0.0, 0.0])
//!     .unwrap();
//!
//! assert!(result.converged);
//! assert!((result.x[0] - 2.0).abs() < 1e-6);
//! ```

mod brent;
mod config;
mod nelder_mead;

pub use brent::BrentSolver;
pub use config::{NelderMeadConfig, SolverConfig};
pub use nelder_mead::{NelderMeadResult, NelderMeadSolver};
