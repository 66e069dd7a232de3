//! Numerical building blocks: interpolation and solvers.

pub mod interpolators;
pub mod solvers;
