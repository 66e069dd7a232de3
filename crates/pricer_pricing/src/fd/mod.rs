//! Finite-difference swaption pricing.
//!
//! - [`FdConfig`]: time and space grid settings
//! - [`FdHullWhiteSwaptionEngine`]: Crank-Nicolson engine on the Hull-White
//!   factor `x`

mod config;
mod hull_white;
mod mesher;
mod tridiagonal;

pub use config::{FdConfig, FdConfigBuilder, MAX_SPACE_STEPS, MAX_TIME_STEPS, MIN_SPACE_STEPS};
pub use hull_white::FdHullWhiteSwaptionEngine;
pub use tridiagonal::TridiagonalOperator;
