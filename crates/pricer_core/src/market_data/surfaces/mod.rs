//! Volatility surfaces.
//!
//! - [`AtmNormalVolSurface`]: ATM normal vols by expiry and tail tenor

mod atm_normal;

pub use atm_normal::AtmNormalVolSurface;
