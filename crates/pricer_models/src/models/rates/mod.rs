//! Interest rate models.
//!
//! - [`HullWhiteParams`]: Hull-White one-factor parameters and analytic
//!   bond formulas

pub mod hull_white;

pub use hull_white::HullWhiteParams;
