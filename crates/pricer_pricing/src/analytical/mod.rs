//! Semi-analytical swaption pricing for validating the finite-difference
//! engine.
//!
//! - [`IntegralHullWhiteSwaptionEngine`]: European swaptions by direct
//!   integration of the exercise value against the Gaussian law of `x` under
//!   the exercise-date forward measure

mod integral;

pub use integral::IntegralHullWhiteSwaptionEngine;
