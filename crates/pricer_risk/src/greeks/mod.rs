//! Bump-and-reprice Greeks.
//!
//! - [`GreeksConfig`]: bump sizes and the Theta switch
//! - [`GreekEngine`]: DV01, Gamma, underlying DV01, hedge delta, Vega with
//!   recalibration, one-day Theta
//! - [`GreekSet`]: the results

mod config;
mod engine;
mod result;

pub use config::GreeksConfig;
pub use engine::{CurveSensitivities, GreekEngine};
pub use result::GreekSet;
