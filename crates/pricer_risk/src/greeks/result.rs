//! Greek results.

/// Sensitivities of the Bermudan value, recomputed on every run.
///
/// Units follow the bump conventions: currency per basis point for DV01,
/// Vega and underlying DV01, per basis point squared for Gamma, per
/// calendar day for Theta.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreekSet {
    /// `(P− − P+)/(2h)` under a parallel curve shift.
    pub dv01: f64,
    /// `(P+ − 2·P0 + P−)/h²`.
    pub gamma: f64,
    /// `(V+ − V−)/(2h)` under a surface shift with recalibration.
    pub vega: f64,
    /// `P(val + 1d) − P0`.
    pub theta: f64,
    /// DV01 over underlying DV01; zero when the latter vanishes.
    pub hedge_delta: f64,
    /// DV01 of the underlying swap.
    pub underlying_dv01: f64,
}

impl GreekSet {
    /// Option DV01 expressed in units of the underlying's DV01.
    pub fn hedge_ratio(dv01: f64, underlying_dv01: f64) -> f64 {
        if underlying_dv01.abs() > 1e-12 {
            dv01 / underlying_dv01
        } else {
            0.0
        }
    }
}
