//! At-the-money normal volatility surface for swaptions.

use crate::market_data::error::MarketDataError;
use crate::math::interpolators::BilinearInterpolator;

/// ATM normal (Bachelier) volatilities on an expiry × tail tenor grid.
///
/// Both axes are in years and volatilities in decimal rate units
/// (50bp = 0.0050). Lookups are bilinear and clamped to the grid, so any
/// `(expiry, tenor)` query returns a value.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::AtmNormalVolSurface;
///
/// let surface = AtmNormalVolSurface::new(
///     vec![1.0, 5.0],
///     vec![2.0, 10.0],
///     vec![vec![0.0060, 0.0058], vec![0.0055, 0.0052]],
/// )
/// .unwrap();
///
/// assert_eq!(surface.volatility(1.0, 2.0), 0.0060);
/// assert_eq!(surface.volatility(30.0, 30.0), 0.0052);
/// ```
#[derive(Debug, Clone)]
pub struct AtmNormalVolSurface {
    grid: BilinearInterpolator<f64>,
}

impl AtmNormalVolSurface {
    /// Build from axis values and `vols[expiry_idx][tenor_idx]`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::Interpolation` when an axis is empty or not
    /// strictly increasing, or the grid shape does not match the axes.
    pub fn new(
        expiries: Vec<f64>,
        tenors: Vec<f64>,
        vols: Vec<Vec<f64>>,
    ) -> Result<Self, MarketDataError> {
        let rows: Vec<&[f64]> = vols.iter().map(Vec::as_slice).collect();
        let grid = BilinearInterpolator::new(&expiries, &tenors, &rows)?;
        Ok(Self { grid })
    }

    /// Surface with the same volatility everywhere.
    pub fn flat(vol: f64) -> Result<Self, MarketDataError> {
        Self::new(vec![1.0], vec![1.0], vec![vec![vol]])
    }

    /// Interpolated volatility for an option expiring in `expiry` years on
    /// a swap with `tenor` years remaining.
    #[inline]
    pub fn volatility(&self, expiry: f64, tenor: f64) -> f64 {
        self.grid.interpolate(expiry, tenor)
    }

    /// Expiry axis in years.
    pub fn expiries(&self) -> &[f64] {
        self.grid.xs()
    }

    /// Tail tenor axis in years.
    pub fn tenors(&self) -> &[f64] {
        self.grid.ys()
    }

    /// Volatility grid, one row per expiry.
    pub fn vols(&self) -> &[Vec<f64>] {
        self.grid.zs()
    }
}
