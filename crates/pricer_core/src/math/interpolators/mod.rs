//! Interpolation methods for market data lookups.
//!
//! - [`BilinearInterpolator`]: clamped 2D grid interpolation used by the
//!   expiry x tenor volatility surface
//!
//! The interpolator is generic over `T: num_traits::Float`.

mod bilinear;

pub use bilinear::BilinearInterpolator;
