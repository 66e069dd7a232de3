//! The valuation oracle seam.

use pricer_core::market_data::DiscountCurve;
use pricer_models::instruments::rates::Swaption;
use pricer_models::models::HullWhiteParams;

use crate::error::EngineError;

/// Prices a swaption under Hull-White on a discount curve.
///
/// The curve's valuation date is the pricing date: exercise dates on or
/// before it are ignored, and a swaption with no exercise date left prices
/// to zero.
pub trait SwaptionEngine {
    /// Net present value of `swaption` to its holder.
    fn price(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        params: &HullWhiteParams,
    ) -> Result<f64, EngineError>;
}

impl<E: SwaptionEngine + ?Sized> SwaptionEngine for &E {
    fn price(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        params: &HullWhiteParams,
    ) -> Result<f64, EngineError> {
        (**self).price(swaption, curve, params)
    }
}

impl<E: SwaptionEngine + ?Sized> SwaptionEngine for Box<E> {
    fn price(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        params: &HullWhiteParams,
    ) -> Result<f64, EngineError> {
        (**self).price(swaption, curve, params)
    }
}
