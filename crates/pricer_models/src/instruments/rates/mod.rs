//! Interest rate instruments.
//!
//! - [`OisSwap`]: fixed versus compounded overnight swap
//! - [`Swaption`]: European or Bermudan option to enter an [`OisSwap`]
//! - [`pricing`]: single-curve discounting valuation of swaps

pub mod pricing;
mod swap;
mod swaption;

pub use pricing::{
    annuity, fixed_leg_bps, par_swap_rate, price_fixed_leg, price_floating_leg, price_ois,
    BASIS_POINT,
};
pub use swap::{OisSwap, SwapDirection};
pub use swaption::Swaption;
