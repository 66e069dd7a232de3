//! Physically settled option to enter an OIS swap.
//!
//! On exercise at date `t` the holder enters the part of the underlying
//! whose accrual periods start on or after `t`.

use pricer_core::types::Date;

use super::OisSwap;
use crate::instruments::Exercise;

/// Option on an [`OisSwap`] with European or Bermudan exercise.
///
/// Payer or receiver follows the underlying's [`super::SwapDirection`].
#[derive(Debug, Clone)]
pub struct Swaption {
    underlying: OisSwap,
    exercise: Exercise,
}

impl Swaption {
    /// Creates a swaption on `underlying`.
    pub fn new(underlying: OisSwap, exercise: Exercise) -> Self {
        Self {
            underlying,
            exercise,
        }
    }

    /// The swap entered on exercise.
    #[inline]
    pub fn underlying(&self) -> &OisSwap {
        &self.underlying
    }

    /// Exercise right.
    #[inline]
    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    /// Same underlying, exercisable only strictly after `date`.
    ///
    /// `None` when every exercise date has passed.
    pub fn live_after(&self, date: Date) -> Option<Swaption> {
        self.exercise.live_after(date).map(|exercise| Swaption {
            underlying: self.underlying.clone(),
            exercise,
        })
    }

    /// True for more than one exercise date.
    #[inline]
    pub fn is_bermudan(&self) -> bool {
        matches!(self.exercise, Exercise::Bermudan(_))
    }
}
