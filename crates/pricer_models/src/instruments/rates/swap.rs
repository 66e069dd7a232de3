//! Overnight indexed swap (OIS) definition.
//!
//! The fixed leg follows the accrual schedule; the floating leg compounds the
//! overnight rate over the same periods, so on a single discount curve each
//! floating coupon is `N·(P(s)/P(e) − 1)` paid with the fixed coupon's lag.
//!
//! # Example
//!
//! ```
//! use pricer_models::instruments::rates::{OisSwap, SwapDirection};
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_core::types::Date;
//!
//! let schedule = ScheduleBuilder::new()
//!     .start(Date::from_ymd(2030, 3, 19).unwrap())
//!     .end(Date::from_ymd(2035, 3, 19).unwrap())
//!     .frequency(Frequency::SemiAnnual)
//!     .build()
//!     .unwrap();
//!
//! let swap = OisSwap::new(10_000_000.0, 0.03, SwapDirection::Receiver, schedule, 2).unwrap();
//! assert_eq!(swap.notional(), 10_000_000.0);
//! assert_eq!(swap.direction(), SwapDirection::Receiver);
//! ```

use pricer_core::types::Date;
use std::fmt;
use std::str::FromStr;

use crate::instruments::error::InstrumentError;
use crate::schedules::{Period, Schedule};

/// Side of the fixed leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SwapDirection {
    /// Receive fixed, pay floating.
    #[default]
    Receiver,
    /// Pay fixed, receive floating.
    Payer,
}

impl SwapDirection {
    /// Returns the multiplier for fixed leg cashflows.
    ///
    /// - Receiver: +1 (positive = receive)
    /// - Payer: -1 (negative = pay)
    #[inline]
    pub fn fixed_multiplier(&self) -> f64 {
        match self {
            SwapDirection::Receiver => 1.0,
            SwapDirection::Payer => -1.0,
        }
    }

    /// Returns the direction name.
    pub fn name(&self) -> &'static str {
        match self {
            SwapDirection::Receiver => "Receiver",
            SwapDirection::Payer => "Payer",
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SwapDirection {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "receiver" | "rec" | "r" | "receive" => Ok(SwapDirection::Receiver),
            "payer" | "pay" | "p" => Ok(SwapDirection::Payer),
            _ => Err(InstrumentError::UnknownDirection {
                value: s.to_string(),
            }),
        }
    }
}

/// Fixed-versus-overnight swap on a single accrual schedule.
#[derive(Debug, Clone)]
pub struct OisSwap {
    notional: f64,
    fixed_rate: f64,
    direction: SwapDirection,
    schedule: Schedule,
    payment_lag: u32,
    periods: Vec<Period>,
}

impl OisSwap {
    /// Creates a swap, resolving payment dates `payment_lag` business days
    /// after each accrual end.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidNotional` if the notional is not positive
    /// - `InstrumentError::InvalidFixedRate` if the rate is not finite
    /// - `InstrumentError::Schedule` if a payment date cannot be resolved
    pub fn new(
        notional: f64,
        fixed_rate: f64,
        direction: SwapDirection,
        schedule: Schedule,
        payment_lag: u32,
    ) -> Result<Self, InstrumentError> {
        if !(notional.is_finite() && notional > 0.0) {
            return Err(InstrumentError::InvalidNotional { notional });
        }
        if !fixed_rate.is_finite() {
            return Err(InstrumentError::InvalidFixedRate { rate: fixed_rate });
        }
        let periods = schedule.periods(payment_lag)?;
        Ok(Self {
            notional,
            fixed_rate,
            direction,
            schedule,
            payment_lag,
            periods,
        })
    }

    /// Same terms with a different fixed rate.
    pub fn with_fixed_rate(&self, fixed_rate: f64) -> Result<Self, InstrumentError> {
        if !fixed_rate.is_finite() {
            return Err(InstrumentError::InvalidFixedRate { rate: fixed_rate });
        }
        Ok(Self {
            fixed_rate,
            ..self.clone()
        })
    }

    /// Same terms on a different accrual schedule.
    pub fn with_schedule(&self, schedule: Schedule) -> Result<Self, InstrumentError> {
        Self::new(
            self.notional,
            self.fixed_rate,
            self.direction,
            schedule,
            self.payment_lag,
        )
    }

    /// Notional amount.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Fixed rate (decimal).
    #[inline]
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    /// Fixed leg side.
    #[inline]
    pub fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Accrual schedule shared by both legs.
    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Payment lag in business days.
    #[inline]
    pub fn payment_lag(&self) -> u32 {
        self.payment_lag
    }

    /// Accrual periods with resolved payment dates.
    #[inline]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// First accrual date.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.schedule.start_date()
    }

    /// Final accrual date.
    #[inline]
    pub fn maturity_date(&self) -> Date {
        self.schedule.end_date()
    }
}
