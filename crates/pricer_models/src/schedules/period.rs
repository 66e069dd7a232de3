//! Period definition for scheduled instruments.

use pricer_core::types::{Date, DayCountConvention};
use std::fmt;

/// A single accrual period with start, end and payment dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    start: Date,
    end: Date,
    payment: Date,
    day_count: DayCountConvention,
}

impl Period {
    /// Creates a new period.
    #[inline]
    pub fn new(start: Date, end: Date, payment: Date, day_count: DayCountConvention) -> Self {
        Self {
            start,
            end,
            payment,
            day_count,
        }
    }

    /// Accrual start date.
    #[inline]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Accrual end date.
    #[inline]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Payment date.
    #[inline]
    pub fn payment(&self) -> Date {
        self.payment
    }

    /// Accrual day count.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Accrual fraction of the period.
    #[inline]
    pub fn year_fraction(&self) -> f64 {
        self.day_count.year_fraction(self.start, self.end)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Period({} to {}, pay {}, {})",
            self.start,
            self.end,
            self.payment,
            self.day_count.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_and_year_fraction() {
        let period = Period::new(
            Date::from_ymd(2025, 1, 15).unwrap(),
            Date::from_ymd(2025, 7, 15).unwrap(),
            Date::from_ymd(2025, 7, 17).unwrap(),
            DayCountConvention::Actual365Fixed,
        );
        assert_eq!(period.payment(), Date::from_ymd(2025, 7, 17).unwrap());
        assert!((period.year_fraction() - 181.0 / 365.0).abs() < 1e-14);
    }

    #[test]
    fn test_display() {
        let period = Period::new(
            Date::from_ymd(2025, 1, 15).unwrap(),
            Date::from_ymd(2025, 7, 15).unwrap(),
            Date::from_ymd(2025, 7, 17).unwrap(),
            DayCountConvention::Thirty360,
        );
        assert_eq!(
            period.to_string(),
            "Period(2025-01-15 to 2025-07-15, pay 2025-07-17, 30/360)"
        );
    }
}
