//! Schedule and ScheduleBuilder implementation.

use super::error::ScheduleError;
use super::frequency::Frequency;
use super::period::Period;
use pricer_core::types::{BusinessDayConvention, Calendar, Date, DayCountConvention};

/// Adjusted accrual dates of a fixed leg together with the conventions
/// that produced them.
///
/// A schedule of `n` dates describes `n - 1` consecutive accrual periods.
/// Dates are strictly increasing and there are always at least two.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    dates: Vec<Date>,
    frequency: Frequency,
    day_count: DayCountConvention,
    calendar: Calendar,
    convention: BusinessDayConvention,
}

impl Schedule {
    /// Wraps explicit, already adjusted dates.
    ///
    /// # Errors
    ///
    /// * `NoPeriods` - Fewer than two dates
    /// * `NonIncreasingDates` - Dates are not strictly increasing
    pub fn from_dates(
        dates: Vec<Date>,
        frequency: Frequency,
        day_count: DayCountConvention,
        calendar: Calendar,
        convention: BusinessDayConvention,
    ) -> Result<Self, ScheduleError> {
        if dates.len() < 2 {
            let start = dates
                .first()
                .copied()
                .ok_or(ScheduleError::MissingField { field: "dates" })?;
            return Err(ScheduleError::NoPeriods { start, end: start });
        }
        if let Some(i) = dates.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ScheduleError::NonIncreasingDates { index: i + 1 });
        }
        Ok(Self {
            dates,
            frequency,
            day_count,
            calendar,
            convention,
        })
    }

    /// Schedule dates, first accrual start to last accrual end.
    #[inline]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of schedule dates.
    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false; a schedule holds at least two dates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of accrual periods.
    #[inline]
    pub fn period_count(&self) -> usize {
        self.dates.len() - 1
    }

    /// First accrual start.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.dates[0]
    }

    /// Last accrual end.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Coupon frequency.
    #[inline]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Accrual day count.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Holiday calendar.
    #[inline]
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Business day convention.
    #[inline]
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// True when `date` is one of the schedule dates.
    pub fn contains(&self, date: Date) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// The tail of this schedule starting at `date`.
    ///
    /// `None` unless `date` is a schedule date with at least one period
    /// after it.
    pub fn trailing_from(&self, date: Date) -> Option<Schedule> {
        let idx = self.dates.binary_search(&date).ok()?;
        if idx + 1 >= self.dates.len() {
            return None;
        }
        Some(Self {
            dates: self.dates[idx..].to_vec(),
            ..self.clone()
        })
    }

    /// Accrual periods with payment `payment_lag` business days after each
    /// accrual end.
    pub fn periods(&self, payment_lag: u32) -> Result<Vec<Period>, ScheduleError> {
        let lag = payment_lag.min(i32::MAX as u32) as i32;
        self.dates
            .windows(2)
            .map(|w| {
                let payment = self
                    .calendar
                    .advance_business_days(w[1], lag, self.convention)?;
                Ok(Period::new(w[0], w[1], payment, self.day_count))
            })
            .collect()
    }
}

/// Builder for [`Schedule`] using backward date generation.
///
/// Unadjusted dates are rolled back from the end date in whole multiples
/// of the frequency tenor (so month-end clamping never drifts), any short
/// stub lands at the front, and every date is then adjusted with the
/// business day convention on the calendar. Dates that would coincide
/// after adjustment are generated only once.
///
/// # Example
///
/// ```
/// use pricer_models::schedules::{Frequency, ScheduleBuilder};
/// use pricer_core::types::{Calendar, Date};
///
/// let schedule = ScheduleBuilder::new()
///     .start(Date::from_ymd(2025, 3, 17).unwrap())
///     .end(Date::from_ymd(2030, 3, 17).unwrap())
///     .frequency(Frequency::SemiAnnual)
///     .calendar(Calendar::WeekendsOnly)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.period_count(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    start_date: Option<Date>,
    end_date: Option<Date>,
    frequency: Option<Frequency>,
    day_count: DayCountConvention,
    calendar: Calendar,
    convention: BusinessDayConvention,
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleBuilder {
    /// Builder with ACT/365, the Canada calendar and Modified Following.
    pub fn new() -> Self {
        Self {
            start_date: None,
            end_date: None,
            frequency: None,
            day_count: DayCountConvention::default(),
            calendar: Calendar::default(),
            convention: BusinessDayConvention::default(),
        }
    }

    /// Sets the effective date.
    pub fn start(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the termination date.
    pub fn end(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the coupon frequency.
    pub fn frequency(mut self, freq: Frequency) -> Self {
        self.frequency = Some(freq);
        self
    }

    /// Sets the accrual day count.
    pub fn day_count(mut self, dc: DayCountConvention) -> Self {
        self.day_count = dc;
        self
    }

    /// Sets the holiday calendar.
    pub fn calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention.
    pub fn convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Generates the schedule.
    ///
    /// # Errors
    ///
    /// * `MissingField` - start, end or frequency not set
    /// * `InvalidDateRange` - start is not before end
    /// * `NoPeriods` - adjustment collapsed the schedule to a single date
    pub fn build(self) -> Result<Schedule, ScheduleError> {
        let start = self
            .start_date
            .ok_or(ScheduleError::MissingField { field: "start" })?;
        let end = self
            .end_date
            .ok_or(ScheduleError::MissingField { field: "end" })?;
        let frequency = self
            .frequency
            .ok_or(ScheduleError::MissingField { field: "frequency" })?;

        if start >= end {
            return Err(ScheduleError::InvalidDateRange { start, end });
        }

        let dates = self.generate_backward(start, end, frequency)?;
        if dates.len() < 2 {
            return Err(ScheduleError::NoPeriods { start, end });
        }

        Ok(Schedule {
            dates,
            frequency,
            day_count: self.day_count,
            calendar: self.calendar,
            convention: self.convention,
        })
    }

    fn generate_backward(
        &self,
        start: Date,
        end: Date,
        frequency: Frequency,
    ) -> Result<Vec<Date>, ScheduleError> {
        let adjust = |d: Date| self.calendar.adjust(d, self.convention);
        let step = frequency.months_between_payments() as i32;

        let mut unadjusted = vec![end];
        let mut periods = 1;
        loop {
            let temp = end.add_months(-periods * step)?;
            if temp < start {
                break;
            }
            if let Some(&last) = unadjusted.last() {
                if adjust(last)? != adjust(temp)? {
                    unadjusted.push(temp);
                }
            }
            periods += 1;
        }
        if let Some(&last) = unadjusted.last() {
            if adjust(last)? != adjust(start)? {
                unadjusted.push(start);
            }
        }
        unadjusted.reverse();

        let mut dates = unadjusted
            .into_iter()
            .map(adjust)
            .collect::<Result<Vec<_>, _>>()?;

        // Adjustment may pull the next-to-last date onto or past the end
        let n = dates.len();
        if n >= 3 && dates[n - 2] >= dates[n - 1] {
            dates.remove(n - 2);
        }
        if dates.len() >= 3 && dates[1] <= dates[0] {
            dates.remove(1);
        }
        dates.dedup();

        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn semi_annual(start: Date, end: Date) -> Schedule {
        ScheduleBuilder::new()
            .start(start)
            .end(end)
            .frequency(Frequency::SemiAnnual)
            .build()
            .unwrap()
    }

    #[test]
    fn test_regular_schedule_is_adjusted() {
        let schedule = semi_annual(d(2025, 3, 17), d(2030, 3, 17));
        assert_eq!(schedule.len(), 11);
        assert_eq!(schedule.start_date(), d(2025, 3, 17));
        assert_eq!(schedule.end_date(), d(2030, 3, 18)); // Sunday 17th rolls to Monday
        for date in schedule.dates() {
            assert!(Calendar::Canada.is_business_day(*date));
        }
    }

    #[test]
    fn test_short_front_stub() {
        let schedule = semi_annual(d(2025, 5, 1), d(2027, 3, 15));
        assert_eq!(
            schedule.dates(),
            &[
                d(2025, 5, 1),
                d(2025, 9, 15),
                d(2026, 3, 16), // Sunday 15th
                d(2026, 9, 15),
                d(2027, 3, 15),
            ]
        );
    }

    #[test]
    fn test_month_end_stepping_does_not_drift() {
        let schedule = ScheduleBuilder::new()
            .start(d(2025, 8, 29))
            .end(d(2026, 8, 31))
            .frequency(Frequency::Quarterly)
            .calendar(Calendar::NullCalendar)
            .build()
            .unwrap();
        // Each date is end - k*3M, so day 31 is restored after February
        assert_eq!(
            schedule.dates(),
            &[
                d(2025, 8, 29),
                d(2025, 8, 31),
                d(2025, 11, 30),
                d(2026, 2, 28),
                d(2026, 5, 31),
                d(2026, 8, 31),
            ]
        );
    }

    #[test]
    fn test_modified_following_stays_in_month() {
        let schedule = ScheduleBuilder::new()
            .start(d(2025, 5, 31))
            .end(d(2026, 5, 31))
            .frequency(Frequency::SemiAnnual)
            .calendar(Calendar::WeekendsOnly)
            .build()
            .unwrap();
        // 2025-05-31 Sat -> Fri 30th, 2026-05-31 Sun -> Fri 29th
        assert_eq!(schedule.start_date(), d(2025, 5, 30));
        assert_eq!(schedule.end_date(), d(2026, 5, 29));
        assert_eq!(schedule.period_count(), 2);
    }

    #[test]
    fn test_builder_validation() {
        let missing = ScheduleBuilder::new().start(d(2025, 1, 1)).build();
        assert!(matches!(
            missing,
            Err(ScheduleError::MissingField { field: "end" })
        ));

        let reversed = ScheduleBuilder::new()
            .start(d(2026, 1, 1))
            .end(d(2025, 1, 1))
            .frequency(Frequency::Annual)
            .build();
        assert!(matches!(reversed, Err(ScheduleError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_trailing_from() {
        let schedule = semi_annual(d(2025, 3, 17), d(2027, 3, 17));
        let tail = schedule.trailing_from(d(2026, 3, 17)).unwrap();
        assert_eq!(tail.dates(), &schedule.dates()[2..]);
        assert_eq!(tail.frequency(), Frequency::SemiAnnual);

        assert!(schedule.trailing_from(d(2026, 3, 18)).is_none());
        assert!(schedule.trailing_from(schedule.end_date()).is_none());
    }

    #[test]
    fn test_periods_apply_payment_lag() {
        let schedule = semi_annual(d(2025, 6, 24), d(2025, 12, 24));
        let periods = schedule.periods(2).unwrap();
        assert_eq!(periods.len(), 1);
        // Christmas and Boxing Day are skipped
        assert_eq!(periods[0].payment(), d(2025, 12, 30));
        assert_eq!(periods[0].start(), d(2025, 6, 24));
    }

    #[test]
    fn test_from_dates_validation() {
        let ok = Schedule::from_dates(
            vec![d(2025, 1, 15), d(2025, 7, 15)],
            Frequency::SemiAnnual,
            DayCountConvention::Actual365Fixed,
            Calendar::Canada,
            BusinessDayConvention::ModifiedFollowing,
        );
        assert!(ok.is_ok());

        let bad = Schedule::from_dates(
            vec![d(2025, 7, 15), d(2025, 1, 15)],
            Frequency::SemiAnnual,
            DayCountConvention::Actual365Fixed,
            Calendar::Canada,
            BusinessDayConvention::ModifiedFollowing,
        );
        assert!(matches!(bad, Err(ScheduleError::NonIncreasingDates { index: 1 })));
    }
}
