//! Exercise rights for swaptions.

use pricer_core::types::Date;

use super::error::InstrumentError;
use crate::schedules::Schedule;

/// Exercise right of an option on a swap.
///
/// Bermudan dates are kept sorted and unique.
///
/// # Examples
/// ```
/// use pricer_models::instruments::Exercise;
/// use pricer_core::types::Date;
///
/// let d1 = Date::from_ymd(2030, 3, 18).unwrap();
/// let d2 = Date::from_ymd(2030, 9, 17).unwrap();
/// let exercise = Exercise::bermudan(vec![d2, d1, d2]).unwrap();
/// assert_eq!(exercise.dates(), &[d1, d2]);
/// assert_eq!(exercise.first_date(), d1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exercise {
    /// A single exercise date.
    European(Date),
    /// Several exercise dates.
    Bermudan(Vec<Date>),
}

impl Exercise {
    /// Bermudan exercise on `dates`, sorted and deduplicated.
    ///
    /// # Errors
    /// - `InstrumentError::EmptyExercise` when `dates` is empty
    pub fn bermudan(mut dates: Vec<Date>) -> Result<Self, InstrumentError> {
        dates.sort();
        dates.dedup();
        if dates.is_empty() {
            return Err(InstrumentError::EmptyExercise);
        }
        Ok(Exercise::Bermudan(dates))
    }

    /// Exercise on every accrual date of `schedule` except the last, on or
    /// after `not_before`.
    ///
    /// # Errors
    /// - `InstrumentError::EmptyExercise` when no date qualifies
    pub fn from_schedule(schedule: &Schedule, not_before: Date) -> Result<Self, InstrumentError> {
        let dates = schedule.dates();
        let candidates = &dates[..dates.len().saturating_sub(1)];
        Self::bermudan(
            candidates
                .iter()
                .copied()
                .filter(|d| *d >= not_before)
                .collect(),
        )
    }

    /// Exercise dates in increasing order.
    pub fn dates(&self) -> &[Date] {
        match self {
            Exercise::European(date) => std::slice::from_ref(date),
            Exercise::Bermudan(dates) => dates,
        }
    }

    /// Earliest exercise date.
    pub fn first_date(&self) -> Date {
        self.dates()[0]
    }

    /// Latest exercise date.
    pub fn last_date(&self) -> Date {
        self.dates()[self.dates().len() - 1]
    }

    /// Number of exercise dates.
    #[inline]
    pub fn len(&self) -> usize {
        self.dates().len()
    }

    /// Always false: construction rejects empty schedules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Dates strictly after `date`, or `None` when none remain.
    pub fn live_after(&self, date: Date) -> Option<Exercise> {
        let live: Vec<Date> = self.dates().iter().copied().filter(|d| *d > date).collect();
        match (self, live.len()) {
            (_, 0) => None,
            (Exercise::European(d), _) => Some(Exercise::European(*d)),
            (Exercise::Bermudan(_), _) => Some(Exercise::Bermudan(live)),
        }
    }
}
