//! Schedule generation for the fixed leg of rates instruments.
//!
//! This module provides:
//! - [`Schedule`]: Adjusted accrual dates with their conventions
//! - [`Period`]: A single accrual period with start, end, and payment dates
//! - [`Frequency`]: Coupon frequency (Annual, SemiAnnual, Quarterly, Monthly)
//! - [`ScheduleBuilder`]: Backward date generation from the termination date
//!
//! # Examples
//!
//! ```
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_core::types::{Calendar, Date};
//!
//! let schedule = ScheduleBuilder::new()
//!     .start(Date::from_ymd(2025, 1, 15).unwrap())
//!     .end(Date::from_ymd(2027, 1, 15).unwrap())
//!     .frequency(Frequency::SemiAnnual)
//!     .calendar(Calendar::NullCalendar)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schedule.period_count(), 4); // 4 semi-annual periods over 2 years
//! ```

mod error;
mod frequency;
mod period;
mod schedule;

pub use error::ScheduleError;
pub use frequency::Frequency;
pub use period::Period;
pub use schedule::{Schedule, ScheduleBuilder};
