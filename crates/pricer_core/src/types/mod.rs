//! Core time, calendar and error types.
//!
//! This module provides:
//! - `time`: [`Date`], [`DayCountConvention`], [`BusinessDayConvention`]
//! - `calendar`: [`Calendar`] holiday rules and date rolling
//! - `error`: Structured error types for dates, conventions, interpolation and solvers

pub mod calendar;
pub mod error;
pub mod time;

pub use calendar::Calendar;
pub use error::{ConventionError, DateError, InterpolationError, SolverError};
pub use time::{BusinessDayConvention, Date, DayCountConvention};
