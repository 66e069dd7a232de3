//! Schedule generation error types.

use pricer_core::types::{Date, DateError};
use thiserror::Error;

/// Errors that can occur during schedule generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Start date is not before end date.
    #[error("Start date {start} must be before end date {end}")]
    InvalidDateRange {
        /// The start date
        start: Date,
        /// The end date
        end: Date,
    },

    /// Required builder field was not set.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Generation collapsed to fewer than two dates.
    #[error("Schedule would generate no periods between {start} and {end}")]
    NoPeriods {
        /// The start date
        start: Date,
        /// The end date
        end: Date,
    },

    /// Explicit schedule dates are not strictly increasing.
    #[error("Schedule dates must be strictly increasing (at index {index})")]
    NonIncreasingDates {
        /// Index of the first offending date
        index: usize,
    },

    /// Frequency label could not be parsed.
    #[error("Unknown frequency: {value}")]
    UnknownFrequency {
        /// The unparsed label
        value: String,
    },

    /// Date arithmetic failed.
    #[error("Date arithmetic failed: {0}")]
    Date(#[from] DateError),
}
