//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction, parsing and arithmetic
//! - `ConventionError`: Errors from parsing market conventions
//! - `InterpolationError`: Errors from interpolation grid construction
//! - `SolverError`: Errors from root finders and minimisers

use thiserror::Error;

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g. February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component
        month: u32,
        /// Day component
        day: u32,
    },

    /// Failed to parse a date string.
    #[error("Failed to parse date: {0}")]
    ParseError(String),

    /// Date arithmetic left the representable range.
    #[error("Date arithmetic overflow: {0}")]
    Overflow(String),
}

/// Unknown market convention label.
///
/// Raised when a day count, business day convention, calendar or
/// frequency string does not match any supported variant.
///
/// # Examples
/// ```
/// use pricer_core::types::ConventionError;
///
/// let err = ConventionError::Unknown { kind: "day count", value: "ACT/ACT-ICMA".to_string() };
/// assert!(format!("{}", err).contains("ACT/ACT-ICMA"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConventionError {
    /// Label not recognised.
    #[error("Unknown {kind} convention: {value}")]
    Unknown {
        /// Convention family (e.g. "day count")
        kind: &'static str,
        /// The offending label
        value: String,
    },
}

/// Interpolation-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::InterpolationError;
///
/// let err = InterpolationError::NonMonotonicData { index: 3 };
/// assert!(format!("{}", err).contains("index 3"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Axis is not strictly increasing.
    #[error("Data is not monotonic at index {index}")]
    NonMonotonicData {
        /// Index where monotonicity violation was detected
        index: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Root-finding and minimisation errors.
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Objective returned a non-finite value or the setup is degenerate.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_error_display() {
        let err = DateError::ParseError("bad".to_string());
        assert_eq!(format!("{}", err), "Failed to parse date: bad");
        let err = DateError::Overflow("adding 12 months".to_string());
        assert!(format!("{}", err).contains("12 months"));
    }

    #[test]
    fn test_no_bracket_display() {
        let err = SolverError::NoBracket { a: 1.0, b: 2.0 };
        assert_eq!(format!("{}", err), "No bracket: f(1) and f(2) have same sign");
    }

    #[test]
    fn test_errors_are_std_errors() {
        let _: &dyn std::error::Error = &InterpolationError::InvalidInput("x".into());
        let _: &dyn std::error::Error = &SolverError::NumericalInstability("nan".into());
        let _: &dyn std::error::Error = &ConventionError::Unknown {
            kind: "calendar",
            value: "Mars".into(),
        };
    }
}
