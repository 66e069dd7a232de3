//! Error types for analytical pricing operations.

use thiserror::Error;

/// Analytical pricing errors.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::NonFiniteInput { name: "forward", value: f64::NAN };
/// assert!(format!("{}", err).contains("forward"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// An input is NaN or infinite.
    #[error("Non-finite input: {name} = {value}")]
    NonFiniteInput {
        /// Name of the offending input
        name: &'static str,
        /// The value supplied
        value: f64,
    },
}
