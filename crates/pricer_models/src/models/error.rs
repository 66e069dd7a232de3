//! Model parameter errors.

use thiserror::Error;

/// Invalid model parameters.
///
/// # Examples
/// ```
/// use pricer_models::models::ModelError;
///
/// let err = ModelError::InvalidParameter { name: "mean_reversion", value: -0.1 };
/// assert_eq!(format!("{}", err), "Invalid model parameter: mean_reversion = -0.1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Parameter is out of its admissible domain.
    #[error("Invalid model parameter: {name} = {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },
}
