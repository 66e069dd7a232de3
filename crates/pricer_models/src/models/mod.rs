//! Short rate models.

pub mod error;
pub mod rates;

pub use error::ModelError;
pub use rates::HullWhiteParams;
