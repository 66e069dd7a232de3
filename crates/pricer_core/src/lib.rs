//! # pricer_core: Foundation layer of the Bermudan swaption engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Dates, day counts, business day conventions and holiday calendars (`types`)
//! - Structured error types shared by the upper layers (`types::error`)
//! - Bilinear interpolation, Brent root finding and Nelder-Mead minimisation (`math`)
//! - Discount curves and ATM normal volatility surfaces (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error enums
//! - tracing: Data-quality warnings during curve validation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{BusinessDayConvention, Calendar, Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2025, 3, 17).unwrap();
//! let end = start.add_months(6).unwrap();
//! let tau = DayCountConvention::Actual365Fixed.year_fraction(start, end);
//! assert!((tau - 184.0 / 365.0).abs() < 1e-12);
//!
//! let paid = Calendar::Canada
//!     .advance_business_days(end, 2, BusinessDayConvention::ModifiedFollowing)
//!     .unwrap();
//! assert!(paid > end);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for dates, conventions, calendars and curve nodes

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
