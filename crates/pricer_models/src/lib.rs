//! # Pricer Models (L2: Business Logic)
//!
//! Instruments and models for the Bermudan swaption engine.
//!
//! This crate provides:
//! - Fixed leg schedule generation ([`schedules`])
//! - OIS swaps, their discounting pricer and swaptions ([`instruments`])
//! - Normal distribution and Bachelier swaption formulas ([`analytical`])
//! - Hull-White one-factor parameters and bond formulas ([`models`])

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
pub mod schedules;
