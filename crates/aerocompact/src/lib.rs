//! Compact JSON exports of the OurAirports airport and runway datasets.
//!
//! The two normalizers in [`data::ourairports`] turn loosely structured CSV
//! rows into small documents meant to be shipped with a client application.
//! The [`data::elevation`] module fills missing elevations into an existing
//! document through a remote lookup service.

#[cfg(feature = "cli")]
pub mod cli;
pub mod data;
pub mod error;

pub use error::{Error, Result};
