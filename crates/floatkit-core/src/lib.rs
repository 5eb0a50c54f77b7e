//! Shared foundations for the floatkit containers.
//!
//! This crate holds the pieces every floatkit container agrees on:
//!
//! - [`Error`] - the error taxonomy returned by every fallible operation
//! - [`Rejected`] - an error that hands an owned argument back to the caller
//! - [`GrowthPolicy`] and [`TableConfig`] - per-instance tuning knobs
//! - [`Measure`] - uniform size / allocation queries across container types

#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod config;
pub mod error;
pub mod measure;

pub use config::{GrowthPolicy, TableConfig};
pub use error::{Error, ErrorKind, Rejected, Result};
pub use measure::Measure;
