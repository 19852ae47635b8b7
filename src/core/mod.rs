//! Core data types
//!
//! Defines fundamental types:
//! - PricingInput / PricingResult: the pricer's inputs and outputs
//! - ChainRow / CallChain: option chain quotes from a market-data source
//! - BsError: the crate's error type

pub mod error;
pub mod option;
pub mod quote;

pub use error::*;
pub use option::*;
pub use quote::*;
