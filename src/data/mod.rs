//! Market data
//!
//! Handles:
//! - The provider abstraction the reports consume
//! - Yahoo Finance API for spot prices and option chains
//! - A fixed in-memory source for replay and tests

pub mod source;
pub mod yahoo;

pub use source::*;
pub use yahoo::*;
