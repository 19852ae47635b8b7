//! Pricing models
//!
//! Implements:
//! - Black-Scholes (closed-form European call and put)

pub mod black_scholes;

pub use black_scholes::*;
