//! Black-Scholes Model
//!
//! Closed-form European call and put prices on a non-dividend-paying
//! underlying.
//!
//! The normal CDF is evaluated through the complementary error function,
//! `Φ(x) = erfc(-x/√2) / 2`, which keeps absolute error below 1e-7 over the
//! whole real line and avoids cancellation in the far tails.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

use crate::core::{BsError, BsResult, OptionType, PricingInput, PricingResult};

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> f64 {
    d1(spot, strike, time, rate, vol) - vol * time.sqrt()
}

/// Black-Scholes call and put prices.
///
/// Rejects non-positive or non-finite spot, strike, time and volatility
/// (and a non-finite rate) with `BsError::InvalidInput`. Inputs that pass
/// those checks but overflow or underflow the closed form (`vol * sqrt(T)`
/// rounding to zero, `exp(-rT)` overflowing) are rejected the same way, so
/// an `Ok` result is always finite.
pub fn price(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> BsResult<PricingResult> {
    PricingInput::new(spot, strike, time, rate, vol).price()
}

/// Call price only
pub fn call_price(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> BsResult<f64> {
    Ok(price(spot, strike, time, rate, vol)?.call)
}

/// Put price only
pub fn put_price(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> BsResult<f64> {
    Ok(price(spot, strike, time, rate, vol)?.put)
}

/// Price of a single side
pub fn price_option(input: &PricingInput, option_type: OptionType) -> BsResult<f64> {
    Ok(input.price()?.get(option_type))
}

impl PricingInput {
    /// Evaluate the closed form for these inputs
    pub fn price(&self) -> BsResult<PricingResult> {
        self.validate()?;

        let PricingInput {
            spot,
            strike,
            time_to_expiry: time,
            risk_free_rate: rate,
            volatility: vol,
        } = *self;

        let total_vol = vol * time.sqrt();
        if total_vol <= 0.0 {
            return Err(BsError::invalid_input(format!(
                "vol * sqrt(T) underflows to zero (vol {}, T {})",
                vol, time
            )));
        }

        let d1 = d1(spot, strike, time, rate, vol);
        let d2 = d1 - total_vol;
        let discounted_strike = strike * self.discount_factor();

        let call = spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2);
        let put = discounted_strike * norm_cdf(-d2) - spot * norm_cdf(-d1);

        if !(call.is_finite() && put.is_finite()) {
            return Err(BsError::invalid_input(format!(
                "prices are not finite for {:?} (call {}, put {})",
                self, call, put
            )));
        }

        Ok(PricingResult { call, put })
    }
}
