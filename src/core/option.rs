//! Option pricing inputs and outputs
//!
//! Plain value types shared by the pricer and the reports, plus the
//! calendar helpers that turn an expiry date into a year fraction.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::{BsError, BsResult};

/// Day-count basis used when converting calendar days to years
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

/// The five Black-Scholes inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    /// Spot price of the underlying
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    /// Continuously compounded risk-free rate
    pub risk_free_rate: f64,
    /// Annualised volatility
    pub volatility: f64,
}

impl PricingInput {
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
        }
    }

    /// Check the domain of every input.
    ///
    /// Spot, strike, time and volatility must be finite and strictly
    /// positive; the rate may be any finite number.
    pub fn validate(&self) -> BsResult<()> {
        positive("spot", self.spot)?;
        positive("strike", self.strike)?;
        positive("time to expiry", self.time_to_expiry)?;
        positive("volatility", self.volatility)?;
        if !self.risk_free_rate.is_finite() {
            return Err(BsError::invalid_input(format!(
                "risk-free rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        Ok(())
    }

    /// Discount factor exp(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }
}

fn positive(name: &str, value: f64) -> BsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BsError::invalid_input(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

/// Theoretical call and put prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub call: f64,
    pub put: f64,
}

impl PricingResult {
    pub fn get(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call,
            OptionType::Put => self.put,
        }
    }
}

/// Parse an expiry in `YYYY-MM-DD` form
pub fn parse_expiry(s: &str) -> BsResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
        BsError::invalid_input(format!("expiry '{}' is not a YYYY-MM-DD date: {}", s, e))
    })
}

/// Time to expiry in years from given date.
///
/// Whole calendar days between the two dates over `days_per_year`; no
/// intraday fraction is taken into account.
pub fn time_to_expiry(expiry: NaiveDate, today: NaiveDate, days_per_year: f64) -> f64 {
    let days = (expiry - today).num_days();
    days as f64 / days_per_year
}

/// Time to expiry from today's UTC date on a 365-day basis
pub fn time_to_expiry_now(expiry: NaiveDate) -> f64 {
    time_to_expiry(expiry, Utc::now().date_naive(), DAYS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_option_type() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
    }

    #[test]
    fn test_time_to_expiry() {
        let tte = time_to_expiry(date(2026, 1, 1), date(2025, 1, 1), DAYS_PER_YEAR);
        assert_eq!(tte, 1.0);

        let tte = time_to_expiry(date(2025, 6, 20), date(2025, 1, 20), DAYS_PER_YEAR);
        assert!((tte - 151.0 / 365.0).abs() < 1e-12);

        // Past expiries come out negative, callers reject them
        assert!(time_to_expiry(date(2025, 1, 1), date(2025, 1, 2), DAYS_PER_YEAR) < 0.0);
        assert_eq!(time_to_expiry(date(2025, 1, 1), date(2025, 1, 1), DAYS_PER_YEAR), 0.0);
    }

    #[test]
    fn test_parse_expiry() {
        assert_eq!(parse_expiry("2028-01-21").unwrap(), date(2028, 1, 21));
        assert_eq!(parse_expiry(" 2028-01-21 ").unwrap(), date(2028, 1, 21));

        let err = parse_expiry("21/01/2028").unwrap_err();
        assert!(matches!(err, BsError::InvalidInput(_)));
        assert!(parse_expiry("2028-02-30").is_err());
    }

    #[test]
    fn test_validate() {
        assert!(PricingInput::new(100.0, 100.0, 1.0, 0.05, 0.2).validate().is_ok());
        // Negative rates are allowed
        assert!(PricingInput::new(100.0, 100.0, 1.0, -0.01, 0.2).validate().is_ok());

        assert!(PricingInput::new(0.0, 100.0, 1.0, 0.05, 0.2).validate().is_err());
        assert!(PricingInput::new(100.0, -1.0, 1.0, 0.05, 0.2).validate().is_err());
        assert!(PricingInput::new(100.0, 100.0, 0.0, 0.05, 0.2).validate().is_err());
        assert!(PricingInput::new(100.0, 100.0, 1.0, 0.05, 0.0).validate().is_err());
        assert!(PricingInput::new(100.0, 100.0, 1.0, 0.05, f64::NAN).validate().is_err());
        assert!(PricingInput::new(100.0, 100.0, 1.0, f64::INFINITY, 0.2).validate().is_err());
    }
}
