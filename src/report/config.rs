//! Configuration for report generation

use serde::{Deserialize, Serialize};

use super::validation::QuotePolicy;
use crate::core::{BsError, BsResult, DAYS_PER_YEAR};

/// Risk-free rate applied when none is given
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.045;

/// Configuration for both report variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Continuously compounded risk-free rate
    /// Default: 0.045
    pub risk_free_rate: f64,

    /// Calendar days per year when converting the expiry to a year fraction
    /// Default: 365
    pub days_per_year: f64,

    /// Bid/ask checks in the comparison report
    /// Default: Permissive
    pub quote_policy: QuotePolicy,

    /// Decimal places shown for prices and volatilities
    /// Default: 4
    pub display_decimals: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            days_per_year: DAYS_PER_YEAR,
            quote_policy: QuotePolicy::Permissive,
            display_decimals: 4,
        }
    }
}

impl ReportConfig {
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    pub fn with_quote_policy(mut self, policy: QuotePolicy) -> Self {
        self.quote_policy = policy;
        self
    }

    pub fn validate(&self) -> BsResult<()> {
        if !self.risk_free_rate.is_finite() {
            return Err(BsError::invalid_input(format!(
                "risk-free rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        if !(self.days_per_year.is_finite() && self.days_per_year > 0.0) {
            return Err(BsError::invalid_input(format!(
                "days per year must be positive, got {}",
                self.days_per_year
            )));
        }
        Ok(())
    }
}
