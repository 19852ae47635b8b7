//! Row validation
//!
//! Every chain row is classified before pricing. Rows that cannot be
//! priced or compared come back as [`RowStatus::Skipped`] with the reason,
//! and the reports filter on that instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::ChainRow;

/// How strictly bid/ask quotes are checked in the comparison report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuotePolicy {
    /// Only a missing or non-finite mid price is rejected
    #[default]
    Permissive,
    /// Additionally reject negative quotes and bid > ask
    Strict,
}

/// Why a chain row was left out of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// Strike is zero, negative or not a number
    InvalidStrike,
    /// No implied volatility was quoted
    MissingVolatility,
    /// Implied volatility is NaN or infinite
    NonFiniteVolatility,
    /// Implied volatility is zero or negative
    NonPositiveVolatility,
    /// Bid or ask is missing
    MissingQuote,
    /// (bid + ask) / 2 is NaN or infinite
    NonFiniteMidPrice,
    /// Bid or ask below zero (strict policy)
    NegativeQuote,
    /// Bid above ask (strict policy)
    CrossedQuote,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::InvalidStrike => "invalid strike",
            SkipReason::MissingVolatility => "missing implied volatility",
            SkipReason::NonFiniteVolatility => "non-finite implied volatility",
            SkipReason::NonPositiveVolatility => "non-positive implied volatility",
            SkipReason::MissingQuote => "missing bid or ask",
            SkipReason::NonFiniteMidPrice => "non-finite mid price",
            SkipReason::NegativeQuote => "negative bid or ask",
            SkipReason::CrossedQuote => "bid above ask",
        };
        f.write_str(s)
    }
}

/// Strike and volatility of a row that can be priced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRow {
    pub strike: f64,
    pub volatility: f64,
}

/// A priceable row that also has a usable market mid price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotedRow {
    pub strike: f64,
    pub volatility: f64,
    pub market_price: f64,
}

/// Outcome of validating one chain row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowStatus<T> {
    Valid(T),
    Skipped(SkipReason),
}

impl<T> RowStatus<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, RowStatus::Valid(_))
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            RowStatus::Valid(_) => None,
            RowStatus::Skipped(reason) => Some(*reason),
        }
    }
}

/// A row left out of a report, by position in the chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub index: usize,
    pub strike: f64,
    pub reason: SkipReason,
}

fn check_strike(row: &ChainRow) -> Result<f64, SkipReason> {
    if row.strike.is_finite() && row.strike > 0.0 {
        Ok(row.strike)
    } else {
        Err(SkipReason::InvalidStrike)
    }
}

fn check_vol(row: &ChainRow) -> Result<f64, SkipReason> {
    match row.implied_vol {
        None => Err(SkipReason::MissingVolatility),
        Some(v) if !v.is_finite() => Err(SkipReason::NonFiniteVolatility),
        Some(v) if v <= 0.0 => Err(SkipReason::NonPositiveVolatility),
        Some(v) => Ok(v),
    }
}

fn check_quote(row: &ChainRow, policy: QuotePolicy) -> Result<f64, SkipReason> {
    let mid = row.mid().ok_or(SkipReason::MissingQuote)?;
    if !mid.is_finite() {
        return Err(SkipReason::NonFiniteMidPrice);
    }

    if policy == QuotePolicy::Strict {
        // Both sides are finite here since the mid is
        let (bid, ask) = (row.bid.unwrap_or(mid), row.ask.unwrap_or(mid));
        if bid < 0.0 || ask < 0.0 {
            return Err(SkipReason::NegativeQuote);
        }
        if bid > ask {
            return Err(SkipReason::CrossedQuote);
        }
    }

    Ok(mid)
}

/// Classify a row for the model-only table
pub fn validate_for_model(row: &ChainRow) -> RowStatus<ValidRow> {
    let checked = check_strike(row)
        .and_then(|strike| check_vol(row).map(|volatility| ValidRow { strike, volatility }));

    match checked {
        Ok(valid) => RowStatus::Valid(valid),
        Err(reason) => RowStatus::Skipped(reason),
    }
}

/// Classify a row for the model-vs-market table
pub fn validate_for_comparison(row: &ChainRow, policy: QuotePolicy) -> RowStatus<QuotedRow> {
    match validate_for_model(row) {
        RowStatus::Valid(valid) => match check_quote(row, policy) {
            Ok(market_price) => RowStatus::Valid(QuotedRow {
                strike: valid.strike,
                volatility: valid.volatility,
                market_price,
            }),
            Err(reason) => RowStatus::Skipped(reason),
        },
        RowStatus::Skipped(reason) => RowStatus::Skipped(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_validation() {
        let ok = ChainRow::new(100.0).with_vol(0.25);
        assert_eq!(
            validate_for_model(&ok),
            RowStatus::Valid(ValidRow {
                strike: 100.0,
                volatility: 0.25
            })
        );

        let cases = [
            (ChainRow::new(100.0), SkipReason::MissingVolatility),
            (ChainRow::new(100.0).with_vol(f64::NAN), SkipReason::NonFiniteVolatility),
            (ChainRow::new(100.0).with_vol(f64::INFINITY), SkipReason::NonFiniteVolatility),
            (ChainRow::new(100.0).with_vol(0.0), SkipReason::NonPositiveVolatility),
            (ChainRow::new(100.0).with_vol(-0.1), SkipReason::NonPositiveVolatility),
            (ChainRow::new(0.0).with_vol(0.25), SkipReason::InvalidStrike),
            (ChainRow::new(f64::NAN).with_vol(0.25), SkipReason::InvalidStrike),
        ];

        for (row, reason) in cases {
            assert_eq!(validate_for_model(&row).skip_reason(), Some(reason), "{:?}", row);
        }
    }

    #[test]
    fn test_model_validation_ignores_quotes() {
        let row = ChainRow::new(100.0).with_vol(0.25).with_quote(f64::NAN, 5.0);
        assert!(validate_for_model(&row).is_valid());
    }

    #[test]
    fn test_comparison_validation() {
        let row = ChainRow::new(100.0).with_vol(0.25).with_quote(4.0, 5.0);
        assert_eq!(
            validate_for_comparison(&row, QuotePolicy::Permissive),
            RowStatus::Valid(QuotedRow {
                strike: 100.0,
                volatility: 0.25,
                market_price: 4.5
            })
        );

        let nan_bid = ChainRow::new(100.0).with_vol(0.25).with_quote(f64::NAN, 5.0);
        assert_eq!(
            validate_for_comparison(&nan_bid, QuotePolicy::Permissive).skip_reason(),
            Some(SkipReason::NonFiniteMidPrice)
        );

        let no_quote = ChainRow::new(100.0).with_vol(0.25);
        assert_eq!(
            validate_for_comparison(&no_quote, QuotePolicy::Permissive).skip_reason(),
            Some(SkipReason::MissingQuote)
        );

        // Volatility is checked before quotes
        let both_bad = ChainRow::new(100.0).with_quote(f64::NAN, 5.0);
        assert_eq!(
            validate_for_comparison(&both_bad, QuotePolicy::Permissive).skip_reason(),
            Some(SkipReason::MissingVolatility)
        );
    }

    #[test]
    fn test_quote_policy() {
        let crossed = ChainRow::new(100.0).with_vol(0.25).with_quote(5.5, 5.0);
        assert!(validate_for_comparison(&crossed, QuotePolicy::Permissive).is_valid());
        assert_eq!(
            validate_for_comparison(&crossed, QuotePolicy::Strict).skip_reason(),
            Some(SkipReason::CrossedQuote)
        );

        let negative = ChainRow::new(100.0).with_vol(0.25).with_quote(-0.05, 0.10);
        assert!(validate_for_comparison(&negative, QuotePolicy::Permissive).is_valid());
        assert_eq!(
            validate_for_comparison(&negative, QuotePolicy::Strict).skip_reason(),
            Some(SkipReason::NegativeQuote)
        );

        let locked = ChainRow::new(100.0).with_vol(0.25).with_quote(5.0, 5.0);
        assert!(validate_for_comparison(&locked, QuotePolicy::Strict).is_valid());
    }
}
