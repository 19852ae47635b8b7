//! Option chain quotes
//!
//! Market data for the call side of a single expiry, as delivered by a
//! market-data source. The reports only ever read these.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One strike of an option chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRow {
    /// Strike price
    pub strike: f64,
    /// Implied volatility (if provided by the exchange)
    pub implied_vol: Option<f64>,
    /// Bid price
    pub bid: Option<f64>,
    /// Ask price
    pub ask: Option<f64>,
    /// Contract symbol (exchange-specific)
    pub contract_symbol: Option<String>,
}

impl ChainRow {
    /// Create a row with the given strike and no market data
    pub fn new(strike: f64) -> Self {
        Self {
            strike,
            implied_vol: None,
            bid: None,
            ask: None,
            contract_symbol: None,
        }
    }

    pub fn with_vol(mut self, vol: f64) -> Self {
        self.implied_vol = Some(vol);
        self
    }

    pub fn with_quote(mut self, bid: f64, ask: f64) -> Self {
        self.bid = Some(bid);
        self.ask = Some(ask);
        self
    }

    /// Mid price from bid/ask.
    ///
    /// `None` when either side is missing. A NaN side yields a NaN mid.
    pub fn mid(&self) -> Option<f64> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }
}

/// Call quotes for a single expiry, in provider order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallChain {
    /// Underlying symbol
    pub underlying: String,
    /// Expiry date
    pub expiry: NaiveDate,
    /// Rows in the order the provider delivered them
    pub rows: Vec<ChainRow>,
}

impl CallChain {
    pub fn new(underlying: impl Into<String>, expiry: NaiveDate) -> Self {
        Self {
            underlying: underlying.into(),
            expiry,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: ChainRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mid() {
        let row = ChainRow::new(100.0).with_quote(10.0, 10.5);
        assert!((row.mid().unwrap() - 10.25).abs() < 1e-12);
    }

    #[test]
    fn test_mid_missing_side() {
        let mut row = ChainRow::new(100.0);
        row.ask = Some(5.0);
        assert!(row.mid().is_none());

        row.bid = Some(f64::NAN);
        assert!(row.mid().unwrap().is_nan());
    }

    #[test]
    fn test_chain_keeps_order() {
        let expiry = NaiveDate::from_ymd_opt(2028, 1, 21).unwrap();
        let mut chain = CallChain::new("AAPL", expiry);
        chain.push(ChainRow::new(150.0));
        chain.push(ChainRow::new(100.0));
        chain.push(ChainRow::new(125.0));

        let strikes: Vec<f64> = chain.rows.iter().map(|r| r.strike).collect();
        assert_eq!(strikes, vec![150.0, 100.0, 125.0]);
        assert_eq!(chain.len(), 3);
    }
}
