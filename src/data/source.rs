//! Market-data source abstraction
//!
//! Reports never construct a provider themselves; they are handed
//! something implementing [`MarketDataSource`].

use chrono::NaiveDate;

use crate::core::{BsError, BsResult, CallChain};

/// Provider of spot prices and option chains
pub trait MarketDataSource {
    /// Current (or last) price of the underlying
    fn spot_price(&self, symbol: &str) -> BsResult<f64>;

    /// Call side of the option chain for one expiry, in provider order
    fn call_chain(&self, symbol: &str, expiry: NaiveDate) -> BsResult<CallChain>;
}

impl<T: MarketDataSource + ?Sized> MarketDataSource for &T {
    fn spot_price(&self, symbol: &str) -> BsResult<f64> {
        (**self).spot_price(symbol)
    }

    fn call_chain(&self, symbol: &str, expiry: NaiveDate) -> BsResult<CallChain> {
        (**self).call_chain(symbol, expiry)
    }
}

/// In-memory source serving fixed data.
///
/// Useful for replaying a captured chain or for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    spots: Vec<(String, f64)>,
    chains: Vec<CallChain>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spot(mut self, symbol: impl Into<String>, spot: f64) -> Self {
        self.spots.push((symbol.into(), spot));
        self
    }

    pub fn with_chain(mut self, chain: CallChain) -> Self {
        self.chains.push(chain);
        self
    }
}

impl MarketDataSource for StaticMarketData {
    fn spot_price(&self, symbol: &str) -> BsResult<f64> {
        self.spots
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|&(_, spot)| spot)
            .ok_or_else(|| BsError::data(format!("No quote data for {}", symbol)))
    }

    fn call_chain(&self, symbol: &str, expiry: NaiveDate) -> BsResult<CallChain> {
        self.chains
            .iter()
            .find(|c| c.underlying == symbol && c.expiry == expiry)
            .cloned()
            .ok_or_else(|| {
                BsError::data(format!("No option chain for {} expiring {}", symbol, expiry))
            })
    }
}
