//! Yahoo Finance data fetcher
//!
//! Fetches spot prices and option chains for US-listed equities and ETFs
//! through Yahoo Finance's unofficial API.
//!
//! Note: This is for educational/research purposes. Yahoo Finance
//! data is delayed ~15 minutes and intended for personal use.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;

use super::source::MarketDataSource;
use crate::core::{BsError, BsResult, CallChain, ChainRow};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v7/finance";

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> BsResult<Self> {
        Self::with_base_url(BASE_URL)
    }

    /// Client pointed at a different host (mirrors, proxies)
    pub fn with_base_url(base_url: impl Into<String>) -> BsResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| BsError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str, what: &str) -> BsResult<T> {
        tracing::debug!("GET {}", url);

        self.client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| BsError::network(e.to_string()))?
            .json()
            .map_err(|e| BsError::data(format!("Failed to parse {}: {}", what, e)))
    }

    /// Get the last price for a symbol
    pub fn get_quote(&self, symbol: &str) -> BsResult<f64> {
        let url = format!("{}/quote?symbols={}", self.base_url, symbol);
        let response: YahooQuoteResponse = self.get_json(&url, "quote")?;

        let result = response
            .quote_response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| BsError::data(format!("No quote data returned for {}", symbol)))?;

        checked_spot(symbol, result.regular_market_price)
    }

    /// Get available option expiration dates
    pub fn get_expirations(&self, symbol: &str) -> BsResult<Vec<NaiveDate>> {
        let url = format!("{}/options/{}", self.base_url, symbol);
        let response: YahooOptionsResponse = self.get_json(&url, "options")?;

        let chain = first_result(response, symbol)?;

        Ok(chain
            .expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect())
    }

    /// Get the call side of the chain for a specific expiration
    pub fn get_call_chain(&self, symbol: &str, expiry: NaiveDate) -> BsResult<CallChain> {
        let url = format!(
            "{}/options/{}?date={}",
            self.base_url,
            symbol,
            expiry_timestamp(expiry)
        );
        let response: YahooOptionsResponse = self.get_json(&url, "options")?;

        let chain_data = first_result(response, symbol)?;
        let options = chain_data
            .options
            .into_iter()
            .next()
            .ok_or_else(|| {
                BsError::data(format!("No option chain for {} expiring {}", symbol, expiry))
            })?;

        // Yahoo falls back to the nearest expiry when the date is not listed
        if let Some(ts) = options.expiration_date {
            let served = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive());
            if served != Some(expiry) {
                return Err(BsError::data(format!(
                    "{} has no expiry on {} (provider returned {:?})",
                    symbol, expiry, served
                )));
            }
        }

        let mut chain = CallChain::new(symbol, expiry);
        for call in options.calls {
            match convert_call(call) {
                Some(row) => chain.push(row),
                None => tracing::debug!("Dropping {} call without a strike", symbol),
            }
        }

        tracing::info!("Fetched {} calls for {} {}", chain.len(), symbol, expiry);
        Ok(chain)
    }
}

impl MarketDataSource for YahooClient {
    fn spot_price(&self, symbol: &str) -> BsResult<f64> {
        self.get_quote(symbol)
    }

    fn call_chain(&self, symbol: &str, expiry: NaiveDate) -> BsResult<CallChain> {
        self.get_call_chain(symbol, expiry)
    }
}

/// Yahoo keys option expiries by midnight UTC
fn expiry_timestamp(expiry: NaiveDate) -> i64 {
    expiry.and_time(NaiveTime::MIN).and_utc().timestamp()
}

fn checked_spot(symbol: &str, price: Option<f64>) -> BsResult<f64> {
    match price {
        Some(p) if p.is_finite() && p > 0.0 => Ok(p),
        Some(p) => Err(BsError::data(format!("Invalid last price for {}: {}", symbol, p))),
        None => Err(BsError::data(format!("No last price for {}", symbol))),
    }
}

fn first_result(response: YahooOptionsResponse, symbol: &str) -> BsResult<YahooOptionChainData> {
    response
        .option_chain
        .result
        .into_iter()
        .next()
        .ok_or_else(|| BsError::data(format!("No options data returned for {}", symbol)))
}

/// Convert Yahoo option data to a chain row
fn convert_call(data: YahooOptionData) -> Option<ChainRow> {
    Some(ChainRow {
        strike: data.strike?,
        implied_vol: data.implied_volatility,
        bid: data.bid,
        ask: data.ask,
        contract_symbol: data.contract_symbol,
    })
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResult,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    result: Vec<YahooQuoteData>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    #[serde(rename = "expirationDate")]
    expiration_date: Option<i64>,
    #[serde(default)]
    calls: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    #[serde(rename = "contractSymbol")]
    contract_symbol: Option<String>,
    strike: Option<f64>,
    bid: Option<f64>,
    ask: Option<f64>,
    #[serde(rename = "impliedVolatility")]
    implied_volatility: Option<f64>,
}
